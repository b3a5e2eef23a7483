//! Fixed-shift alphabetic substitution.

/// Apply a fixed alphabetic shift to `text`.
///
/// ASCII letters rotate within their case's 26-letter alphabet, wrapping at
/// the end (`'z'` with shift 3 becomes `'c'`). Digits, punctuation,
/// whitespace and anything outside the ASCII alphabet pass through
/// unchanged. The transform is total and injective for any given shift, so
/// two distinct inputs can only collide at the derived-key level through a
/// genuine hash collision.
pub fn obfuscate(text: &str, shift: u8) -> String {
    rotate_text(text, shift % 26)
}

/// Invert [`obfuscate`] for the same shift.
pub fn deobfuscate(text: &str, shift: u8) -> String {
    rotate_text(text, (26 - shift % 26) % 26)
}

fn rotate_text(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a', shift),
            'A'..='Z' => rotate(c, b'A', shift),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8, shift: u8) -> char {
    ((c as u8 - base + shift) % 26 + base) as char
}
