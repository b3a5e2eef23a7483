//! RPC Request and Response Types

use serde::{Deserialize, Serialize};
use velum::attest::{AttestationReport, SignerStatus};
use velum::cipher::IndexKey;

/// Per-signer attestation entry as reported to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationEntry {
    /// Signer account (hex)
    pub signer: String,
    /// Outcome for this pass
    pub status: SignerStatus,
}

/// Attestation summary embedded in store/search responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationSummary {
    /// One entry per configured signer, in configured order
    pub signers: Vec<AttestationEntry>,
    /// Whether every signer has a recorded signature
    pub quorum_complete: bool,
}

impl From<&AttestationReport> for AttestationSummary {
    fn from(report: &AttestationReport) -> Self {
        Self {
            signers: report
                .entries()
                .iter()
                .map(|entry| AttestationEntry {
                    signer: entry.signer.to_hex(),
                    status: entry.status,
                })
                .collect(),
            quorum_complete: report.quorum_complete(),
        }
    }
}

/// Response to `velum_storeText`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTextResponse {
    /// Outcome message ("Data stored on-chain." / "Data already exists.")
    pub message: String,
    /// Derived record key (absent on duplicate)
    pub key: Option<IndexKey>,
    /// Attestation summary (absent on duplicate)
    pub attestation: Option<AttestationSummary>,
}

/// Response to `velum_searchText`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextResponse {
    /// Outcome message ("Data found on-chain." / "Data not found.")
    pub message: String,
    /// Derived lookup key (absent when not found)
    pub key: Option<IndexKey>,
    /// Stored payload the key points at
    pub pointer: Option<String>,
    /// Attestation summary (absent when not found)
    pub attestation: Option<AttestationSummary>,
}

/// Response to `velum_storeImage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageResponse {
    /// Outcome message
    pub message: String,
    /// Blob store URI (absent on duplicate)
    pub object_uri: Option<String>,
    /// Ledger key derived from the URI digest (absent on duplicate)
    pub key: Option<IndexKey>,
}

/// Node information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    /// Service version
    pub version: String,
    /// RPC API version
    pub rpc_version: String,
    /// Network name
    pub network: String,
    /// Configured signer accounts (hex), in quorum order
    pub signers: Vec<String>,
    /// Cipher shift in effect
    pub shift: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_serialize_camel_case() {
        let response = SearchTextResponse {
            message: "Data not found.".to_string(),
            key: None,
            pointer: None,
            attestation: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Data not found.");
        assert!(json["attestation"].is_null());

        let info = NodeInfo {
            version: "0.1.0".to_string(),
            rpc_version: crate::RPC_VERSION.to_string(),
            network: "local".to_string(),
            signers: vec![],
            shift: 3,
        };
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("rpcVersion").is_some());
    }
}
