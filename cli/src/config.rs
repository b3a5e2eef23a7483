//! Service Configuration
//!
//! Handles loading and saving service configuration from TOML files.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use velum::attest::{QuorumConfig, SignerSet, SignerSetError};
use velum::ledger::SignerId;
use velum::ServiceConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Full service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VelumConfig {
    /// General service settings
    #[serde(default)]
    pub node: NodeSettings,

    /// Cipher settings
    #[serde(default)]
    pub cipher: CipherSettings,

    /// Signer quorum settings
    #[serde(default)]
    pub signers: SignerSettings,

    /// RPC settings
    #[serde(default)]
    pub rpc: RpcSettings,
}

/// General service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSettings {
    /// Network name (reported by the info endpoint)
    pub network: String,
    /// Blob store bucket for image payloads
    pub blob_bucket: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            network: "local".to_string(),
            blob_bucket: "velum-images".to_string(),
        }
    }
}

/// Cipher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherSettings {
    /// Alphabetic substitution shift. Lookups only match records ingested
    /// with the same shift, so changing this orphans existing records.
    pub shift: u8,
}

impl Default for CipherSettings {
    fn default() -> Self {
        Self {
            shift: velum::cipher::DEFAULT_SHIFT,
        }
    }
}

/// Signer quorum settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerSettings {
    /// Signer accounts (hex addresses), in quorum order
    pub accounts: Vec<String>,
    /// Bound on each signature round trip (milliseconds)
    pub sign_timeout_ms: u64,
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self {
            accounts: (0..5).map(|i| SignerId::dev(i).to_hex()).collect(),
            sign_timeout_ms: 5_000,
        }
    }
}

/// RPC settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSettings {
    /// HTTP bind address
    pub http_addr: String,
    /// Maximum request size in bytes
    pub max_request_size: u32,
    /// Maximum concurrent connections
    pub max_connections: u32,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            http_addr: format!("127.0.0.1:{}", velum_rpc::DEFAULT_RPC_PORT),
            max_request_size: 10 * 1024 * 1024,
            max_connections: 100,
        }
    }
}

impl VelumConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Local development configuration: five deterministic dev accounts.
    pub fn local() -> Self {
        Self::default()
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=25).contains(&self.cipher.shift) {
            return Err(ConfigError::Invalid(format!(
                "cipher shift must be in 1..=25, got {}",
                self.cipher.shift
            )));
        }
        self.signer_set()?;
        self.rpc
            .http_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid(format!("bad rpc address: {e}")))?;
        Ok(())
    }

    /// Parse the configured signer accounts into an ordered set.
    pub fn signer_set(&self) -> Result<SignerSet, ConfigError> {
        let mut members = Vec::with_capacity(self.signers.accounts.len());
        for account in &self.signers.accounts {
            let signer: SignerId = account
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{e}")))?;
            members.push(signer);
        }
        SignerSet::new(members).map_err(|e: SignerSetError| ConfigError::Invalid(e.to_string()))
    }

    /// Service-level configuration derived from this file.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            shift: self.cipher.shift,
            quorum: QuorumConfig {
                sign_timeout: Duration::from_millis(self.signers.sign_timeout_ms),
            },
        }
    }

    /// RPC server configuration derived from this file.
    pub fn rpc_config(&self) -> Result<velum_rpc::RpcConfig, ConfigError> {
        Ok(velum_rpc::RpcConfig {
            http_addr: self
                .rpc
                .http_addr
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("bad rpc address: {e}")))?,
            max_request_size: self.rpc.max_request_size,
            max_connections: self.rpc.max_connections,
            network: self.node.network.clone(),
            ..velum_rpc::RpcConfig::default()
        })
    }
}

/// Default configuration path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("velum.toml")
}

/// Load the config from `path`, falling back to local defaults when no
/// file exists and none was explicitly requested.
pub fn load_or_default(path: Option<PathBuf>) -> Result<VelumConfig, ConfigError> {
    match path {
        Some(path) => VelumConfig::load(&path),
        None => {
            let default = default_config_path();
            if default.exists() {
                VelumConfig::load(&default)
            } else {
                Ok(VelumConfig::local())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = VelumConfig::local();
        config.validate().unwrap();
        assert_eq!(config.signer_set().unwrap().len(), 5);
        assert_eq!(config.cipher.shift, 3);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("velum.toml");

        let config = VelumConfig::local();
        config.save(&path).unwrap();
        let loaded = VelumConfig::load(&path).unwrap();

        assert_eq!(loaded.signers.accounts, config.signers.accounts);
        assert_eq!(loaded.rpc.http_addr, config.rpc.http_addr);
    }

    #[test]
    fn rejects_out_of_range_shift() {
        let mut config = VelumConfig::local();
        config.cipher.shift = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.cipher.shift = 26;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_duplicate_signers() {
        let mut config = VelumConfig::local();
        let first = config.signers.accounts[0].clone();
        config.signers.accounts.push(first);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_accounts() {
        let mut config = VelumConfig::local();
        config.signers.accounts[0] = "0xnothex".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = VelumConfig::load(Path::new("/nonexistent/velum.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
