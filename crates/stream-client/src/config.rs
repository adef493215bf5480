//! Client configuration shared by every worker's client.

use crate::error::ClientError;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(60_000);

/// How the client resolves AWS credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CredentialStrategy {
    /// Environment, profile files, then instance metadata.
    #[default]
    DefaultChain,
    /// A named profile from the shared config files.
    Profile(String),
}

/// The knobs a client is built with.
///
/// Immutable once the pool starts; every worker gets a clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: String,
    /// Upper bound on requests in flight for one client.
    pub max_connections: usize,
    pub request_timeout: Duration,
    pub credentials: CredentialStrategy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            max_connections: 1,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            credentials: CredentialStrategy::DefaultChain,
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.region.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "region must not be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ClientError::InvalidConfig(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::InvalidConfig(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        if let CredentialStrategy::Profile(name) = &self.credentials {
            if name.trim().is_empty() {
                return Err(ClientError::InvalidConfig(
                    "credential profile name must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
