//delegacy-common/src/error.rs
//! Standardized error types for all Delegacy components

use thiserror::Error;

/// Standard result type used throughout Delegacy
pub type DelegacyResult<T> = std::result::Result<T, DelegacyError>;

/// Comprehensive error type for all Delegacy operations
#[derive(Error, Debug)]
pub enum DelegacyError {
    // Transport errors (connection refused, timeouts, bad status)
    #[error("Network error: {0}")]
    Network(String),

    // Read-only view call rejected by the node
    #[error("Query error: {0}")]
    Query(String),

    // State-changing call rejected by the signer or the chain
    #[error("Submission error: {0}")]
    Submission(String),

    // Wallet bridge errors
    #[error("Wallet error: {0}")]
    Wallet(String),

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported network type: {0}")]
    UnsupportedNetwork(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // View results that do not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    // External library errors
    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl DelegacyError {
    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a new submission error
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    /// Create a new wallet error
    pub fn wallet(msg: impl Into<String>) -> Self {
        Self::Wallet(msg.into())
    }

    /// Create a new config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new unsupported network error
    pub fn unsupported_network(name: impl Into<String>) -> Self {
        Self::UnsupportedNetwork(name.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error comes from configuration rather than the chain
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::UnsupportedNetwork(_))
    }
}

/// Convenience macro for creating DelegacyError instances
#[macro_export]
macro_rules! delegacy_error {
    ($variant:ident, $($arg:tt)*) => {
        $crate::error::DelegacyError::$variant(format!($($arg)*))
    };
}

/// Convenience macro for returning early with a DelegacyError
#[macro_export]
macro_rules! delegacy_bail {
    ($variant:ident, $($arg:tt)*) => {
        return Err($crate::delegacy_error!($variant, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bails(flag: bool) -> DelegacyResult<u8> {
        if flag {
            delegacy_bail!(Config, "missing endpoint for {}", "devnet");
        }
        Ok(1)
    }

    #[test]
    fn test_bail_macro() {
        let err = bails(true).unwrap_err();
        assert_eq!(err.to_string(), "Config error: missing endpoint for devnet");
        assert!(err.is_config());
        assert_eq!(bails(false).unwrap(), 1);
    }

    #[test]
    fn test_unsupported_network_message() {
        let err = DelegacyError::unsupported_network("localnet");
        assert_eq!(err.to_string(), "Unsupported network type: localnet");
        assert!(err.is_config());
        assert!(!DelegacyError::query("abort").is_config());
    }
}
