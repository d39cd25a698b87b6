//! Error types for the transport seam.

use crate::protocol::RpcError;

/// Errors a [`Transport`](crate::Transport) can report for one invocation
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Not connected")]
    NotConnected,

    #[error("Request timeout")]
    Timeout,

    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransportError {
    pub fn rpc(code: i32, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }
}

impl From<RpcError> for TransportError {
    fn from(e: RpcError) -> Self {
        Self::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_rpc_factory() {
        let err = TransportError::rpc(-32600, "Invalid Request");
        match err {
            TransportError::Rpc { code, message } => {
                assert_eq!(code, -32600);
                assert_eq!(message, "Invalid Request");
            }
            _ => panic!("Expected Rpc error"),
        }
    }

    #[test]
    fn test_error_from_rpc_error() {
        let err: TransportError = RpcError::method_not_found().into();
        match err {
            TransportError::Rpc { code, message } => {
                assert_eq!(code, -32601);
                assert!(message.contains("not found"));
            }
            _ => panic!("Expected Rpc error"),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(TransportError::NotConnected.to_string(), "Not connected");
        assert_eq!(TransportError::Timeout.to_string(), "Request timeout");

        let err = TransportError::rpc(-50200, "Capability not available");
        assert!(err.to_string().contains("-50200"));
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: TransportError = json_err.into();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
