use discovery_rpc::TransportError;
use discovery_rpc::protocol::{
    CAPABILITY_GET, CAPABILITY_NOT_AVAILABLE, CAPABILITY_NOT_PERMITTED, CAPABILITY_NOT_SUPPORTED,
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
};
use thiserror::Error;

/// Failure of a Discovery call, one variant per platform status
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not connected")]
    NotConnected,

    #[error("Request timed out")]
    Timedout,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Capability not supported: {0}")]
    CapabilityNotSupported(String),

    #[error("Capability not available: {0}")]
    CapabilityNotAvailable(String),

    #[error("Capability not permitted: {0}")]
    CapabilityNotPermitted(String),

    #[error("Capability get failed: {0}")]
    CapabilityGet(String),

    #[error("{0}")]
    General(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotConnected => Error::NotConnected,
            TransportError::Timeout => Error::Timedout,
            TransportError::Json(e) => Error::Json(e),
            TransportError::Rpc { code, message } => match code {
                INVALID_REQUEST => Error::InvalidRequest(message),
                METHOD_NOT_FOUND => Error::MethodNotFound(message),
                INVALID_PARAMS => Error::InvalidParams(message),
                CAPABILITY_NOT_SUPPORTED => Error::CapabilityNotSupported(message),
                CAPABILITY_NOT_AVAILABLE => Error::CapabilityNotAvailable(message),
                CAPABILITY_NOT_PERMITTED => Error::CapabilityNotPermitted(message),
                CAPABILITY_GET => Error::CapabilityGet(message),
                _ => Error::General(format!("RPC error {code}: {message}")),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
