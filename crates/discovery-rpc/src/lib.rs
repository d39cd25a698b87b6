//! JSON-RPC 2.0 plumbing for the Discovery SDK.
//!
//! The SDK talks to the platform through the [`Transport`] trait and never
//! owns a socket. This crate provides:
//!
//! - [`protocol`]: JSON-RPC 2.0 message types (Request, Response, Notification)
//!   and the platform's error codes
//! - [`transport`]: the [`Transport`] seam
//! - [`channel`]: an in-process [`Transport`] over tokio channels, with a peer
//!   half an application bridges to its real connection
//! - [`error`]: [`TransportError`] and the `Result` alias
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use discovery_rpc::{ChannelTransport, Transport};
//!
//! # async fn example() -> discovery_rpc::Result<()> {
//! let (transport, _peer, _events) = ChannelTransport::pair(Duration::from_secs(30), 64);
//! let policy = transport
//!     .invoke("discovery.policy", serde_json::json!({}))
//!     .await?;
//! println!("{policy}");
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod error;
pub mod protocol;
pub mod transport;

pub use channel::{ChannelPeer, ChannelTransport};

pub use error::{Result, TransportError};

pub use protocol::{
    CAPABILITY_GET, CAPABILITY_NOT_AVAILABLE, CAPABILITY_NOT_PERMITTED, CAPABILITY_NOT_SUPPORTED,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND, Message,
    Notification, PARSE_ERROR, Request, RequestId, Response, RpcError,
};

pub use transport::Transport;
