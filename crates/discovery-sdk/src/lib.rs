//! Typed client for the Discovery capability API.
//!
//! [`Discovery`] marshals typed calls into JSON-RPC requests over an injected
//! [`Transport`](discovery_rpc::Transport) and unmarshals responses and platform
//! events back into the types from [`discovery_types`].
//!
//! # Example
//!
//! ```no_run
//! use discovery_sdk::{Discovery, SdkConfig};
//! use discovery_types::{HomeIntent, IntentContext};
//!
//! # async fn example() -> discovery_sdk::Result<()> {
//! let (discovery, _platform) = Discovery::over_channel(SdkConfig::default());
//!
//! discovery
//!     .on_navigate_to(|intent: HomeIntent| {
//!         println!("going home from {}", intent.context.source);
//!     })
//!     .await?;
//!
//! discovery
//!     .launch_with("xrn:firebolt:application:main", HomeIntent {
//!         context: IntentContext::new("editorial"),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod provider;

pub use config::SdkConfig;
pub use discovery::Discovery;
pub use error::{Error, Result};
pub use events::{EventRegistry, ListenerId, Subscription};
pub use provider::{DiscoveryProvider, UserInterestSession};

pub use discovery_rpc::{ChannelPeer, ChannelTransport, Transport};
