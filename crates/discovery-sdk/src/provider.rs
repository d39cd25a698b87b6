//! User interest provider.
//!
//! An app that registers a [`DiscoveryProvider`] is asked by the platform to
//! describe the content the user is currently looking at whenever the user
//! expresses interest in it (adding it to a playlist, reacting, recording).

use std::sync::Arc;

use discovery_rpc::Transport;
use discovery_types::{EntityDetails, UserInterestParameters};
use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::discovery::Inner;

const USER_INTEREST_RESPONSE: &str = "discovery.userInterestResponse";
const USER_INTEREST_ERROR: &str = "discovery.userInterestError";

/// Answers `discovery.onRequestUserInterest`
pub trait DiscoveryProvider: Send + Sync + 'static {
    /// Called once per request. Answer through `session`, now or later.
    fn user_interest(&self, parameters: UserInterestParameters, session: UserInterestSession);
}

/// Where a session's answer goes
trait ResponseSink: Send + Sync {
    fn send(self: Arc<Self>, method: &'static str, params: Value);
}

impl<T: Transport> ResponseSink for Inner<T> {
    fn send(self: Arc<Self>, method: &'static str, params: Value) {
        self.fire_and_log(method, params);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse<'a> {
    correlation_id: &'a str,
    result: &'a EntityDetails,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionError<'a> {
    correlation_id: &'a str,
    error: SessionErrorBody<'a>,
}

#[derive(Serialize)]
struct SessionErrorBody<'a> {
    code: i32,
    message: &'a str,
}

/// One pending user interest request
pub struct UserInterestSession {
    correlation_id: String,
    sink: Arc<dyn ResponseSink>,
}

impl std::fmt::Debug for UserInterestSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInterestSession")
            .field("correlation_id", &self.correlation_id)
            .finish_non_exhaustive()
    }
}

impl UserInterestSession {
    pub(crate) fn new<T: Transport>(correlation_id: String, inner: Arc<Inner<T>>) -> Self {
        Self {
            correlation_id,
            sink: inner,
        }
    }

    #[must_use]
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Answer with the details of the entity the user is interested in.
    ///
    /// The response is sent in the background.
    ///
    /// # Errors
    ///
    /// Returns `Json` if `details` cannot be serialized.
    pub fn respond(self, details: &EntityDetails) -> Result<()> {
        let params = serde_json::to_value(SessionResponse {
            correlation_id: &self.correlation_id,
            result: details,
        })?;
        self.sink.send(USER_INTEREST_RESPONSE, params);
        Ok(())
    }

    /// Decline the request.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the error document cannot be serialized.
    pub fn error(self, message: &str) -> Result<()> {
        let params = serde_json::to_value(SessionError {
            correlation_id: &self.correlation_id,
            error: SessionErrorBody {
                code: discovery_rpc::INTERNAL_ERROR,
                message,
            },
        })?;
        self.sink.send(USER_INTEREST_ERROR, params);
        Ok(())
    }
}
