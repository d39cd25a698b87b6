//! JSON-RPC 2.0 envelope types.
//!
//! The SDK only ever sends requests and receives responses and notifications,
//! but the full envelope is modelled so a bridged connection can forward raw
//! messages unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const CAPABILITY_NOT_SUPPORTED: i32 = -50100;
pub const CAPABILITY_NOT_AVAILABLE: i32 = -50200;
pub const CAPABILITY_NOT_PERMITTED: i32 = -50300;
pub const CAPABILITY_GET: i32 = -50400;

/// JSON-RPC 2.0 Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for RequestId {
    fn from(n: u64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Absent for notifications that arrive in request form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl Request {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: Some(id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: RequestId,
}

impl Response {
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    #[must_use]
    pub fn error(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// A platform event, e.g. `discovery.onNavigateTo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Notification {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

impl From<Request> for Notification {
    fn from(request: Request) -> Self {
        Self {
            jsonrpc: request.jsonrpc,
            method: request.method,
            params: request.params,
        }
    }
}

/// JSON-RPC 2.0 Error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn method_not_found() -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found")
    }

    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    #[must_use]
    pub fn capability_not_available(capability: &str) -> Self {
        Self::new(
            CAPABILITY_NOT_AVAILABLE,
            format!("Capability not available: {capability}"),
        )
    }

    #[must_use]
    pub fn capability_not_permitted(capability: &str) -> Self {
        Self::new(
            CAPABILITY_NOT_PERMITTED,
            format!("Capability not permitted: {capability}"),
        )
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Any message on the connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Response(Response),
    Notification(Notification),
}

impl Message {
    /// Parse a JSON string into a `Message`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or doesn't match any message type.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize this message to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(self, Message::Request(r) if r.id.is_none())
            || matches!(self, Message::Notification(_))
    }

    /// The event carried by this message, if it is a notification in either form
    #[must_use]
    pub fn into_notification(self) -> Option<Notification> {
        match self {
            Message::Notification(n) => Some(n),
            Message::Request(r) if r.id.is_none() => Some(r.into()),
            Message::Request(_) | Message::Response(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let req = Request::new(
            "discovery.launch",
            Some(json!({"appId": "xrn:firebolt:application-type:main"})),
            7.into(),
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "discovery.launch",
                "params": {"appId": "xrn:firebolt:application-type:main"},
                "id": 7
            })
        );
    }

    #[test]
    fn test_request_id_display() {
        assert_eq!(RequestId::Number(3).to_string(), "3");
        assert_eq!(RequestId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_response_null_result_parses() {
        let json = r#"{"jsonrpc":"2.0","result":null,"id":4}"#;
        let msg = Message::parse(json).unwrap();
        let Message::Response(resp) = msg else {
            panic!("Expected Response");
        };
        assert!(resp.result.is_none());
        assert!(resp.error.is_none());
        assert_eq!(resp.id, RequestId::Number(4));
    }

    #[test]
    fn test_error_response_parses() {
        let json = r#"{"jsonrpc":"2.0","error":{"code":-50300,"message":"denied"},"id":"x"}"#;
        let Message::Response(resp) = Message::parse(json).unwrap() else {
            panic!("Expected Response");
        };
        let error = resp.error.unwrap();
        assert_eq!(error.code, CAPABILITY_NOT_PERMITTED);
        assert_eq!(resp.id, RequestId::String("x".to_string()));
    }

    #[test]
    fn test_notification_parses_in_request_form() {
        let json = r#"{"jsonrpc":"2.0","method":"discovery.onPolicyChanged","params":{"enableRecommendations":true}}"#;
        let msg = Message::parse(json).unwrap();
        assert!(msg.is_notification());

        let notification = msg.into_notification().unwrap();
        assert_eq!(notification.method, "discovery.onPolicyChanged");
        assert_eq!(
            notification.params.unwrap()["enableRecommendations"],
            json!(true)
        );
    }

    #[test]
    fn test_request_with_id_is_not_notification() {
        let msg = Message::Request(Request::new("x", None, 1.into()));
        assert!(!msg.is_notification());
        assert!(msg.into_notification().is_none());
    }

    #[test]
    fn test_response_success_omits_error() {
        let resp = Response::success(1.into(), json!(true));
        let json = Message::Response(resp).to_json().unwrap();
        assert!(json.contains("\"result\":true"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_rpc_error_constructors() {
        let err = RpcError::capability_not_available("xrn:firebolt:capability:discovery:policy");
        assert_eq!(err.code, CAPABILITY_NOT_AVAILABLE);
        assert!(err.message.contains("discovery:policy"));

        let err = RpcError::invalid_params("missing appId");
        assert_eq!(err.code, INVALID_PARAMS);
        assert_eq!(err.to_string(), "RPC error -32602: missing appId");
    }
}
