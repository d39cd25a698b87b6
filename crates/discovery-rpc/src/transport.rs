//! The transport seam.
//!
//! The SDK never owns a connection. It is handed something that can invoke a
//! named method with a JSON object of parameters and yield the JSON result.
//! Connection management, authentication, retries and framing all live on the
//! far side of this trait.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

pub trait Transport: Send + Sync + 'static {
    /// Invoke `method` with `params` (always a JSON object) and return the raw result.
    ///
    /// A `null` or missing result is returned as [`Value::Null`].
    fn invoke(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn invoke(&self, method: &str, params: Value) -> impl Future<Output = Result<Value>> + Send {
        (**self).invoke(method, params)
    }
}
