//! In-process transport over tokio channels.
//!
//! [`ChannelTransport`] is the SDK-facing half: it numbers requests, parks a
//! oneshot per pending id and wakes it when the matching response comes back.
//! [`ChannelPeer`] is the far half. An application bridges it to whatever real
//! connection it owns; tests drive it directly as a scripted platform.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, warn};

use crate::error::{Result, TransportError};
use crate::protocol::{Message, Notification, Request, RequestId, Response};
use crate::transport::Transport;

type PendingRequest = oneshot::Sender<Result<Response>>;

#[derive(Debug, Default)]
struct PendingTable {
    waiters: HashMap<RequestId, PendingRequest>,
    closed: bool,
}

/// SDK half of an in-process connection
#[derive(Debug)]
pub struct ChannelTransport {
    outgoing: mpsc::Sender<Message>,
    pending: Arc<Mutex<PendingTable>>,
    next_id: AtomicU64,
    timeout: Duration,
}

/// Platform half of an in-process connection
#[derive(Debug)]
pub struct ChannelPeer {
    /// Requests the SDK has sent
    pub requests: mpsc::Receiver<Message>,
    /// Responses and notifications headed to the SDK
    pub replies: mpsc::Sender<Message>,
}

impl ChannelPeer {
    /// Answer the request with `id`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::NotConnected` if the SDK half is gone.
    pub async fn respond(&self, id: RequestId, result: Value) -> Result<()> {
        self.send(Message::Response(Response::success(id, result)))
            .await
    }

    /// Deliver a platform event to the SDK.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::NotConnected` if the SDK half is gone.
    pub async fn emit(&self, event: &str, payload: Value) -> Result<()> {
        self.send(Message::Notification(Notification::new(event, Some(payload))))
            .await
    }

    /// Forward a raw message to the SDK.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::NotConnected` if the SDK half is gone.
    pub async fn send(&self, message: Message) -> Result<()> {
        self.replies
            .send(message)
            .await
            .map_err(|_| TransportError::NotConnected)
    }

    /// Wait for the next request the SDK sends.
    pub async fn next_request(&mut self) -> Option<Request> {
        while let Some(message) = self.requests.recv().await {
            if let Message::Request(request) = message {
                return Some(request);
            }
        }
        None
    }
}

impl ChannelTransport {
    /// Open a connected pair plus the receiver of platform events.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime; the response router runs
    /// as a spawned task.
    #[must_use]
    pub fn pair(
        timeout: Duration,
        buffer: usize,
    ) -> (Self, ChannelPeer, mpsc::Receiver<Notification>) {
        let buffer = buffer.max(1);
        let (outgoing_tx, outgoing_rx) = mpsc::channel(buffer);
        let (replies_tx, mut replies_rx) = mpsc::channel::<Message>(buffer);
        let (events_tx, events_rx) = mpsc::channel(buffer);

        let pending = Arc::new(Mutex::new(PendingTable::default()));
        let pending_clone = pending.clone();

        tokio::spawn(async move {
            while let Some(message) = replies_rx.recv().await {
                match message {
                    Message::Response(resp) => {
                        let mut pending = pending_clone.lock().await;
                        if let Some(tx) = pending.waiters.remove(&resp.id) {
                            let _ = tx.send(Ok(resp));
                        } else {
                            debug!("Dropping response for unknown request id {}", resp.id);
                        }
                    }
                    Message::Request(Request { id: Some(id), method, .. }) => {
                        warn!("Ignoring platform request '{}' (id {})", method, id);
                    }
                    other => {
                        let Some(notification) = other.into_notification() else {
                            continue;
                        };
                        if events_tx.send(notification).await.is_err() {
                            debug!("Event receiver dropped; discarding platform events");
                        }
                    }
                }
            }

            let mut pending = pending_clone.lock().await;
            pending.closed = true;
            for (_, tx) in pending.waiters.drain() {
                let _ = tx.send(Err(TransportError::NotConnected));
            }
        });

        let transport = Self {
            outgoing: outgoing_tx,
            pending,
            next_id: AtomicU64::new(1),
            timeout,
        };
        let peer = ChannelPeer {
            requests: outgoing_rx,
            replies: replies_tx,
        };
        (transport, peer, events_rx)
    }

    async fn forget(&self, id: &RequestId) {
        self.pending.lock().await.waiters.remove(id);
    }
}

impl Transport for ChannelTransport {
    async fn invoke(&self, method: &str, params: Value) -> Result<Value> {
        let id = RequestId::Number(self.next_id.fetch_add(1, Ordering::SeqCst));
        let request = Request::new(method, Some(params), id.clone());

        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            if pending.closed {
                return Err(TransportError::NotConnected);
            }
            pending.waiters.insert(id.clone(), tx);
        }

        if self.outgoing.send(Message::Request(request)).await.is_err() {
            self.forget(&id).await;
            return Err(TransportError::NotConnected);
        }

        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => response?,
            Ok(Err(_)) => return Err(TransportError::NotConnected),
            Err(_) => {
                self.forget(&id).await;
                return Err(TransportError::Timeout);
            }
        };

        if let Some(error) = response.error {
            return Err(error.into());
        }

        Ok(response.result.unwrap_or(Value::Null))
    }
}
