//! The `Discovery` API surface.
//!
//! Every operation serializes its typed parameters into a JSON object, invokes
//! `discovery.<name>` through the injected [`Transport`] and decodes the result.
//! Subscriptions register typed callbacks against the platform's wire events.

use std::future::Future;
use std::sync::{Arc, Weak};

use discovery_rpc::{ChannelPeer, ChannelTransport, Notification, Transport};
use discovery_types::{
    ContentAccessIdentifiers, ContentIdentifiers, DiscoveryPolicy, Entitlement, EntityDetails,
    EntityInfoParameters, EntityInfoResult, FederatedRequest, Images, InterestReason,
    InterestType, NavigationIntent, NavigationIntentVariant, PurchasedContentParameters,
    PurchasedContentResult, UserInterestRequest,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::SdkConfig;
use crate::events::{EventRegistry, Subscription};
use crate::provider::{DiscoveryProvider, UserInterestSession};
use crate::Result;

pub const ON_NAVIGATE_TO: &str = "discovery.onNavigateTo";
pub const ON_POLICY_CHANGED: &str = "discovery.onPolicyChanged";
pub const ON_PULL_ENTITY_INFO: &str = "discovery.onPullEntityInfo";
pub const ON_PULL_PURCHASED_CONTENT: &str = "discovery.onPullPurchasedContent";
pub const ON_REQUEST_USER_INTEREST: &str = "discovery.onRequestUserInterest";

const ENTITY_INFO: &str = "discovery.entityInfo";
const PURCHASED_CONTENT: &str = "discovery.purchasedContent";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentAccessParams<'a> {
    ids: &'a ContentAccessIdentifiers,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntitlementsParams<'a> {
    entitlements: &'a [Entitlement],
}

/// Push of a pull result; an empty correlation id marks an unsolicited push
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PushParams<'a, R> {
    correlation_id: &'a str,
    result: &'a R,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LaunchParams<'a> {
    app_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<&'a NavigationIntent>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInParams<'a> {
    entitlements: &'a [Entitlement],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInterestParams<'a> {
    #[serde(rename = "type")]
    interest_type: InterestType,
    reason: InterestReason,
    entity: &'a EntityDetails,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchNextParams<'a> {
    title: &'a str,
    identifiers: &'a ContentIdentifiers,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a Images>,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

/// Run `task` on the current tokio runtime, if there is one.
pub(crate) fn spawn_background<F>(label: &str, task: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(task);
        }
        Err(_) => warn!("No tokio runtime available, skipping {}", label),
    }
}

pub(crate) struct Inner<T> {
    pub(crate) transport: T,
    registry: EventRegistry,
    config: SdkConfig,
}

impl<T: Transport> Inner<T> {
    /// Invoke `method` on a background task and log the outcome.
    pub(crate) fn fire_and_log(self: &Arc<Self>, method: &'static str, params: Value) {
        let inner = Arc::clone(self);
        spawn_background(method, async move {
            match inner.transport.invoke(method, params).await {
                Ok(status) => info!("{} pushed with status {}", method, status),
                Err(e) => warn!("{} failed: {}", method, e),
            }
        });
    }

    fn push_pull_result<R: Serialize>(
        self: &Arc<Self>,
        method: &'static str,
        correlation_id: &str,
        result: &R,
    ) {
        match serde_json::to_value(PushParams {
            correlation_id,
            result,
        }) {
            Ok(params) => self.fire_and_log(method, params),
            Err(e) => error!("Failed to serialize {} result: {}", method, e),
        }
    }
}

/// Client for the Discovery capability.
///
/// Cheap to clone; clones share the transport and the listener registry.
pub struct Discovery<T: Transport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for Discovery<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for Discovery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery")
            .field("registry", &self.inner.registry)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Discovery<ChannelTransport> {
    /// Build a client over an in-process channel and start its event loop.
    ///
    /// The returned peer is the platform side of the connection.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn over_channel(config: SdkConfig) -> (Self, ChannelPeer) {
        let (transport, peer, events) =
            ChannelTransport::pair(config.request_timeout(), config.event_buffer);
        let discovery = Self::with_config(transport, config);
        discovery.spawn_event_loop(events);
        (discovery, peer)
    }
}

impl<T: Transport> Discovery<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SdkConfig::default())
    }

    #[must_use]
    pub fn with_config(transport: T, config: SdkConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                registry: EventRegistry::new(),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SdkConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn registry(&self) -> &EventRegistry {
        &self.inner.registry
    }

    async fn invoke(&self, method: &'static str, params: Value) -> Result<Value> {
        match self.inner.transport.invoke(method, params).await {
            Ok(value) => {
                info!("{} invoked successfully", method);
                Ok(value)
            }
            Err(e) => {
                error!("{} failed: {}", method, e);
                Err(e.into())
            }
        }
    }

    async fn call<P, R>(&self, method: &'static str, params: &P) -> Result<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        let value = self.invoke(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    // Methods

    /// Clear both availabilities and entitlements.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn clear_content_access(&self) -> Result<()> {
        self.invoke("discovery.clearContentAccess", empty_params())
            .await?;
        Ok(())
    }

    /// Report which content the user can discover and consume.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn content_access(&self, ids: &ContentAccessIdentifiers) -> Result<()> {
        let params = serde_json::to_value(ContentAccessParams { ids })?;
        self.invoke("discovery.contentAccess", params).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn entitlements(&self, entitlements: &[Entitlement]) -> Result<bool> {
        self.call("discovery.entitlements", &EntitlementsParams { entitlements })
            .await
    }

    /// Push entity info without a pull request.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn entity_info(&self, result: &EntityInfoResult) -> Result<bool> {
        self.call(
            ENTITY_INFO,
            &PushParams {
                correlation_id: "",
                result,
            },
        )
        .await
    }

    /// Launch or foreground `app_id`, optionally navigating with `intent`.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn launch(&self, app_id: &str, intent: Option<NavigationIntent>) -> Result<bool> {
        self.call(
            "discovery.launch",
            &LaunchParams {
                app_id,
                intent: intent.as_ref(),
            },
        )
        .await
    }

    /// [`launch`](Self::launch) with any concrete intent type.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn launch_with<I>(&self, app_id: &str, intent: I) -> Result<bool>
    where
        I: Into<NavigationIntent>,
    {
        self.launch(app_id, Some(intent.into())).await
    }

    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn policy(&self) -> Result<DiscoveryPolicy> {
        self.call("discovery.policy", &Map::new()).await
    }

    /// Push purchased content without a pull request.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn purchased_content(&self, result: &PurchasedContentResult) -> Result<bool> {
        self.call(
            PURCHASED_CONTENT,
            &PushParams {
                correlation_id: "",
                result,
            },
        )
        .await
    }

    /// Tell the platform the user is signed in.
    ///
    /// `None` sends an empty `entitlements` list. On success `metrics.signIn`
    /// is fired in the background.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn sign_in(&self, entitlements: Option<&[Entitlement]>) -> Result<bool> {
        let signed_in = self
            .call(
                "discovery.signIn",
                &SignInParams {
                    entitlements: entitlements.unwrap_or_default(),
                },
            )
            .await?;
        self.inner.fire_and_log("metrics.signIn", empty_params());
        Ok(signed_in)
    }

    /// Tell the platform the user signed out.
    ///
    /// On success `metrics.signOut` is fired in the background.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn sign_out(&self) -> Result<bool> {
        let signed_out = self.call("discovery.signOut", &Map::new()).await?;
        self.inner.fire_and_log("metrics.signOut", empty_params());
        Ok(signed_out)
    }

    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn user_interest(
        &self,
        interest_type: InterestType,
        reason: InterestReason,
        entity: &EntityDetails,
    ) -> Result<()> {
        let params = serde_json::to_value(UserInterestParams {
            interest_type,
            reason,
            entity,
        })?;
        self.invoke("discovery.userInterest", params).await?;
        Ok(())
    }

    /// Suggest content for the platform's "Watch Next" row.
    ///
    /// # Errors
    ///
    /// Returns the platform's error status, or `NotConnected`/`Timedout`.
    pub async fn watch_next(
        &self,
        title: &str,
        identifiers: &ContentIdentifiers,
        expires: Option<&str>,
        images: Option<&Images>,
    ) -> Result<bool> {
        self.call(
            "discovery.watchNext",
            &WatchNextParams {
                title,
                identifiers,
                expires,
                images,
            },
        )
        .await
    }

    // Events

    async fn listen<P, D, F>(
        &self,
        event: &'static str,
        decode: D,
        callback: F,
    ) -> Result<Subscription>
    where
        P: 'static,
        D: Fn(&Value) -> Option<P> + Send + Sync + 'static,
        F: Fn(P) + Send + Sync + 'static,
    {
        let gate = self.inner.registry.listen_gate(event);
        let mut listening = gate.lock().await;

        if !*listening && self.inner.config.listen_on_subscribe {
            if let Err(e) = self.inner.transport.invoke(event, json!({"listen": true})).await {
                error!("Failed to listen to {}: {}", event, e);
                return Err(e.into());
            }
            *listening = true;
            debug!("Listening to {}", event);
        }

        let (id, _) = self.inner.registry.subscribe_with(event, decode, callback);
        Ok(Subscription::new(event, id))
    }

    /// Listen for navigation intents of type `I`.
    ///
    /// All intent types share `discovery.onNavigateTo`; the callback only sees
    /// events whose `action` matches `I`.
    ///
    /// # Errors
    ///
    /// Fails if the platform rejects the listen request.
    pub async fn on_navigate_to<I, F>(&self, callback: F) -> Result<Subscription>
    where
        I: NavigationIntentVariant + 'static,
        F: Fn(I) + Send + Sync + 'static,
    {
        self.listen(ON_NAVIGATE_TO, decode_intent::<I>, callback)
            .await
    }

    /// # Errors
    ///
    /// Fails if the platform rejects the listen request.
    pub async fn on_policy_changed<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(DiscoveryPolicy) + Send + Sync + 'static,
    {
        self.listen(ON_POLICY_CHANGED, decode::<DiscoveryPolicy>, callback)
            .await
    }

    /// Answer the platform's entity info pulls.
    ///
    /// The callback's result is pushed back to `discovery.entityInfo` under the
    /// request's correlation id.
    ///
    /// # Errors
    ///
    /// Fails if the platform rejects the listen request.
    pub async fn on_pull_entity_info<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(EntityInfoParameters) -> EntityInfoResult + Send + Sync + 'static,
    {
        let inner = Arc::downgrade(&self.inner);
        self.listen(
            ON_PULL_ENTITY_INFO,
            decode::<FederatedRequest<EntityInfoParameters>>,
            move |request: FederatedRequest<EntityInfoParameters>| {
                let result = callback(request.parameters);
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.push_pull_result(ENTITY_INFO, &request.correlation_id, &result);
                }
            },
        )
        .await
    }

    /// Answer the platform's purchased content pulls.
    ///
    /// The callback's result is pushed back to `discovery.purchasedContent` under
    /// the request's correlation id.
    ///
    /// # Errors
    ///
    /// Fails if the platform rejects the listen request.
    pub async fn on_pull_purchased_content<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(PurchasedContentParameters) -> PurchasedContentResult + Send + Sync + 'static,
    {
        let inner = Arc::downgrade(&self.inner);
        self.listen(
            ON_PULL_PURCHASED_CONTENT,
            decode::<FederatedRequest<PurchasedContentParameters>>,
            move |request: FederatedRequest<PurchasedContentParameters>| {
                let result = callback(request.parameters);
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.push_pull_result(PURCHASED_CONTENT, &request.correlation_id, &result);
                }
            },
        )
        .await
    }

    /// Register `provider` to answer user interest requests.
    ///
    /// # Errors
    ///
    /// Fails if the platform rejects the listen request.
    pub async fn provide<P: DiscoveryProvider>(&self, provider: P) -> Result<Subscription> {
        let inner = Arc::downgrade(&self.inner);
        self.listen(
            ON_REQUEST_USER_INTEREST,
            decode::<UserInterestRequest>,
            move |request: UserInterestRequest| {
                let Some(inner) = Weak::upgrade(&inner) else {
                    return;
                };
                let session = UserInterestSession::new(request.correlation_id, inner);
                provider.user_interest(request.parameters, session);
            },
        )
        .await
    }

    /// Remove a listener. Returns false if it was already gone.
    ///
    /// Removing the last listener on an event sends `{"listen": false}`.
    /// Listen and unlisten round trips on one event never overlap.
    ///
    /// # Errors
    ///
    /// Fails if the platform rejects the unlisten request. The listener is
    /// removed regardless.
    pub async fn unsubscribe(&self, subscription: Subscription) -> Result<bool> {
        let event = subscription.event();
        let gate = self.inner.registry.listen_gate(event);
        let mut listening = gate.lock().await;

        let Some(remaining) = self.inner.registry.remove(event, subscription.id()) else {
            return Ok(false);
        };

        if remaining == 0 && *listening {
            *listening = false;
            self.inner
                .transport
                .invoke(event, json!({"listen": false}))
                .await?;
            debug!("Stopped listening to {}", event);
        }
        Ok(true)
    }

    // Event ingress

    /// Dispatch one platform event to its listeners.
    ///
    /// Returns the number of listeners invoked.
    pub fn handle_notification(&self, notification: &Notification) -> usize {
        dispatch(&self.inner.registry, notification)
    }

    /// Drain `events` on a background task, dispatching each one.
    ///
    /// The task ends when the sender side closes or every `Discovery` clone
    /// has been dropped.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_event_loop(&self, mut events: mpsc::Receiver<Notification>) -> JoinHandle<()> {
        let inner = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while let Some(notification) = events.recv().await {
                let Some(inner) = Weak::upgrade(&inner) else {
                    break;
                };
                dispatch(&inner.registry, &notification);
            }
            debug!("Event loop finished");
        })
    }
}

fn dispatch(registry: &EventRegistry, notification: &Notification) -> usize {
    let payload = notification.params.clone().unwrap_or(Value::Null);
    registry.dispatch(&notification.method, &payload)
}

fn decode<P: DeserializeOwned>(payload: &Value) -> Option<P> {
    match serde_json::from_value(payload.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Event payload did not decode: {}", e);
            None
        }
    }
}

fn decode_intent<I: NavigationIntentVariant>(payload: &Value) -> Option<I> {
    decode::<NavigationIntent>(payload).and_then(I::from_intent)
}
