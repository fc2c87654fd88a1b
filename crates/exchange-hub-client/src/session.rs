//! Session orchestration: login, logout, and login-state subscriptions.
//!
//! The session moves between two states. Anonymous becomes Authenticated
//! through a successful login; Authenticated becomes Anonymous through
//! logout or when the token provider detects expiry during a read. There
//! is no refresh, so no intermediate state exists.

use std::sync::{Arc, Mutex, PoisonError};

use exchange_hub_common::access_token::{OAuthTokens, UserInformation};
use http::{header::ACCEPT, HeaderValue};
use serde::Serialize;

use crate::{
    rest::ApiClient,
    storage::{SessionStore, StorageKey},
    token::{decode_claims, AccessTokenProvider},
    Error,
};

/// Outcome of a login attempt that reached the token endpoint.
///
/// Rejected credentials and transport failures do not produce a variant;
/// they propagate as [Error] values from [AuthenticationManager::login].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoginResult {
    /// Credentials accepted; the session is now authenticated.
    Success,
}

/// Event delivered to subscribers after a successful login.
#[derive(Clone, Copy, Debug)]
pub struct AuthenticationEvent {
    /// The login outcome that triggered the event.
    pub result: LoginResult,
}

type Callback = Arc<dyn Fn(&AuthenticationEvent) + Send + Sync>;

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Handle keeping a login-event subscription alive.
///
/// Dropping the handle (or calling [Subscription::unsubscribe]) detaches
/// the callback, so a component can register on mount and detach on
/// teardown without leaking.
#[must_use = "dropping the subscription detaches the callback"]
pub struct Subscription {
    id: u64,
    subscribers: Arc<Mutex<SubscriberList>>,
}

impl Subscription {
    /// Detach the callback now.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut list = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        list.entries.retain(|(id, _)| *id != self.id);
    }
}

/// Token endpoint configuration for the password grant.
#[derive(Clone, Debug)]
pub struct OAuth2Options {
    /// Path or absolute URL of the token endpoint.
    pub token_endpoint: String,

    /// Grant type sent in the form body.
    pub grant_type: String,

    /// Space-separated scopes requested with the grant.
    pub scopes: String,
}

impl Default for OAuth2Options {
    fn default() -> Self {
        Self {
            token_endpoint: "oauth2/token".into(),
            grant_type: "password".into(),
            scopes: "openid profile".into(),
        }
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    grant_type: &'a str,
    username: &'a str,
    password: &'a str,
    scope: &'a str,
}

/// Orchestrates login and logout, and exposes authentication status.
#[derive(Clone)]
pub struct AuthenticationManager {
    api: ApiClient,
    store: SessionStore,
    token_provider: AccessTokenProvider,
    options: OAuth2Options,
    subscribers: Arc<Mutex<SubscriberList>>,
}

impl AuthenticationManager {
    /// `api` must neither insert the locale prefix nor attach a bearer
    /// token; the token endpoint is not localized and a credentials grant
    /// never carries an existing session.
    pub(crate) fn new(
        api: ApiClient,
        store: SessionStore,
        token_provider: AccessTokenProvider,
        options: OAuth2Options,
    ) -> Self {
        Self {
            api,
            store,
            token_provider,
            options,
            subscribers: Arc::default(),
        }
    }

    /// Authenticate with the OAuth2 password grant.
    ///
    /// On success the token response and the projected user info are
    /// persisted, and every subscriber is notified in registration order.
    /// A failure from the pipeline (rejected credentials, network)
    /// propagates unchanged, is not retried, and leaves the session
    /// anonymous.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, Error> {
        let grant = PasswordGrant {
            grant_type: &self.options.grant_type,
            username,
            password,
            scope: &self.options.scopes,
        };

        let tokens: OAuthTokens = self
            .api
            .post_form(
                &self.options.token_endpoint,
                &grant,
                &[(ACCEPT, HeaderValue::from_static("application/json"))],
            )
            .await?;

        let claims = decode_claims(&tokens.access_token)?;
        let user = UserInformation::from(&claims);

        self.store.save(StorageKey::OAuthTokens, &tokens)?;
        self.store.save(StorageKey::UserInformation, &user)?;

        tracing::debug!(user = user.email.as_deref(), "login succeeded");

        let result = LoginResult::Success;
        self.notify(&AuthenticationEvent { result });
        Ok(result)
    }

    /// Drop the stored session.
    ///
    /// No server-side call is made and no event is emitted.
    pub async fn logout(&self) -> Result<(), Error> {
        tracing::debug!("logging out");
        self.store
            .remove(&[StorageKey::OAuthTokens, StorageKey::UserInformation])
    }

    /// Whether a currently valid session token exists.
    pub async fn is_authenticated(&self) -> Result<bool, Error> {
        self.token_provider.is_authenticated().await
    }

    /// The stored user-info projection, if logged in.
    ///
    /// The token slot is authoritative: without a valid token the
    /// projection is not returned even when still stored.
    pub async fn current_user(&self) -> Result<Option<UserInformation>, Error> {
        if self.token_provider.get_access_token().await?.is_none() {
            return Ok(None);
        }
        self.store.get(StorageKey::UserInformation)
    }

    /// Register `callback` to run after every successful login, in
    /// registration order.
    ///
    /// The callback stays attached until the returned [Subscription] is
    /// dropped or unsubscribed. Callbacks run outside the subscriber-list
    /// lock, so they may subscribe or detach other subscriptions; a
    /// detachment during notification takes effect from the next event.
    pub fn subscribe(
        &self,
        callback: impl Fn(&AuthenticationEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let mut list = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Arc::new(callback)));

        Subscription {
            id,
            subscribers: self.subscribers.clone(),
        }
    }

    fn notify(&self, event: &AuthenticationEvent) {
        // Snapshot the callbacks so none runs under the list lock; a
        // callback may then subscribe or detach without deadlocking.
        let callbacks: Vec<Callback> = {
            let list = self
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            list.entries
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect()
        };
        for callback in callbacks {
            callback(event);
        }
    }
}
