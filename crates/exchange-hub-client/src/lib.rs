//! `exchange-hub-client` is an asynchronous Rust client for the Produce
//! Exchange Hub marketplace API.
//!
//! The client keeps a persisted session (bearer token plus a user-info
//! projection decoded from the token claims at login), checks token expiry
//! lazily on every read, and decorates outgoing REST calls with a locale
//! path prefix and an `Authorization: Bearer` header when a valid session
//! exists.
//!
//! ```no_run
//! # async fn example() -> Result<(), exchange_hub_client::Error> {
//! use exchange_hub_common::model::SortOrder;
//!
//! let client = exchange_hub_client::Client::builder()
//!     .with_base_url("https://api.example.com")
//!     .build()?;
//!
//! client.auth().login("ada@x.com", "secret").await?;
//! let companies = client
//!     .companies()
//!     .list(0, 10, SortOrder::Descending, "created_date")
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

pub use builder::ClientBuilder;
pub use error::Error;

/// Typed marketplace services.
pub mod api;

mod builder;

/// Culture selection.
pub mod culture;

mod error;

/// The authenticated REST pipeline.
pub mod rest;

/// Session orchestration.
pub mod session;

/// Client-side session storage.
pub mod storage;

/// Token utilities.
pub mod token;

use api::{AdminService, CompanyService, UserService};
use culture::CultureService;
use session::AuthenticationManager;
use storage::SessionStore;

/// The marketplace client handle. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    state: Arc<ClientState>,
}

struct ClientState {
    auth: AuthenticationManager,
    culture: CultureService,
    companies: CompanyService,
    users: UserService,
    admin: AdminService,
    store: SessionStore,
}

impl Client {
    /// Construct a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The session manager.
    pub fn auth(&self) -> &AuthenticationManager {
        &self.state.auth
    }

    /// The culture service.
    pub fn culture(&self) -> &CultureService {
        &self.state.culture
    }

    /// The company service.
    pub fn companies(&self) -> &CompanyService {
        &self.state.companies
    }

    /// The user service.
    pub fn users(&self) -> &UserService {
        &self.state.users
    }

    /// The user administration service.
    pub fn admin(&self) -> &AdminService {
        &self.state.admin
    }

    /// Direct access to the typed session store.
    pub fn store(&self) -> &SessionStore {
        &self.state.store
    }
}
