use std::sync::Arc;

use crate::{
    api::{AdminService, CompanyService, UserService},
    culture::CultureService,
    error,
    rest::ApiClient,
    session::{AuthenticationManager, OAuth2Options},
    storage::{FileStorage, MemoryStorage, SessionStore, StorageBackend},
    token::AccessTokenProvider,
    Client, ClientState, Error,
};

/// A builder for configuring a [Client].
///
/// Building performs no network activity.
pub struct ClientBuilder {
    base_url: Option<String>,
    oauth: OAuth2Options,
    storage: Option<Arc<dyn StorageBackend>>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            base_url: None,
            oauth: OAuth2Options::default(),
            storage: None,
        }
    }

    /// Set the base URL of the marketplace API.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the token endpoint (path or absolute URL).
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.oauth.token_endpoint = endpoint.into();
        self
    }

    /// Override the scopes requested with the password grant.
    pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
        self.oauth.scopes = scopes.into();
        self
    }

    /// Replace the whole token endpoint configuration.
    pub fn with_oauth_options(mut self, options: OAuth2Options) -> Self {
        self.oauth = options;
        self
    }

    /// Use the given storage backend for session state.
    ///
    /// Defaults to in-memory storage, which does not survive restarts.
    pub fn with_storage(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(backend);
        self
    }

    /// Use file-backed session storage rooted at `dir`.
    pub fn with_storage_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Result<Self, Error> {
        self.storage = Some(Arc::new(FileStorage::new(dir)?));
        Ok(self)
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, Error> {
        let base_url = self.base_url.ok_or(Error::Config("base URL not set"))?;
        let backend = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::default()));

        let store = SessionStore::new(backend);
        let token_provider = AccessTokenProvider::new(store.clone());
        let culture = CultureService::new(store.clone());

        let http = reqwest::Client::builder().build().map_err(error::network)?;
        let api = ApiClient::new(http, base_url, token_provider.clone(), culture.clone());

        let auth = AuthenticationManager::new(
            api.for_token_endpoint(),
            store.clone(),
            token_provider,
            self.oauth,
        );
        let companies = CompanyService::new(api.clone());
        let users = UserService::new(api.clone());
        let admin = AdminService::new(api);

        Ok(Client {
            state: Arc::new(ClientState {
                auth,
                culture,
                companies,
                users,
                admin,
                store,
            }),
        })
    }
}
