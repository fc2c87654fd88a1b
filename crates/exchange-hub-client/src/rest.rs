//! The authenticated REST pipeline.
//!
//! Every request goes through the same decoration steps: an optional
//! locale path prefix, a bearer token when a valid session exists, and a
//! uniform mapping of the response into a typed value or a structured
//! error. No request is ever retried.

use exchange_hub_common::model::ErrorModel;
use http::{
    header::{HeaderName, AUTHORIZATION},
    HeaderValue, StatusCode,
};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

use crate::{culture::CultureService, error, token::AccessTokenProvider, Error};

/// HTTP client decorating requests with a locale prefix and bearer token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_provider: AccessTokenProvider,
    culture: CultureService,
    localized: bool,
    attach_token: bool,
}

impl ApiClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token_provider: AccessTokenProvider,
        culture: CultureService,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http,
            base_url,
            token_provider,
            culture,
            localized: true,
            attach_token: true,
        }
    }

    /// The same client with locale prefixing and bearer attachment turned
    /// off.
    ///
    /// The token endpoint is not localized, and an existing session token
    /// is never sent along with a credentials grant.
    pub(crate) fn for_token_endpoint(&self) -> Self {
        Self {
            localized: false,
            attach_token: false,
            ..self.clone()
        }
    }

    /// `GET` the given path, decoding a JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &[(HeaderName, HeaderValue)],
    ) -> Result<T, Error> {
        let request = self.request(Method::GET, path, headers).await?;
        self.execute_json(request).await
    }

    /// `POST` a JSON body to the given path, decoding a JSON response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: &[(HeaderName, HeaderValue)],
    ) -> Result<T, Error> {
        let request = self.request(Method::POST, path, headers).await?;
        self.execute_json(request.json(body)).await
    }

    /// `POST` a form-encoded body to the given path, decoding a JSON response.
    pub async fn post_form<F: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        form: &F,
        headers: &[(HeaderName, HeaderValue)],
    ) -> Result<T, Error> {
        let request = self.request(Method::POST, path, headers).await?;
        self.execute_json(request.form(form)).await
    }

    /// `DELETE` the given path. Succeeds on any 2xx; no body is expected.
    pub async fn delete(
        &self,
        path: &str,
        headers: &[(HeaderName, HeaderValue)],
    ) -> Result<(), Error> {
        let request = self.request(Method::DELETE, path, headers).await?;
        self.execute_empty(request).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(HeaderName, HeaderValue)],
    ) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.resolve_url(path).await?;

        let mut request = self.http.request(method, &url);
        for (name, value) in headers {
            request = request.header(name.clone(), value.clone());
        }
        if self.attach_token {
            if let Some(token) = self.token_provider.get_access_token().await? {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        Ok(request)
    }

    /// Resolve a path against the base URL, inserting the upper-cased
    /// language code as the first segment for localized clients.
    async fn resolve_url(&self, path: &str) -> Result<String, Error> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }

        let path = path.trim_start_matches('/');
        if self.localized {
            let code = self.culture.language_code().await?.to_uppercase();
            Ok(format!("{}/{}/{}", self.base_url, code, path))
        } else {
            Ok(format!("{}/{}", self.base_url, path))
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let response = request.send().await.map_err(error::network)?;
        let url = response.url().to_string();
        let status = response.status();
        let body = response.text().await.map_err(error::network)?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|_| Error::InvalidBody { url, status, body })
        } else {
            Err(rejection(url, status, body))
        }
    }

    async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), Error> {
        let response = request.send().await.map_err(error::network)?;
        let url = response.url().to_string();
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.map_err(error::network)?;
        Err(rejection(url, status, body))
    }
}

/// Map a non-success response to an error, preferring the structured
/// backend error body when it parses.
fn rejection(url: String, status: StatusCode, body: String) -> Error {
    match serde_json::from_str::<ErrorModel>(&body) {
        Ok(error_model) => Error::Rejected {
            url,
            status,
            detail: error_model.detail,
        },
        Err(err) => {
            tracing::error!(%url, %status, %err, "error response body not parseable");
            Error::InvalidBody { url, status, body }
        }
    }
}
