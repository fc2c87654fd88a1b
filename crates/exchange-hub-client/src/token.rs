//! Access token decoding and the lazily validating token provider.

use exchange_hub_common::access_token::{AccessTokenClaims, OAuthTokens};
use time::OffsetDateTime;

use crate::{
    error,
    storage::{SessionStore, StorageKey},
    Error,
};

/// Decode the claims of `token` without verifying its signature.
///
/// The backend verified the signature when issuing the token; the client
/// only needs the payload to project user info and check the validity
/// window.
pub fn decode_claims(token: &str) -> Result<AccessTokenClaims, Error> {
    let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.required_spec_claims.clear();

    let token_data = jsonwebtoken::decode::<AccessTokenClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(&[]),
        &validation,
    )
    .map_err(error::invalid_token)?;

    Ok(token_data.claims)
}

/// Provides the current bearer token, checking expiry lazily on every call.
#[derive(Clone)]
pub struct AccessTokenProvider {
    store: SessionStore,
}

impl AccessTokenProvider {
    /// Create a provider reading from `store`.
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// The current valid bearer string, if any.
    ///
    /// The stored token is decoded on every call; there is no claims cache.
    /// A token outside its validity window, or one that cannot be decoded,
    /// purges the whole stored session and yields `None` — expiry is never
    /// surfaced as an error.
    pub async fn get_access_token(&self) -> Result<Option<String>, Error> {
        let Some(tokens) = self.store.get::<OAuthTokens>(StorageKey::OAuthTokens)? else {
            return Ok(None);
        };

        let now = OffsetDateTime::now_utc().unix_timestamp();
        match decode_claims(&tokens.access_token) {
            Ok(claims) if claims.is_valid_at(now) => Ok(Some(tokens.access_token)),
            Ok(_) | Err(_) => {
                tracing::debug!("stored access token expired or undecodable, clearing session");
                self.store
                    .remove(&[StorageKey::OAuthTokens, StorageKey::UserInformation])?;
                Ok(None)
            }
        }
    }

    /// Whether a currently valid token exists.
    pub async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(self.get_access_token().await?.is_some())
    }
}
