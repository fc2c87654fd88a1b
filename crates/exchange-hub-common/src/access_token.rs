//! Types defining the marketplace access token.

use serde::{Deserialize, Serialize};

/// Token response from the OAuth2 password-grant endpoint.
///
/// Only the access token is consumed; the backend issues no refresh token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OAuthTokens {
    /// The bearer token, in JWT format.
    pub access_token: String,
}

/// Claims embedded in the access token payload.
///
/// All user-identifying claims are optional in the wire format; only the
/// validity window is required.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessTokenClaims {
    /// Expiration time, unix seconds.
    pub exp: i64,

    /// Not-before time, unix seconds. Absent means valid from the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Subject user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// E-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// Boolean-string ("true"/"false") account verification flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,

    /// Role names, in issue order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl AccessTokenClaims {
    /// Whether `now` (unix seconds) falls strictly inside the validity window.
    ///
    /// Both bounds are exclusive: the token is rejected at the exact `nbf`
    /// and `exp` instants, mirroring the issuing backend's contract.
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.nbf.unwrap_or(0) < now && now < self.exp
    }
}

/// Snapshot of the authenticated user, projected from token claims at login.
///
/// Non-authoritative: the projection is never refreshed until the next
/// login, so it goes stale if the claims change server-side within the
/// token's lifetime.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserInformation {
    /// User id.
    pub id: Option<String>,

    /// First name.
    pub first_name: Option<String>,

    /// Last name.
    pub last_name: Option<String>,

    /// E-mail address.
    pub email: Option<String>,

    /// Whether the account is verified.
    pub verified: bool,

    /// Role names, in claim order.
    pub roles: Vec<String>,
}

impl From<&AccessTokenClaims> for UserInformation {
    fn from(claims: &AccessTokenClaims) -> Self {
        Self {
            id: claims.id.clone(),
            first_name: claims.given_name.clone(),
            last_name: claims.family_name.clone(),
            email: claims.email.clone(),
            verified: claims
                .verified
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            roles: claims.roles.clone(),
        }
    }
}
