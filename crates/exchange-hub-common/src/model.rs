//! Data transfer shapes for the marketplace REST API.
//!
//! Shapes only; the client imposes no business rules on these records.

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on a non-2xx response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorModel {
    /// Machine-readable error detail, e.g. `invalid_grant`.
    pub detail: String,
}

/// One company row in the public listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    /// Company id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Lifecycle status as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Company type labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_types: Vec<String>,

    /// Languages the company publishes content in, ISO codes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_languages_iso: Vec<String>,

    /// Free-text description, localized by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full company record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Company id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Company type labels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_types: Vec<String>,

    /// Registered addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,

    /// Contact channels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
}

/// A postal address attached to a company.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Addressee line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressee: Option<String>,

    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,

    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Zip code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    /// ISO country code, e.g. `SE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// A contact channel attached to a company.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Channel type, e.g. `email` or `phone`.
    #[serde(rename = "type")]
    pub contact_type: String,

    /// Channel value.
    pub value: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sort direction for paged listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Ascending,
    /// Descending.
    Descending,
}

impl SortOrder {
    /// The value the backend expects in the `sort_order` query parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Envelope wrapping list responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListResponse<T> {
    /// The listed records.
    pub items: Vec<T>,
}

/// Full user record, visible to administrators.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User id.
    pub id: String,

    /// E-mail address.
    pub email: String,

    /// First name.
    pub firstname: String,

    /// Last name.
    pub lastname: String,

    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// ISO country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_iso: Option<String>,

    /// IANA timezone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Preferred language, ISO code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_iso: Option<String>,

    /// Whether the account is verified.
    #[serde(default)]
    pub verified: bool,

    /// Role bindings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<UserRole>,

    /// Profile picture URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
}

/// A role binding on a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRole {
    /// Binding id.
    pub id: String,

    /// Role id.
    pub role_id: String,

    /// Role name.
    pub role_name: String,

    /// Role type label.
    pub role_type: String,

    /// Optional reference to the entity the role is scoped to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Registration request for a new marketplace user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterUser {
    /// E-mail address, doubles as the login name.
    pub email: String,

    /// Password.
    pub password: String,

    /// First name.
    pub firstname: String,

    /// Last name.
    pub lastname: String,

    /// ISO country code.
    pub country_iso: String,

    /// Preferred language, ISO code.
    pub language_iso: String,
}

/// Backend acknowledgement of a registration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    /// Registered e-mail address.
    pub email: String,
}
