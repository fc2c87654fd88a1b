//! Typed marketplace services over the REST pipeline.

use exchange_hub_common::model::{
    Address, Company, CompanySummary, ListResponse, RegisterUser, RegisteredUser, SortOrder, User,
};

use crate::{rest::ApiClient, Error};

/// Company listing and lookup. Responses are localized.
#[derive(Clone)]
pub struct CompanyService {
    api: ApiClient,
}

impl CompanyService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch one page of the public company listing, sorted by `sort_by`
    /// (a backend field name such as `name` or `created_date`).
    pub async fn list(
        &self,
        skip: u32,
        take: u32,
        sort_order: SortOrder,
        sort_by: &str,
    ) -> Result<Vec<CompanySummary>, Error> {
        let page: ListResponse<CompanySummary> = self
            .api
            .get(
                &format!(
                    "companies/?skip={skip}&take={take}&sort_order={}&sort_by={sort_by}",
                    sort_order.query_value()
                ),
                &[],
            )
            .await?;
        Ok(page.items)
    }

    /// Fetch one company by id.
    pub async fn get(&self, id: &str) -> Result<Company, Error> {
        self.api.get(&format!("companies/{id}/"), &[]).await
    }

    /// Fetch the addresses registered on a company.
    pub async fn addresses(&self, id: &str) -> Result<Vec<Address>, Error> {
        self.api
            .get(&format!("companies/{id}/addresses/"), &[])
            .await
    }
}

/// User registration.
#[derive(Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new marketplace user.
    pub async fn register(&self, user: &RegisterUser) -> Result<RegisteredUser, Error> {
        self.api.post("users/register", user, &[]).await
    }
}

/// User administration. Requires an authenticated session with the
/// appropriate role; the backend enforces it.
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch all users.
    pub async fn list_users(&self) -> Result<ListResponse<User>, Error> {
        self.api.get("users/", &[]).await
    }

    /// Fetch one user by id.
    pub async fn get_user(&self, id: &str) -> Result<User, Error> {
        self.api.get(&format!("users/{id}"), &[]).await
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        self.api.delete(&format!("users/{id}"), &[]).await
    }
}
