use std::sync::{Arc, Mutex};

use axum::{
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use exchange_hub_client::{
    storage::{MemoryStorage, SessionStore, StorageKey},
    Client, Error,
};
use exchange_hub_common::{
    access_token::OAuthTokens,
    culture::Culture,
    model::{CompanySummary, RegisterUser, RegisteredUser, SortOrder},
};
use serde_json::json;

use crate::support::{ada_claims, client_with_storage, make_token, serve};

fn companies_app(captured_auth: Arc<Mutex<Vec<Option<String>>>>) -> Router {
    let listing = get(move |headers: HeaderMap| {
        let captured_auth = captured_auth.clone();
        async move {
            captured_auth.lock().unwrap().push(
                headers
                    .get("authorization")
                    .map(|v| v.to_str().unwrap().to_string()),
            );
            Json(json!({ "items": [{ "id": "c1", "name": "Gröna Gårdar" }] }))
        }
    });
    Router::new()
        .route("/SV/companies/", listing.clone())
        .route("/EN/companies/", listing)
}

async fn list_companies(client: &Client) -> Result<Vec<CompanySummary>, Error> {
    client
        .companies()
        .list(0, 10, SortOrder::Descending, "created_date")
        .await
}

#[tokio::test]
async fn paths_are_prefixed_with_the_uppercased_language_code() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(companies_app(captured)).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    // default culture is sv-SE, so the request goes to /SV/companies/
    let companies = list_companies(&client).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id, "c1");

    client.culture().set(Culture::EnGb).await.unwrap();
    let companies = list_companies(&client).await.unwrap();
    assert_eq!(companies[0].name, "Gröna Gårdar");
}

#[tokio::test]
async fn company_listing_sends_paging_and_sorting_parameters() {
    use std::collections::HashMap;

    use axum::extract::Query;

    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = {
        let captured = captured.clone();
        Router::new().route(
            "/SV/companies/",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(params);
                    Json(json!({ "items": [] }))
                }
            }),
        )
    };
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let companies = client
        .companies()
        .list(20, 5, SortOrder::Ascending, "name")
        .await
        .unwrap();
    assert!(companies.is_empty());

    let seen = captured.lock().unwrap();
    assert_eq!(seen[0]["skip"], "20");
    assert_eq!(seen[0]["take"], "5");
    assert_eq!(seen[0]["sort_order"], "asc");
    assert_eq!(seen[0]["sort_by"], "name");
}

#[tokio::test]
async fn company_addresses_are_fetched_from_the_nested_resource() {
    let app = Router::new().route(
        "/SV/companies/{id}/addresses/",
        get(|| async {
            Json(json!([{
                "addressee": "Gröna Gårdar AB",
                "city": "Göteborg",
                "country_code": "SE",
            }]))
        }),
    );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let addresses = client.companies().addresses("c1").await.unwrap();

    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].city.as_deref(), Some("Göteborg"));
    assert!(addresses[0].street_address.is_none());
}

#[tokio::test]
async fn bearer_header_is_attached_iff_a_valid_token_exists() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(companies_app(captured.clone())).await;

    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    // anonymous: no Authorization header
    list_companies(&client).await.unwrap();

    // seed a valid session token directly into storage
    let token = make_token(&ada_claims(60));
    client
        .store()
        .save(
            StorageKey::OAuthTokens,
            &OAuthTokens {
                access_token: token.clone(),
            },
        )
        .unwrap();

    list_companies(&client).await.unwrap();

    let seen = captured.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], None);
    assert_eq!(seen[1].as_deref(), Some(format!("Bearer {token}").as_str()));
}

#[tokio::test]
async fn expired_token_sends_no_bearer_header() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let base_url = serve(companies_app(captured.clone())).await;

    let backend = Arc::new(MemoryStorage::default());
    SessionStore::new(backend.clone())
        .save(
            StorageKey::OAuthTokens,
            &OAuthTokens {
                access_token: make_token(&ada_claims(-10)),
            },
        )
        .unwrap();

    let client = client_with_storage(&base_url, backend);
    list_companies(&client).await.unwrap();

    assert_eq!(captured.lock().unwrap()[0], None);
}

#[tokio::test]
async fn structured_error_body_surfaces_as_rejected() {
    let app = Router::new().route(
        "/SV/companies/{id}/",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "company_not_found" })),
            )
        }),
    );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let err = client.companies().get("missing").await.unwrap_err();

    match err {
        Error::Rejected {
            url,
            status,
            detail,
        } => {
            assert!(url.ends_with("/SV/companies/missing/"));
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(detail, "company_not_found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unparsable_error_body_surfaces_as_invalid_body_with_raw_text() {
    let app = Router::new().route(
        "/SV/companies/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let err = list_companies(&client).await.unwrap_err();

    match err {
        Error::InvalidBody { status, body, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unparsable_success_body_surfaces_as_invalid_body() {
    let app = Router::new().route("/SV/companies/", get(|| async { "null" }));
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let err = list_companies(&client).await.unwrap_err();

    assert!(matches!(err, Error::InvalidBody { .. }));
}

#[tokio::test]
async fn admin_user_listing_unwraps_the_items_envelope() {
    let app = Router::new().route(
        "/SV/users/",
        get(|| async {
            Json(json!({
                "items": [{
                    "id": "u1",
                    "email": "a@x.com",
                    "firstname": "Ada",
                    "lastname": "Lovelace",
                    "verified": true,
                }]
            }))
        }),
    );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let users = client.admin().list_users().await.unwrap();

    assert_eq!(users.items.len(), 1);
    assert_eq!(users.items[0].firstname, "Ada");
    assert!(users.items[0].roles.is_empty());
}

#[tokio::test]
async fn delete_succeeds_on_no_content_and_maps_rejections() {
    use axum::routing::delete;

    let app = Router::new()
        .route("/SV/users/{id}", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/EN/users/{id}",
            delete(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "detail": "missing_role" })),
                )
            }),
        );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    client.admin().delete_user("u1").await.unwrap();

    client.culture().set(Culture::EnGb).await.unwrap();
    let err = client.admin().delete_user("u1").await.unwrap_err();
    match err {
        Error::Rejected { status, detail, .. } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(detail, "missing_role");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn register_posts_json_under_the_locale_prefix() {
    let app = Router::new().route(
        "/SV/users/register",
        post(|Json(user): Json<RegisterUser>| async move {
            Json(RegisteredUser { email: user.email })
        }),
    );
    let base_url = serve(app).await;
    let client = client_with_storage(&base_url, Arc::new(MemoryStorage::default()));

    let registered = client
        .users()
        .register(&RegisterUser {
            email: "new@x.com".into(),
            password: "secret".into(),
            firstname: "New".into(),
            lastname: "User".into(),
            country_iso: "SE".into(),
            language_iso: "sv".into(),
        })
        .await
        .unwrap();

    assert_eq!(registered.email, "new@x.com");
}
