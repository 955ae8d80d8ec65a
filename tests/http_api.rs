//! End-to-end HTTP tests: the real router served on an ephemeral port over
//! the in-process storage backend, driven with reqwest.

use contact_management::infra::config::AuthConfig;
use contact_management::storage::memory;
use contact_management::transport;
use contact_management::TokenIssuer;
use serde_json::{json, Value};
use std::sync::Arc;

fn auth_config() -> AuthConfig {
    AuthConfig {
        username: "mile".into(),
        password: "mile123".into(),
        secret: "my32byteverysecretkey12345678901".into(),
        issuer: "YourIssuer".into(),
        audience: "YourAudience".into(),
        token_ttl_secs: 3600,
    }
}

/// Boots a fresh server; returns its base URL and the token issuer used to
/// verify logins.
async fn spawn_server() -> (String, Arc<TokenIssuer>) {
    let issuer = Arc::new(TokenIssuer::new(auth_config()));
    let app_state =
        transport::http::AppState::new(memory::repositories(), issuer.clone(), None);
    let router = transport::http::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://127.0.0.1:{}", port), issuer)
}

async fn post_entity(client: &reqwest::Client, url: &str, body: Value) -> reqwest::Response {
    client.post(url).json(&body).send().await.unwrap()
}

/// Creates a company and returns its assigned id.
async fn seed_company(client: &reqwest::Client, base: &str, name: &str) -> i64 {
    let resp = post_entity(
        client,
        &format!("{}/api/v1/company", base),
        json!({ "companyName": name }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    resp.json::<Value>().await.unwrap()["companyId"].as_i64().unwrap()
}

async fn seed_country(client: &reqwest::Client, base: &str, name: &str) -> i64 {
    let resp = post_entity(
        client,
        &format!("{}/api/v1/country", base),
        json!({ "countryName": name }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    resp.json::<Value>().await.unwrap()["countryId"].as_i64().unwrap()
}

async fn seed_contact(
    client: &reqwest::Client,
    base: &str,
    name: &str,
    company_id: i64,
    country_id: i64,
) -> i64 {
    let resp = post_entity(
        client,
        &format!("{}/api/v1/contact", base),
        json!({ "contactName": name, "companyId": company_id, "countryId": country_id }),
    )
    .await;
    assert_eq!(resp.status(), 200);
    resp.json::<Value>().await.unwrap()["contactId"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let resp = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn company_crud_roundtrip() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();

    let id = seed_company(&client, &base, "Acme").await;
    assert!(id > 0);

    let resp = client
        .get(format!("{}/api/v1/company/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let company: Value = resp.json().await.unwrap();
    assert_eq!(company["companyName"], "Acme");
    assert_eq!(company["companyId"].as_i64().unwrap(), id);

    // Update through the same save endpoint.
    let resp = post_entity(
        &client,
        &format!("{}/api/v1/company", base),
        json!({ "companyId": id, "companyName": "Acme Corp" }),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let all: Value = client
        .get(format!("{}/api/v1/company", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["companyName"], "Acme Corp");

    let resp = client
        .delete(format!("{}/api/v1/company/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{}/api/v1/company/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], format!("Company with ID {} not found.", id));
}

#[tokio::test]
async fn updating_a_missing_company_is_404_not_an_insert() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = post_entity(
        &client,
        &format!("{}/api/v1/company", base),
        json!({ "companyId": 42, "companyName": "Ghost" }),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let all: Value = client
        .get(format!("{}/api/v1/company", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_failures_are_structured_400s() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = post_entity(
        &client,
        &format!("{}/api/v1/company", base),
        json!({ "companyName": "" }),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "companyName");

    // Omitting the name entirely is the validator's 400, not a
    // deserialization error.
    let resp = post_entity(&client, &format!("{}/api/v1/company", base), json!({})).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "companyName");

    // Empty name + zero FK ids: one failure per field.
    let resp = post_entity(
        &client,
        &format!("{}/api/v1/contact", base),
        json!({ "contactName": "", "companyId": 0, "countryId": 0 }),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields.len(), 3);
    assert!(fields.contains(&"contactName"));
    assert!(fields.contains(&"companyId"));
    assert!(fields.contains(&"countryId"));
}

#[tokio::test]
async fn contact_save_names_the_missing_foreign_entity() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let country_id = seed_country(&client, &base, "Macedonia").await;

    let resp = post_entity(
        &client,
        &format!("{}/api/v1/contact", base),
        json!({ "contactName": "Ana", "companyId": 77, "countryId": country_id }),
    )
    .await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Company with ID 77 not found.");

    let all: Value = client
        .get(format!("{}/api/v1/contact", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_parent_cascades_over_http() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let country_id = seed_country(&client, &base, "Macedonia").await;
    let company_id = seed_company(&client, &base, "Acme").await;
    let contact_id = seed_contact(&client, &base, "Ana", company_id, country_id).await;

    let resp = client
        .delete(format!("{}/api/v1/company/{}", base, company_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{}/api/v1/contact/{}", base, contact_id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn company_page_endpoint_reports_totals() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"] {
        seed_company(&client, &base, name).await;
    }

    let page: Value = client
        .get(format!("{}/api/v1/company/page?pageNumber=1&pageSize=2", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["pageNumber"], 1);
    assert_eq!(page["pageSize"], 2);
    assert_eq!(page["totalRecords"], 5);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(page["data"][0]["companyName"], "Alpha");

    let last: Value = client
        .get(format!("{}/api/v1/company/page?pageNumber=3&pageSize=2", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(last["data"].as_array().unwrap().len(), 1);
    assert_eq!(last["data"][0]["companyName"], "Epsilon");
}

#[tokio::test]
async fn page_parameters_below_one_are_rejected() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    seed_company(&client, &base, "Acme").await;

    for query in [
        "pageNumber=0&pageSize=2",
        "pageNumber=1&pageSize=0",
        // An offset this window describes does not fit in an i64.
        "pageNumber=9223372036854775807&pageSize=2",
    ] {
        let resp = client
            .get(format!("{}/api/v1/company/page?{}", base, query))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "query {:?} should be rejected", query);
    }
}

#[tokio::test]
async fn contacts_with_company_and_country_are_nested() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let country_id = seed_country(&client, &base, "Macedonia").await;
    let company_id = seed_company(&client, &base, "Acme").await;
    seed_contact(&client, &base, "Ana", company_id, country_id).await;

    let body: Value = client
        .get(format!("{}/api/v1/contact/with-company-and-country", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["company"]["companyName"], "Acme");
    assert_eq!(contacts[0]["country"]["countryName"], "Macedonia");
}

#[tokio::test]
async fn contact_filter_applies_present_filters_only() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let macedonia = seed_country(&client, &base, "Macedonia").await;
    let germany = seed_country(&client, &base, "Germany").await;
    let acme = seed_company(&client, &base, "Acme").await;
    let beta = seed_company(&client, &base, "Beta").await;
    seed_contact(&client, &base, "Ana", acme, macedonia).await;
    seed_contact(&client, &base, "Bojan", acme, germany).await;
    seed_contact(&client, &base, "Vlado", beta, macedonia).await;

    let body: Value = client
        .get(format!("{}/api/v1/contact/filter?companyId={}", base, acme))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 2);
    assert!(contacts.iter().all(|c| c["companyId"].as_i64().unwrap() == acme));

    let resp = client
        .get(format!("{}/api/v1/contact/filter?countryId=999", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Zero is never a valid id, so it is unknown like any other missing row.
    let resp = client
        .get(format!("{}/api/v1/contact/filter?companyId=0", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Company with ID 0 not found.");
}

#[tokio::test]
async fn company_statistics_counts_contacts_per_company_name() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();
    let macedonia = seed_country(&client, &base, "Macedonia").await;
    let acme = seed_company(&client, &base, "Acme").await;
    let beta = seed_company(&client, &base, "Beta").await;
    seed_contact(&client, &base, "Ana", acme, macedonia).await;
    seed_contact(&client, &base, "Bojan", acme, macedonia).await;
    seed_contact(&client, &base, "Vlado", beta, macedonia).await;

    let stats: Value = client
        .get(format!(
            "{}/api/v1/country/{}/company-statistics",
            base, macedonia
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["Acme"], 2);
    assert_eq!(stats["Beta"], 1);

    let iceland = seed_country(&client, &base, "Iceland").await;
    let empty: Value = client
        .get(format!(
            "{}/api/v1/country/{}/company-statistics",
            base, iceland
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn login_issues_a_verifiable_one_hour_token() {
    let (base, issuer) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "username": "mile", "password": "mile123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let token = body["token"].as_str().unwrap();

    let claims = issuer.verify(token).unwrap();
    assert_eq!(claims.sub, "mile");
    assert_eq!(claims.iss, "YourIssuer");
    assert_eq!(claims.aud, "YourAudience");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn login_with_wrong_credentials_is_unauthorized() {
    let (base, _) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "username": "mile", "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert!(body.get("token").is_none());
    assert_eq!(body["error"], "Invalid credentials");
}
