use contactme::error::AppError;
use contactme::store::{NewProfile, ProfileStore, ProfileUpdate, SupabaseStore};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "anon-key";

async fn store() -> (MockServer, SupabaseStore) {
    let server = MockServer::start().await;
    let store = SupabaseStore::new(server.uri(), API_KEY);
    (server, store)
}

#[tokio::test]
async fn finds_profile_by_handle_with_embeds() {
    let (server, store) = store().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("handle", "eq.alice"))
        .and(query_param("select", "*,products(*),socials(*)"))
        .and(header("apikey", API_KEY))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-1",
            "handle": "alice",
            "name": "Alice",
            "is_published": true,
            "socials": [{"platform": "github", "url": "https://github.com/alice"}],
            "products": [{"name": "Course", "url": "https://example.com/course"}]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let profile = store
        .find_by_handle("alice")
        .await
        .expect("request succeeds")
        .expect("profile exists");

    assert_eq!(profile.id, "p-1");
    assert_eq!(profile.socials.len(), 1);
    assert_eq!(profile.products[0].name, "Course");
}

#[tokio::test]
async fn empty_result_is_none() {
    let (server, store) = store().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(store.find_by_id("missing").await.expect("request succeeds").is_none());
}

#[tokio::test]
async fn handle_exists_excludes_edited_profile() {
    let (server, store) = store().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("handle", "eq.alice"))
        .and(query_param("id", "neq.p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("handle", "eq.bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p-2"}])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(!store.handle_exists("alice", Some("p-1")).await.expect("query"));
    assert!(store.handle_exists("bob", None).await.expect("query"));
}

#[tokio::test]
async fn unique_violation_on_insert_is_a_conflict() {
    let (server, store) = store().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(header("prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "details": "Key (handle)=(alice) already exists.",
            "hint": null,
            "message": "duplicate key value violates unique constraint \"profiles_handle_key\""
        })))
        .mount(&server)
        .await;

    let new_profile = NewProfile {
        user_id: "u-1".to_string(),
        handle: "alice".to_string(),
        name: Some("Alice".to_string()),
        is_published: true,
        ..NewProfile::default()
    };

    match store.insert(&new_profile).await {
        Err(AppError::Conflict(message)) => assert!(message.contains("already exists")),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let (server, store) = store().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.p-1"))
        .and(body_json(json!({"handle": "alice2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "p-1", "handle": "alice2"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = ProfileUpdate {
        handle: Some("alice2".to_string()),
        ..ProfileUpdate::default()
    };
    let profile = store.update("p-1", &update).await.expect("update succeeds");
    assert_eq!(profile.handle.as_deref(), Some("alice2"));
}

#[tokio::test]
async fn update_of_unknown_row_is_not_found() {
    let (server, store) = store().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = store.update("ghost", &ProfileUpdate::default()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn records_page_view_without_representation() {
    let (server, store) = store().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/page_views"))
        .and(header("prefer", "return=minimal"))
        .and(body_json(json!({"profile_id": "p-1"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    store.record_page_view("p-1").await.expect("view recorded");
}

#[tokio::test]
async fn bad_api_key_maps_to_auth_error() {
    let (server, store) = store().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    match store.find_by_handle("alice").await {
        Err(AppError::Auth(message)) => assert!(message.contains("Invalid API key")),
        other => panic!("expected auth error, got {other:?}"),
    }
}
