use folio_admin::framework::{ApiClient, ApiError, ResourceApi, RestClient, Scope};
use folio_admin::model::{Article, ArticleCreate, ArticleStatus, Project, ProjectUpdate};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer, token: Option<&str>) -> ApiClient {
    ApiClient::new(
        format!("{}/api", server.uri()),
        Duration::from_secs(5),
        token.map(str::to_string),
    )
    .unwrap()
}

fn project_json(id: i64, order: i32) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Project {id}"),
        "description": "Built with Rust",
        "technologies": ["Rust"],
        "displayOrder": order,
        "createdAt": "2024-01-01T12:00:00Z"
    })
}

// ── Resource client ─────────────────────────────────────────────

#[tokio::test]
async fn admin_scope_lists_from_admin_base_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/projects"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            project_json(1, 0),
            project_json(2, 1)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, Some("s3cret")), Scope::Admin);
    let projects = client.list().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].display_order, Some(1));
}

#[tokio::test]
async fn public_scope_lists_from_public_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([project_json(7, 0)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, None), Scope::Public);
    assert_eq!(client.list().await.unwrap()[0].id, 7);
}

#[tokio::test]
async fn missing_record_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projects/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, None), Scope::Admin);
    let err = client.get(42).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn server_errors_keep_operation_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/projects/3"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, None), Scope::Admin);
    let err = client.delete(3).await.unwrap_err();

    assert!(matches!(err, ApiError::Status { operation: "delete", status: 503 }));
}

#[tokio::test]
async fn reorder_puts_the_full_id_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/projects/reorder"))
        .and(body_json(json!([2, 1, 3])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, None), Scope::Admin);
    client.reorder(&[2, 1, 3]).await.unwrap();
}

#[tokio::test]
async fn search_sends_query_to_admin_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/search/articles"))
        .and(query_param("q", "async rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 4, "title": "Async Rust", "status": "PUBLISHED" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::<Article>::new(api(&server, None), Scope::Admin);
    let hits = client.search("async rust").await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].status.as_deref(), Some("PUBLISHED"));
    assert_eq!(hits[0].subtitle, None);
}

#[tokio::test]
async fn create_and_update_send_camel_case_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/articles"))
        .and(body_json(json!({
            "title": "Hello",
            "content": "World",
            "status": "DRAFT",
            "tags": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "title": "Hello",
            "slug": "hello",
            "content": "World",
            "status": "DRAFT",
            "createdAt": "2024-05-01T08:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/projects/5"))
        .and(body_json(json!({ "githubUrl": "https://github.com/me/p" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(5, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let articles = RestClient::<Article>::new(api(&server, None), Scope::Admin);
    let created = articles
        .create(&ArticleCreate {
            title: "Hello".into(),
            content: "World".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.status, ArticleStatus::Draft);

    let projects = RestClient::<Project>::new(api(&server, None), Scope::Admin);
    let update = ProjectUpdate {
        github_url: Some("https://github.com/me/p".into()),
        ..Default::default()
    };
    assert_eq!(projects.update(5, &update).await.unwrap().id, 5);
}

#[tokio::test]
async fn malformed_body_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = RestClient::<Project>::new(api(&server, None), Scope::Admin);
    assert!(matches!(client.list().await, Err(ApiError::Serialization(_))));
}
