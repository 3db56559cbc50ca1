mod common;

use common::{eventually, Doubles};
use folio_admin::audit_admin::{self, export_file_name, AuditClient, AuditHandle};
use folio_admin::framework::mock::RecordingSaver;
use folio_admin::framework::{ApiClient, Notice};
use folio_admin::model::{AuditFilter, ExportFormat};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    server: MockServer,
    handle: AuditHandle,
    saver: RecordingSaver,
    doubles: Doubles,
}

async fn start() -> Harness {
    let server = MockServer::start().await;
    let api = ApiClient::new(format!("{}/api", server.uri()), Duration::from_secs(5), None).unwrap();
    let saver = RecordingSaver::new();
    let doubles = Doubles::new();
    let (controller, handle) =
        audit_admin::new(AuditClient::new(api), Arc::new(saver.clone()), 20, 32);
    tokio::spawn(controller.run(doubles.context()));
    Harness { server, handle, saver, doubles }
}

fn page_json(number: u32, total_pages: u32, first_id: i64) -> serde_json::Value {
    json!({
        "content": [{
            "id": first_id,
            "action": "DELETE",
            "entityType": "Project",
            "entityId": 3,
            "username": "admin",
            "createdAt": "2024-06-01T10:00:00Z"
        }],
        "totalElements": total_pages * 20,
        "totalPages": total_pages,
        "number": number,
        "size": 20,
        "first": number == 0,
        "last": number + 1 == total_pages
    })
}

async fn mount_page(server: &MockServer, number: u32, total_pages: u32, first_id: i64) {
    Mock::given(method("GET"))
        .and(path("/api/admin/audit"))
        .and(query_param("page", number.to_string()))
        .and(query_param("size", "20"))
        .and(query_param("sort", "createdAt,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(number, total_pages, first_id)))
        .mount(server)
        .await;
}

async fn requests(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.query().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn first_load_fills_cursor_and_page_window() {
    let h = start().await;
    mount_page(&h.server, 0, 10, 100).await;

    h.handle.load().await.unwrap();
    let view = h.handle.wait_until(|v| v.logs.len() == 1).await.unwrap();

    assert_eq!(view.cursor.total_pages, 10);
    assert_eq!(view.cursor.total_elements, 200);
    assert_eq!(view.page_numbers(), vec![0, 1, 2, 3, 4]);
    assert!(!view.cursor.has_previous());
    assert!(view.cursor.has_next());
}

#[tokio::test]
async fn out_of_range_pages_send_nothing() {
    let h = start().await;
    mount_page(&h.server, 0, 5, 100).await;
    mount_page(&h.server, 2, 5, 300).await;

    h.handle.load().await.unwrap();
    h.handle.wait_until(|v| v.logs.len() == 1 && !v.loading).await.unwrap();

    h.handle.go_to_page(-1).await.unwrap();
    h.handle.go_to_page(5).await.unwrap();
    // Mailbox order: once page 2 is in, both no-ops have been handled.
    h.handle.go_to_page(2).await.unwrap();
    let view = h
        .handle
        .wait_until(|v| !v.loading && v.logs.first().map(|l| l.id) == Some(300))
        .await
        .unwrap();

    assert_eq!(view.cursor.current, 2);
    assert_eq!(view.page_numbers(), vec![0, 1, 2, 3, 4]);
    assert_eq!(requests(&h.server).await.len(), 2);
}

#[tokio::test]
async fn filters_reset_to_first_page() {
    let h = start().await;
    mount_page(&h.server, 0, 5, 100).await;
    mount_page(&h.server, 3, 5, 400).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/audit"))
        .and(query_param("page", "0"))
        .and(query_param("action", "DELETE"))
        .and(query_param("startDate", "2024-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0, 1, 900)))
        .with_priority(1)
        .mount(&h.server)
        .await;

    h.handle.load().await.unwrap();
    h.handle.wait_until(|v| !v.loading && v.logs.len() == 1).await.unwrap();
    h.handle.go_to_page(3).await.unwrap();
    h.handle
        .wait_until(|v| !v.loading && v.cursor.current == 3)
        .await
        .unwrap();

    let filter = AuditFilter {
        action: Some("DELETE".into()),
        username: Some("   ".into()),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
        ..Default::default()
    };
    h.handle.apply_filters(filter.clone()).await.unwrap();
    let view = h
        .handle
        .wait_until(|v| !v.loading && v.logs.first().map(|l| l.id) == Some(900))
        .await
        .unwrap();
    assert_eq!(view.cursor.current, 0);
    assert_eq!(view.cursor.total_pages, 1);
    assert_eq!(view.filter, filter);

    h.handle.clear_filters().await.unwrap();
    let view = h
        .handle
        .wait_until(|v| !v.loading && v.logs.first().map(|l| l.id) == Some(100))
        .await
        .unwrap();
    assert!(view.filter.is_empty());
    assert_eq!(view.cursor.current, 0);

    let queries = requests(&h.server).await;
    assert_eq!(queries.len(), 4);
    assert!(queries[2].contains("action=DELETE"));
    assert!(!queries[2].contains("username"));
    assert!(!queries[3].contains("action"));
}

#[tokio::test]
async fn failed_load_sets_inline_error() {
    let h = start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/audit"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    h.handle.load().await.unwrap();
    let view = h.handle.wait_until(|v| v.error.is_some()).await.unwrap();

    assert!(!view.loading);
    assert!(!view.has_no_logs());
}

#[tokio::test]
async fn export_saves_filtered_file_without_touching_logs() {
    let h = start().await;
    mount_page(&h.server, 0, 1, 100).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/audit/export/csv"))
        .and(query_param("action", "LOGIN"))
        .respond_with(ResponseTemplate::new(200).set_body_string("id,action\n1,LOGIN\n"))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/audit"))
        .and(query_param("action", "LOGIN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0, 1, 100)))
        .with_priority(1)
        .mount(&h.server)
        .await;

    h.handle
        .apply_filters(AuditFilter {
            action: Some("LOGIN".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let before = h.handle.wait_until(|v| !v.loading && v.logs.len() == 1).await.unwrap();

    h.handle.export_csv().await.unwrap();
    let saver = h.saver.clone();
    eventually(move || !saver.files().is_empty()).await;

    let files = h.saver.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, export_file_name(ExportFormat::Csv));
    assert_eq!(files[0].mime_type, "text/csv");
    assert_eq!(files[0].bytes, b"id,action\n1,LOGIN\n".to_vec());
    assert!(h.doubles.notifier.contains(&Notice::ExportStarted { format: "CSV" }));
    assert_eq!(h.handle.view(), before);
}

#[tokio::test]
async fn failed_export_is_only_logged() {
    let h = start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/audit/export/json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    h.handle.export_json().await.unwrap();
    let server = &h.server;
    for _ in 0..200 {
        if !requests(server).await.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(h.saver.files().is_empty());
    assert_eq!(h.handle.view().error, None);
    assert_eq!(
        h.doubles.notifier.notices(),
        vec![Notice::ExportStarted { format: "JSON" }]
    );
}
