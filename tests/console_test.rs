use folio_admin::framework::mock::{RecordingBrowser, RecordingNotifier, RecordingSaver, ScriptedPrompt};
use folio_admin::framework::Notice;
use folio_admin::lifecycle::{AdminConsole, Collaborators, ConsoleConfig};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collaborators(notifier: &RecordingNotifier) -> Collaborators {
    Collaborators {
        notifier: Arc::new(notifier.clone()),
        prompt: Arc::new(ScriptedPrompt::new()),
        saver: Arc::new(RecordingSaver::new()),
        browser: Arc::new(RecordingBrowser::new()),
    }
}

#[tokio::test]
async fn console_loads_every_list_and_shuts_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "title": "Atlas",
            "description": "Map renderer",
            "createdAt": "2024-01-01T00:00:00Z"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/experiences"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/articles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ConsoleConfig {
        api_base_url: format!("{}/api", server.uri()),
        ..Default::default()
    };
    let notifier = RecordingNotifier::new();
    let console = AdminConsole::start(&config, collaborators(&notifier)).unwrap();

    console.projects.load().await.unwrap();
    console.experiences.load().await.unwrap();
    console.articles.load().await.unwrap();

    let projects = console.projects.wait_until(|v| v.items.len() == 1).await.unwrap();
    assert_eq!(projects.items[0].title, "Atlas");
    let articles = console.articles.wait_until(|v| v.error.is_some()).await.unwrap();
    assert!(!articles.has_no_items());
    // The delayed response keeps the load observable before the empty state.
    console.experiences.wait_until(|v| v.loading).await.unwrap();
    let experiences = console
        .experiences
        .wait_until(|v| v.has_no_items())
        .await
        .unwrap();
    assert!(experiences.items.is_empty());

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn demo_switch_is_shared_by_every_screen() {
    let config = ConsoleConfig {
        demo_mode: true,
        ..Default::default()
    };
    let notifier = RecordingNotifier::new();
    let console = AdminConsole::start(&config, collaborators(&notifier)).unwrap();

    // Blocked before any request is built, so no server is needed.
    console.projects.move_down(0).await.unwrap();
    console.cv.set_current(1).await.unwrap();
    for _ in 0..200 {
        if notifier.notices().len() == 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(
        notifier.notices(),
        vec![Notice::DemoModeRestricted, Notice::DemoModeRestricted]
    );

    console.demo.set(false);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_base_url_fails_to_start() {
    let config = ConsoleConfig {
        api_base_url: "localhost:8080".into(),
        ..Default::default()
    };
    let notifier = RecordingNotifier::new();
    assert!(AdminConsole::start(&config, collaborators(&notifier)).is_err());
}
