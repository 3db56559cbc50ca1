#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use folio_admin::controllers::{ListController, ListHandle, SearchSettings};
use folio_admin::framework::mock::{MockApi, RecordingNotifier, ScriptedPrompt};
use folio_admin::framework::{ConfirmationGate, ControllerContext, DemoSwitch, Resource, SearchResult};
use folio_admin::model::{Article, ArticleStatus, Project};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Collaborator doubles shared by one test.
pub struct Doubles {
    pub notifier: RecordingNotifier,
    pub prompt: ScriptedPrompt,
    pub demo: Arc<DemoSwitch>,
}

impl Doubles {
    pub fn new() -> Self {
        Self {
            notifier: RecordingNotifier::new(),
            prompt: ScriptedPrompt::new(),
            demo: Arc::new(DemoSwitch::new(false)),
        }
    }

    pub fn context(&self) -> ControllerContext {
        ControllerContext::new(
            Arc::new(self.notifier.clone()),
            self.demo.clone(),
            ConfirmationGate::new(Arc::new(self.prompt.clone())),
        )
    }
}

/// A running list controller over a mock.
pub struct ListHarness<T: Resource> {
    pub mock: MockApi<T>,
    pub handle: ListHandle<T>,
    pub doubles: Doubles,
    pub task: JoinHandle<()>,
}

pub fn spawn_list<T: Resource>(mock: MockApi<T>) -> ListHarness<T> {
    let doubles = Doubles::new();
    let (controller, handle) = ListController::new(mock.clone(), SearchSettings::default(), 32);
    let task = tokio::spawn(controller.run(doubles.context()));
    ListHarness { mock, handle, doubles, task }
}

/// Lets every ready task and due timer run. Needs a paused clock.
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

pub fn project(id: i64, display_order: Option<i32>) -> Project {
    Project {
        id,
        title: format!("Project {id}"),
        description: "A thing I built".to_string(),
        short_description: None,
        technologies: vec!["Rust".to_string()],
        github_url: None,
        demo_url: None,
        image_url: None,
        featured: false,
        display_order,
        created_at: Utc.with_ymd_and_hms(2024, 1, id as u32, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

pub fn article(id: i64, status: ArticleStatus) -> Article {
    Article {
        id,
        title: format!("Article {id}"),
        slug: format!("article-{id}"),
        summary: None,
        content: "Body".to_string(),
        status,
        tags: Vec::new(),
        published_at: None,
        created_at: Utc.with_ymd_and_hms(2024, 2, id as u32, 12, 0, 0).unwrap(),
        updated_at: None,
    }
}

pub fn hit(id: i64) -> SearchResult {
    SearchResult {
        id,
        title: format!("Project {id}"),
        subtitle: None,
        status: None,
    }
}

pub fn ids<T: Resource>(items: &[T]) -> Vec<i64> {
    items.iter().map(|item| item.id()).collect()
}

/// Polls `condition` on the real clock, for tests that talk to a mock HTTP server.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 2s");
}
