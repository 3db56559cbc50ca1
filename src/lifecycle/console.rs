use crate::audit_admin::{AuditClient, AuditHandle};
use crate::controllers::{Editor, ListHandle};
use crate::cv_admin::{CvClient, CvHandle};
use crate::framework::{
    ApiClient, ApiResult, Browser, ConfirmationGate, ControllerContext, DemoSwitch,
    DirectorySaver, Dismissal, FileSaver, FixedPrompt, LoggingBrowser, ModalPrompt, Notifier,
    RestClient, Scope, TracingNotifier,
};
use crate::lifecycle::ConsoleConfig;
use crate::model::{Article, Experience, Project};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Outside-world dependencies of the console: toasts, modals, file saving and the browser.
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Arc<dyn Notifier>,
    pub prompt: Arc<dyn ModalPrompt>,
    pub saver: Arc<dyn FileSaver>,
    pub browser: Arc<dyn Browser>,
}

impl Collaborators {
    /// Log-only collaborators for running without a UI. Every confirmation is cancelled.
    pub fn headless(config: &ConsoleConfig) -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
            prompt: Arc::new(FixedPrompt(Err(Dismissal::Cancel))),
            saver: Arc::new(DirectorySaver::new(config.download_dir.clone())),
            browser: Arc::new(LoggingBrowser),
        }
    }
}

/// The running admin console.
///
/// `AdminConsole` is responsible for:
/// - **Wiring**: one shared [`ApiClient`] behind every resource, audit and CV client
/// - **Lifecycle**: spawning every screen controller with a shared [`ControllerContext`]
///   and disposing them on [`shutdown`](AdminConsole::shutdown)
///
/// # Example
///
/// ```ignore
/// let config = ConsoleConfig::from_env()?;
/// let console = AdminConsole::start(&config, Collaborators::headless(&config))?;
///
/// console.projects.load().await?;
/// console.projects.search_input("rust").await?;
///
/// console.shutdown().await?;
/// ```
pub struct AdminConsole {
    pub projects: ListHandle<Project>,
    pub experiences: ListHandle<Experience>,
    pub articles: ListHandle<Article>,
    pub audit: AuditHandle,
    pub cv: CvHandle,

    pub project_editor: Editor<Project>,
    pub experience_editor: Editor<Experience>,
    pub article_editor: Editor<Article>,

    /// Flip at runtime to lock or unlock mutations.
    pub demo: Arc<DemoSwitch>,

    handles: Vec<JoinHandle<()>>,
}

impl AdminConsole {
    /// Builds the clients and spawns every controller. Must run inside a Tokio runtime.
    pub fn start(config: &ConsoleConfig, collaborators: Collaborators) -> ApiResult<Self> {
        let api = ApiClient::new(
            config.api_base_url.clone(),
            config.request_timeout(),
            config.auth_token.clone(),
        )?;
        let demo = Arc::new(DemoSwitch::new(config.demo_mode));
        let ctx = ControllerContext::new(
            collaborators.notifier.clone(),
            demo.clone(),
            ConfirmationGate::new(collaborators.prompt.clone()),
        )
        .with_mailbox(config.mailbox_capacity);
        let settings = config.search_settings();
        let capacity = ctx.mailbox;

        // 1. Resource clients
        let project_api = RestClient::<Project>::new(api.clone(), Scope::Admin);
        let experience_api = RestClient::<Experience>::new(api.clone(), Scope::Admin);
        let article_api = RestClient::<Article>::new(api.clone(), Scope::Admin);

        // 2. Controllers
        let (project_list, projects) =
            crate::project_admin::new(project_api.clone(), settings, capacity);
        let (experience_list, experiences) =
            crate::experience_admin::new(experience_api.clone(), settings, capacity);
        let (article_list, articles) =
            crate::article_admin::new(article_api.clone(), settings, capacity);
        let (audit_controller, audit) = crate::audit_admin::new(
            AuditClient::new(api.clone()),
            collaborators.saver.clone(),
            config.audit_page_size,
            capacity,
        );
        let (cv_controller, cv) =
            crate::cv_admin::new(CvClient::new(api), collaborators.browser.clone(), capacity);

        // 3. Start them with the shared context
        let handles = vec![
            tokio::spawn(project_list.run(ctx.clone())),
            tokio::spawn(experience_list.run(ctx.clone())),
            tokio::spawn(article_list.run(ctx.clone())),
            tokio::spawn(audit_controller.run(ctx.clone())),
            tokio::spawn(cv_controller.run(ctx.clone())),
        ];
        info!(
            api = %config.api_base_url,
            demo_mode = config.demo_mode,
            controllers = handles.len(),
            "Admin console started"
        );

        Ok(Self {
            projects,
            experiences,
            articles,
            audit,
            cv,
            project_editor: Editor::new(project_api, ctx.clone()),
            experience_editor: Editor::new(experience_api, ctx.clone()),
            article_editor: Editor::new(article_api, ctx),
            demo,
            handles,
        })
    }

    /// Disposes every controller, cancelling in-flight requests, and waits for the tasks.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        self.projects.dispose();
        self.experiences.dispose();
        self.articles.dispose();
        self.audit.dispose();
        self.cv.dispose();

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Controller task failed: {:?}", e);
                return Err(format!("Controller task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
