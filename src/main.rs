//! # Folio Admin
//!
//! Headless run of the admin console: loads every list screen and the current CV, logs what
//! it found and shuts down.
//!
//! Configure with `FOLIO_*` variables (see [`folio_admin::lifecycle::config`]).

use folio_admin::controllers::ListHandle;
use folio_admin::framework::Resource;
use folio_admin::lifecycle::{setup_tracing, AdminConsole, Collaborators, ConsoleConfig};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    info!(api = %config.api_base_url, "Starting admin console");

    let console = AdminConsole::start(&config, Collaborators::headless(&config))
        .map_err(|e| e.to_string())?;

    load_and_report(&console.projects)
        .instrument(tracing::info_span!("projects"))
        .await;
    load_and_report(&console.experiences)
        .instrument(tracing::info_span!("experiences"))
        .await;
    load_and_report(&console.articles)
        .instrument(tracing::info_span!("articles"))
        .await;

    let cv = async {
        let mut state = console.cv.subscribe();
        state.borrow_and_update();
        console.cv.load_current().await.map_err(|e| e.to_string())?;
        state.changed().await.map_err(|e| e.to_string())?;
        let view = state
            .wait_for(|v| !v.loading_current)
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(view.clone())
    }
    .instrument(tracing::info_span!("cv"))
    .await?;
    match (&cv.current, &cv.current_error) {
        (_, Some(e)) => error!(error = %e, "CV unavailable"),
        (Some(current), None) => info!(file = current.display_name(), "Current CV"),
        (None, None) => info!("No CV uploaded yet"),
    }

    console.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn load_and_report<T: Resource>(list: &ListHandle<T>) {
    let mut state = list.subscribe();
    state.borrow_and_update();
    if let Err(e) = list.load().await {
        error!(error = %e, "Controller unavailable");
        return;
    }
    if state.changed().await.is_err() {
        error!("Controller stopped");
        return;
    }
    let view = state.wait_for(|v| !v.loading).await.map(|v| v.clone());
    match view {
        Ok(view) => match view.error {
            Some(e) => error!(resource = T::PATH, error = %e, "Load failed"),
            None => info!(resource = T::PATH, count = view.items.len(), "Loaded"),
        },
        Err(e) => error!(error = %e, "Controller stopped"),
    }
}
