//! # Audit Query Pager
//!
//! Actor behind the audit log screen: a filter, a zero-based page cursor over a fixed page
//! size, and exports of the filtered set.
//!
//! - `apply_filters` and `clear_filters` jump back to page 0 and reload.
//! - `go_to_page` outside `[0, total_pages)` does nothing, not even a request.
//! - Exports never touch the page state. Their failures are logged only.

use crate::audit_admin::client::AuditClient;
use crate::controllers::PageCursor;
use crate::framework::{
    dispose_pair, ApiResult, ControllerContext, ControllerError, DisposeHandle, DisposeSignal,
    FileSaver, Notice, Page,
};
use crate::model::{AuditFilter, AuditLog, ExportFormat};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info};

/// Snapshot of the audit screen.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditView {
    pub logs: Vec<AuditLog>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter: AuditFilter,
    pub cursor: PageCursor,
}

impl AuditView {
    fn new(page_size: u32) -> Self {
        Self {
            logs: Vec::new(),
            loading: false,
            error: None,
            filter: AuditFilter::default(),
            cursor: PageCursor::new(page_size),
        }
    }

    pub fn page_numbers(&self) -> Vec<u32> {
        self.cursor.page_numbers()
    }

    pub fn has_no_logs(&self) -> bool {
        !self.loading && self.error.is_none() && self.logs.is_empty()
    }
}

/// File name of an export made today.
pub fn export_file_name(format: ExportFormat) -> String {
    format!("audit-logs-{}.{}", Utc::now().format("%Y-%m-%d"), format.extension())
}

#[derive(Debug)]
enum Msg {
    Load,
    ApplyFilters(AuditFilter),
    ClearFilters,
    GoToPage(i64),
    Export(ExportFormat),
    Loaded { seq: u64, result: ApiResult<Page<AuditLog>> },
}

/// The actor half of the audit screen.
pub struct AuditController {
    client: AuditClient,
    saver: Arc<dyn FileSaver>,
    view: AuditView,
    load_seq: u64,
    mailbox: mpsc::Sender<Msg>,
    receiver: mpsc::Receiver<Msg>,
    state: watch::Sender<AuditView>,
    signal: DisposeSignal,
}

impl AuditController {
    pub fn new(
        client: AuditClient,
        saver: Arc<dyn FileSaver>,
        page_size: u32,
        capacity: usize,
    ) -> (Self, AuditHandle) {
        let (mailbox, receiver) = mpsc::channel(capacity.max(1));
        let view = AuditView::new(page_size.max(1));
        let (state, observer) = watch::channel(view.clone());
        let (dispose, signal) = dispose_pair();

        let controller = Self {
            client,
            saver,
            view,
            load_seq: 0,
            mailbox: mailbox.clone(),
            receiver,
            state,
            signal,
        };
        let handle = AuditHandle {
            sender: mailbox,
            state: observer,
            dispose: Arc::new(dispose),
        };
        (controller, handle)
    }

    pub async fn run(mut self, ctx: ControllerContext) {
        info!(page_size = self.view.cursor.size, "Audit controller started");
        let mut signal = self.signal.clone();
        loop {
            let msg = tokio::select! {
                biased;
                _ = signal.disposed() => break,
                msg = self.receiver.recv() => match msg {
                    Some(msg) => msg,
                    None => break,
                },
            };
            self.handle(msg, &ctx);
            self.state.send_replace(self.view.clone());
        }
        info!("Audit controller disposed");
    }

    fn handle(&mut self, msg: Msg, ctx: &ControllerContext) {
        match msg {
            Msg::Load => self.load(),
            Msg::ApplyFilters(filter) => {
                debug!(?filter, "Apply filters");
                self.view.filter = filter;
                self.view.cursor.current = 0;
                self.load();
            }
            Msg::ClearFilters => {
                self.view.filter = AuditFilter::default();
                self.view.cursor.current = 0;
                self.load();
            }
            Msg::GoToPage(page) => {
                if !self.view.cursor.contains(page) {
                    debug!(page, total_pages = self.view.cursor.total_pages, "Page out of range");
                    return;
                }
                self.view.cursor.current = page as u32;
                self.load();
            }
            Msg::Export(format) => self.export(format, ctx),
            Msg::Loaded { seq, result } => {
                if seq != self.load_seq {
                    debug!(seq, latest = self.load_seq, "Stale page dropped");
                    return;
                }
                self.view.loading = false;
                match result {
                    Ok(page) => {
                        info!(
                            page = page.number,
                            total_pages = page.total_pages,
                            total = page.total_elements,
                            "Loaded audit page"
                        );
                        self.view.cursor.absorb(&page);
                        self.view.logs = page.content;
                    }
                    Err(e) => {
                        error!(error = %e, status = ?e.status(), "Audit load failed");
                        self.view.error = Some(Notice::LoadFailed { resource: "audit logs" }.to_string());
                    }
                }
            }
        }
    }

    fn load(&mut self) {
        self.load_seq += 1;
        let seq = self.load_seq;
        self.view.loading = true;
        self.view.error = None;

        let client = self.client.clone();
        let filter = self.view.filter.clone();
        let page = self.view.cursor.current;
        let size = self.view.cursor.size;
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = client.list(&filter, page, size).await;
            let _ = mailbox.send(Msg::Loaded { seq, result }).await;
        });
    }

    fn export(&mut self, format: ExportFormat, ctx: &ControllerContext) {
        ctx.notifier.notify(Notice::ExportStarted { format: format.label() });

        let client = self.client.clone();
        let saver = self.saver.clone();
        let filter = self.view.filter.clone();
        self.signal.spawn(async move {
            let bytes = match client.export(format, &filter).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(format = format.label(), error = %e, status = ?e.status(), "Export failed");
                    return;
                }
            };
            let file_name = export_file_name(format);
            match saver.save(&file_name, format.mime_type(), bytes).await {
                Ok(()) => info!(%file_name, "Export saved"),
                Err(e) => error!(%file_name, error = %e, "Saving export failed"),
            }
        });
    }
}

/// The client half of the audit screen.
#[derive(Clone)]
pub struct AuditHandle {
    sender: mpsc::Sender<Msg>,
    state: watch::Receiver<AuditView>,
    dispose: Arc<DisposeHandle>,
}

impl AuditHandle {
    async fn send(&self, msg: Msg) -> Result<(), ControllerError> {
        self.sender.send(msg).await.map_err(|_| ControllerError::Closed)
    }

    /// Reloads the current page with the current filter.
    pub async fn load(&self) -> Result<(), ControllerError> {
        self.send(Msg::Load).await
    }

    pub async fn apply_filters(&self, filter: AuditFilter) -> Result<(), ControllerError> {
        self.send(Msg::ApplyFilters(filter)).await
    }

    pub async fn clear_filters(&self) -> Result<(), ControllerError> {
        self.send(Msg::ClearFilters).await
    }

    pub async fn go_to_page(&self, page: i64) -> Result<(), ControllerError> {
        self.send(Msg::GoToPage(page)).await
    }

    pub async fn export_csv(&self) -> Result<(), ControllerError> {
        self.send(Msg::Export(ExportFormat::Csv)).await
    }

    pub async fn export_json(&self) -> Result<(), ControllerError> {
        self.send(Msg::Export(ExportFormat::Json)).await
    }

    pub fn view(&self) -> AuditView {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuditView> {
        self.state.clone()
    }

    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&AuditView) -> bool,
    ) -> Result<AuditView, ControllerError> {
        let mut state = self.state.clone();
        let view = state.wait_for(predicate).await.map_err(|_| ControllerError::Closed)?;
        Ok(view.clone())
    }

    pub fn dispose(&self) {
        self.dispose.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_carry_date_and_extension() {
        let name = export_file_name(ExportFormat::Csv);
        assert!(name.starts_with("audit-logs-"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "audit-logs-2024-01-01.csv".len());
    }

    #[test]
    fn empty_view_flags() {
        let mut view = AuditView::new(20);
        assert!(view.has_no_logs());
        view.loading = true;
        assert!(!view.has_no_logs());
        assert!(view.page_numbers().is_empty());
    }
}
