//! # CV Controller
//!
//! Actor behind the CV screen: the current CV, every uploaded CV, uploads, switching the
//! current one and deletes. Mutations are blocked in demo mode.

use crate::cv_admin::client::CvClient;
use crate::cv_admin::error::CvError;
use crate::framework::{
    dispose_pair, ApiResult, Browser, ControllerContext, ControllerError, DisposeHandle,
    DisposeSignal, Notice, ResourceId,
};
use crate::model::Cv;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Upload size limit, 10 MiB.
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;

/// Checks a file before it is sent.
pub fn validate_upload(file_name: &str, bytes: &[u8]) -> Result<(), CvError> {
    if bytes.is_empty() {
        return Err(CvError::Empty);
    }
    if !file_name.to_ascii_lowercase().ends_with(".pdf") {
        return Err(CvError::NotPdf);
    }
    if bytes.len() > MAX_CV_BYTES {
        return Err(CvError::TooLarge { size: bytes.len(), limit: MAX_CV_BYTES });
    }
    Ok(())
}

/// Snapshot of the CV screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvView {
    pub current: Option<Cv>,
    pub all: Vec<Cv>,
    pub loading_current: bool,
    pub loading_all: bool,
    pub uploading: bool,
    /// Message of the last failed current-CV load. Cleared when that load restarts.
    pub current_error: Option<String>,
    /// Message of the last failed list load. Cleared when that load restarts.
    pub all_error: Option<String>,
}

impl CvView {
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.current_error.is_some() || self.all_error.is_some()
    }
}

#[derive(Debug)]
enum Msg {
    LoadCurrent,
    LoadAll,
    Upload { file_name: String, bytes: Vec<u8> },
    SetCurrent(ResourceId),
    Delete(ResourceId),
    Download,
    CurrentLoaded { seq: u64, result: ApiResult<Option<Cv>> },
    AllLoaded { seq: u64, result: ApiResult<Vec<Cv>> },
    Uploaded { result: ApiResult<Cv> },
    CurrentSet { id: ResourceId, result: ApiResult<()> },
    DeleteFinished { id: ResourceId, name: String, result: ApiResult<()> },
}

pub struct CvController {
    client: CvClient,
    browser: Arc<dyn Browser>,
    view: CvView,
    current_seq: u64,
    all_seq: u64,
    mailbox: mpsc::Sender<Msg>,
    receiver: mpsc::Receiver<Msg>,
    state: watch::Sender<CvView>,
    signal: DisposeSignal,
}

impl CvController {
    pub fn new(client: CvClient, browser: Arc<dyn Browser>, capacity: usize) -> (Self, CvHandle) {
        let (mailbox, receiver) = mpsc::channel(capacity.max(1));
        let (state, observer) = watch::channel(CvView::default());
        let (dispose, signal) = dispose_pair();

        let controller = Self {
            client,
            browser,
            view: CvView::default(),
            current_seq: 0,
            all_seq: 0,
            mailbox: mailbox.clone(),
            receiver,
            state,
            signal,
        };
        let handle = CvHandle {
            sender: mailbox,
            state: observer,
            dispose: Arc::new(dispose),
        };
        (controller, handle)
    }

    pub async fn run(mut self, ctx: ControllerContext) {
        info!("CV controller started");
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
        info!("CV controller disposed");
    }

    fn handle(&mut self, msg: Msg, ctx: &ControllerContext) {
        match msg {
            Msg::LoadCurrent => self.load_current(),
            Msg::LoadAll => self.load_all(),
            Msg::Upload { file_name, bytes } => self.upload(file_name, bytes, ctx),
            Msg::SetCurrent(id) => self.set_current(id, ctx),
            Msg::Delete(id) => self.request_delete(id, ctx),
            Msg::Download => {
                let url = self.client.download_url();
                debug!(%url, "Download CV");
                self.browser.open(&url);
            }
            Msg::CurrentLoaded { seq, result } => {
                if seq != self.current_seq {
                    debug!(seq, latest = self.current_seq, "Stale current CV dropped");
                    return;
                }
                self.view.loading_current = false;
                match result {
                    Ok(current) => {
                        debug!(present = current.is_some(), "Loaded current CV");
                        self.view.current = current;
                    }
                    Err(e) => {
                        error!(error = %e, status = ?e.status(), "Loading current CV failed");
                        self.view.current_error =
                            Some(Notice::LoadFailed { resource: "CV" }.to_string());
                    }
                }
            }
            Msg::AllLoaded { seq, result } => {
                if seq != self.all_seq {
                    debug!(seq, latest = self.all_seq, "Stale CV list dropped");
                    return;
                }
                self.view.loading_all = false;
                match result {
                    Ok(all) => {
                        info!(count = all.len(), "Loaded CVs");
                        self.view.all = all;
                    }
                    Err(e) => {
                        error!(error = %e, status = ?e.status(), "Loading CVs failed");
                        self.view.all_error =
                            Some(Notice::LoadFailed { resource: "CVs" }.to_string());
                    }
                }
            }
            Msg::Uploaded { result } => {
                self.view.uploading = false;
                match result {
                    Ok(cv) => {
                        info!(id = cv.id, "CV uploaded");
                        ctx.notifier.notify(Notice::CvUploaded {
                            file_name: cv.display_name().to_string(),
                        });
                        self.load_current();
                        self.load_all();
                    }
                    Err(e) => {
                        error!(error = %e, status = ?e.status(), "CV upload failed");
                        ctx.notifier.notify(Notice::CvUploadFailed);
                    }
                }
            }
            Msg::CurrentSet { id, result } => match result {
                Ok(()) => {
                    for cv in &mut self.view.all {
                        cv.current = cv.id == id;
                    }
                    self.view.current = self.view.all.iter().find(|cv| cv.id == id).cloned();
                    ctx.notifier.notify(Notice::CvCurrentChanged);
                }
                Err(e) => {
                    error!(id, error = %e, status = ?e.status(), "Setting current CV failed");
                    ctx.notifier.notify(Notice::CvUpdateFailed);
                }
            },
            Msg::DeleteFinished { id, name, result } => match result {
                Ok(()) => {
                    self.view.all.retain(|cv| cv.id != id);
                    if self.view.current.as_ref().is_some_and(|cv| cv.id == id) {
                        self.view.current = None;
                    }
                    ctx.notifier.notify(Notice::Deleted { name });
                }
                Err(e) => {
                    error!(id, error = %e, status = ?e.status(), "CV delete failed");
                    ctx.notifier.notify(Notice::DeleteFailed { name });
                }
            },
        }
    }

    fn load_current(&mut self) {
        self.current_seq += 1;
        let seq = self.current_seq;
        self.view.loading_current = true;
        self.view.current_error = None;

        let client = self.client.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = client.current().await;
            let _ = mailbox.send(Msg::CurrentLoaded { seq, result }).await;
        });
    }

    fn load_all(&mut self) {
        self.all_seq += 1;
        let seq = self.all_seq;
        self.view.loading_all = true;
        self.view.all_error = None;

        let client = self.client.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = client.list_all().await;
            let _ = mailbox.send(Msg::AllLoaded { seq, result }).await;
        });
    }

    fn upload(&mut self, file_name: String, bytes: Vec<u8>, ctx: &ControllerContext) {
        if ctx.demo_blocks() {
            return;
        }
        if let Err(e) = validate_upload(&file_name, &bytes) {
            warn!(%file_name, error = %e, "CV rejected");
            ctx.notifier.notify(Notice::InvalidForm { reason: e.to_string() });
            return;
        }
        self.view.uploading = true;

        let client = self.client.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = client.upload(&file_name, bytes).await;
            let _ = mailbox.send(Msg::Uploaded { result }).await;
        });
    }

    fn set_current(&mut self, id: ResourceId, ctx: &ControllerContext) {
        if ctx.demo_blocks() {
            return;
        }
        let client = self.client.clone();
        let mailbox = self.mailbox.clone();
        self.signal.spawn(async move {
            let result = client.set_current(id).await;
            let _ = mailbox.send(Msg::CurrentSet { id, result }).await;
        });
    }

    fn request_delete(&mut self, id: ResourceId, ctx: &ControllerContext) {
        let Some(cv) = self.view.all.iter().find(|cv| cv.id == id) else {
            warn!(id, "Delete requested for unknown CV");
            return;
        };
        let name = cv.display_name().to_string();
        let locked = ctx.demo.is_active();
        let gate = ctx.gate.clone();
        let client = self.client.clone();
        let mailbox = self.mailbox.clone();

        self.signal.spawn(async move {
            if !gate.confirm_delete(&name, locked).await.is_confirmed() {
                debug!(id, "CV delete cancelled");
                return;
            }
            let result = client.delete(id).await;
            let _ = mailbox.send(Msg::DeleteFinished { id, name, result }).await;
        });
    }
}

/// The client half of the CV screen.
#[derive(Clone)]
pub struct CvHandle {
    sender: mpsc::Sender<Msg>,
    state: watch::Receiver<CvView>,
    dispose: Arc<DisposeHandle>,
}

impl CvHandle {
    async fn send(&self, msg: Msg) -> Result<(), ControllerError> {
        self.sender.send(msg).await.map_err(|_| ControllerError::Closed)
    }

    pub async fn load_current(&self) -> Result<(), ControllerError> {
        self.send(Msg::LoadCurrent).await
    }

    pub async fn load_all(&self) -> Result<(), ControllerError> {
        self.send(Msg::LoadAll).await
    }

    pub async fn upload(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), ControllerError> {
        self.send(Msg::Upload { file_name: file_name.into(), bytes }).await
    }

    pub async fn set_current(&self, id: ResourceId) -> Result<(), ControllerError> {
        self.send(Msg::SetCurrent(id)).await
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), ControllerError> {
        self.send(Msg::Delete(id)).await
    }

    pub async fn download(&self) -> Result<(), ControllerError> {
        self.send(Msg::Download).await
    }

    pub fn view(&self) -> CvView {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CvView> {
        self.state.clone()
    }

    pub async fn wait_until(
        &self,
        predicate: impl FnMut(&CvView) -> bool,
    ) -> Result<CvView, ControllerError> {
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
    fn uploads_must_be_small_pdfs() {
        assert_eq!(validate_upload("cv.pdf", b""), Err(CvError::Empty));
        assert_eq!(validate_upload("cv.docx", b"PK"), Err(CvError::NotPdf));
        assert_eq!(validate_upload("CV.PDF", b"%PDF-1.7"), Ok(()));

        let big = vec![0u8; MAX_CV_BYTES + 1];
        assert_eq!(
            validate_upload("cv.pdf", &big),
            Err(CvError::TooLarge { size: MAX_CV_BYTES + 1, limit: MAX_CV_BYTES })
        );
        assert!(validate_upload("cv.pdf", &big[..MAX_CV_BYTES]).is_ok());
    }
}
