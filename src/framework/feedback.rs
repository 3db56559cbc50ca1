//! # User Feedback Collaborators
//!
//! Controllers never render anything. They report outcomes as typed [`Notice`] values to an
//! injected [`Notifier`] (the toast layer) and ask an injected [`DemoMode`] whether
//! mutating actions are allowed.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Severity of a notice, mapped to toast styling by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Everything a controller can tell the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LoadFailed { resource: &'static str },
    Deleted { name: String },
    DeleteFailed { name: String },
    OrderSaved,
    ReorderFailed,
    SearchFailed,
    DemoModeRestricted,
    InvalidForm { reason: String },
    Saved { name: String },
    SaveFailed,
    ExportStarted { format: &'static str },
    CvUploaded { file_name: String },
    CvUploadFailed,
    CvCurrentChanged,
    CvUpdateFailed,
}

impl Notice {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Notice::Deleted { .. }
            | Notice::OrderSaved
            | Notice::Saved { .. }
            | Notice::CvUploaded { .. }
            | Notice::CvCurrentChanged => NoticeKind::Success,
            Notice::DemoModeRestricted | Notice::ExportStarted { .. } => NoticeKind::Info,
            Notice::InvalidForm { .. } => NoticeKind::Warning,
            Notice::LoadFailed { .. }
            | Notice::DeleteFailed { .. }
            | Notice::ReorderFailed
            | Notice::SearchFailed
            | Notice::SaveFailed
            | Notice::CvUploadFailed
            | Notice::CvUpdateFailed => NoticeKind::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed { resource } => {
                write!(f, "Could not load {resource}. Please try again.")
            }
            Notice::Deleted { name } => write!(f, "\"{name}\" was deleted."),
            Notice::DeleteFailed { name } => write!(f, "Could not delete \"{name}\"."),
            Notice::OrderSaved => write!(f, "Order saved."),
            Notice::ReorderFailed => {
                write!(f, "Could not save the new order. The list was reloaded.")
            }
            Notice::SearchFailed => write!(f, "Search failed. Please try again."),
            Notice::DemoModeRestricted => write!(f, "This action is disabled in demo mode."),
            Notice::InvalidForm { reason } => write!(f, "Please fix the form: {reason}."),
            Notice::Saved { name } => write!(f, "\"{name}\" was saved."),
            Notice::SaveFailed => write!(f, "Could not save your changes."),
            Notice::ExportStarted { format } => write!(f, "Preparing {format} export..."),
            Notice::CvUploaded { file_name } => write!(f, "CV \"{file_name}\" uploaded."),
            Notice::CvUploadFailed => write!(f, "Could not upload the CV."),
            Notice::CvCurrentChanged => write!(f, "Current CV updated."),
            Notice::CvUpdateFailed => write!(f, "Could not update the CV."),
        }
    }
}

/// Toast presentation layer.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}

/// Notifier that writes notices to the log. Used by the headless console.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind() {
            NoticeKind::Success | NoticeKind::Info => info!(%notice, "Notice"),
            NoticeKind::Warning => warn!(%notice, "Notice"),
            NoticeKind::Error => error!(%notice, "Notice"),
        }
    }
}

/// Read-only capability telling controllers whether mutating actions are disabled.
pub trait DemoMode: Send + Sync + 'static {
    fn is_active(&self) -> bool;
}

/// Togglable demo-mode flag.
#[derive(Debug, Default)]
pub struct DemoSwitch {
    active: AtomicBool,
}

impl DemoSwitch {
    pub fn new(active: bool) -> Self {
        Self {
            active: AtomicBool::new(active),
        }
    }

    pub fn set(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

impl DemoMode for DemoSwitch {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
