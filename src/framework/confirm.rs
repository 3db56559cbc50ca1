//! # Confirmation Gate
//!
//! A yes/no gate in front of destructive actions. The modal itself is an external
//! collaborator ([`ModalPrompt`]); the gate fills in dialog defaults and folds every
//! dismissal path into [`Confirmation::Cancelled`], so callers never see an error for a
//! user saying no.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Button style of the confirm action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Danger,
}

/// Fully resolved dialog handed to the modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub confirm_button: ButtonStyle,
    pub disable_confirm: bool,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: "Are you sure?".to_string(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            confirm_button: ButtonStyle::Primary,
            disable_confirm: false,
        }
    }
}

/// Per-call overrides; unset fields keep the [`ConfirmDialog`] defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
    pub confirm_button: Option<ButtonStyle>,
    pub disable_confirm: Option<bool>,
}

impl ConfirmOptions {
    fn resolve(self) -> ConfirmDialog {
        let defaults = ConfirmDialog::default();
        ConfirmDialog {
            title: self.title.unwrap_or(defaults.title),
            message: self.message.unwrap_or(defaults.message),
            confirm_text: self.confirm_text.unwrap_or(defaults.confirm_text),
            cancel_text: self.cancel_text.unwrap_or(defaults.cancel_text),
            confirm_button: self.confirm_button.unwrap_or(defaults.confirm_button),
            disable_confirm: self.disable_confirm.unwrap_or(defaults.disable_confirm),
        }
    }
}

/// How the user closed the modal without confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Backdrop,
    Escape,
    Cancel,
}

/// Modal presentation layer.
#[async_trait]
pub trait ModalPrompt: Send + Sync + 'static {
    /// Shows the dialog and resolves when it closes.
    async fn open(&self, dialog: ConfirmDialog) -> Result<(), Dismissal>;
}

/// Outcome of a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Confirmation::Confirmed
    }
}

/// Async yes/no gate over a [`ModalPrompt`].
#[derive(Clone)]
pub struct ConfirmationGate {
    prompt: Arc<dyn ModalPrompt>,
}

impl ConfirmationGate {
    pub fn new(prompt: Arc<dyn ModalPrompt>) -> Self {
        Self { prompt }
    }

    pub async fn confirm(&self, options: ConfirmOptions) -> Confirmation {
        let dialog = options.resolve();
        let locked = dialog.disable_confirm;
        match self.prompt.open(dialog).await {
            Ok(()) if locked => {
                debug!("Confirm action is disabled, treating as cancelled");
                Confirmation::Cancelled
            }
            Ok(()) => Confirmation::Confirmed,
            Err(dismissal) => {
                debug!(?dismissal, "Dismissed");
                Confirmation::Cancelled
            }
        }
    }

    /// Destructive-action confirmation naming the item about to be deleted.
    pub async fn confirm_delete(&self, item_name: &str, disable_confirm: bool) -> Confirmation {
        self.confirm(ConfirmOptions {
            title: Some("Delete".to_string()),
            message: Some(format!(
                "Are you sure you want to delete \"{item_name}\"? This cannot be undone."
            )),
            confirm_text: Some("Delete".to_string()),
            cancel_text: Some("Cancel".to_string()),
            confirm_button: Some(ButtonStyle::Danger),
            disable_confirm: Some(disable_confirm),
        })
        .await
    }
}

/// Prompt that answers every dialog the same way. Handy for headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt(pub Result<(), Dismissal>);

#[async_trait]
impl ModalPrompt for FixedPrompt {
    async fn open(&self, _dialog: ConfirmDialog) -> Result<(), Dismissal> {
        self.0
    }
}
