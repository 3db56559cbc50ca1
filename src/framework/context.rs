//! Collaborators injected into every controller when it is spawned.

use crate::framework::confirm::ConfirmationGate;
use crate::framework::feedback::{DemoMode, Notifier};
use std::sync::Arc;

/// Late-bound dependencies shared by the controllers of one console.
#[derive(Clone)]
pub struct ControllerContext {
    pub notifier: Arc<dyn Notifier>,
    pub demo: Arc<dyn DemoMode>,
    pub gate: ConfirmationGate,
    /// Capacity of each controller mailbox.
    pub mailbox: usize,
}

impl ControllerContext {
    pub fn new(notifier: Arc<dyn Notifier>, demo: Arc<dyn DemoMode>, gate: ConfirmationGate) -> Self {
        Self {
            notifier,
            demo,
            gate,
            mailbox: 32,
        }
    }

    pub fn with_mailbox(mut self, capacity: usize) -> Self {
        self.mailbox = capacity.max(1);
        self
    }

    /// True and an informational notice when demo mode blocks a mutation.
    pub fn demo_blocks(&self) -> bool {
        if self.demo.is_active() {
            self.notifier.notify(crate::framework::Notice::DemoModeRestricted);
            return true;
        }
        false
    }
}
