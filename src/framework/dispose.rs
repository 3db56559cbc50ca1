//! # Dispose Signal
//!
//! One signal per controller. The controller's event loop and every request task it spawns
//! hold a [`DisposeSignal`]; firing the [`DisposeHandle`] (or dropping it) stops all of them,
//! so no completion can mutate the state of a torn-down screen.

use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owner side of the signal. Dropping it counts as disposing.
#[derive(Debug)]
pub struct DisposeHandle {
    sender: watch::Sender<bool>,
}

/// Observer side of the signal, cloned into every task.
#[derive(Debug, Clone)]
pub struct DisposeSignal {
    receiver: watch::Receiver<bool>,
}

/// Creates a fresh, not yet fired, signal pair.
pub fn dispose_pair() -> (DisposeHandle, DisposeSignal) {
    let (sender, receiver) = watch::channel(false);
    (DisposeHandle { sender }, DisposeSignal { receiver })
}

impl DisposeHandle {
    pub fn dispose(&self) {
        self.sender.send_replace(true);
    }
}

impl DisposeSignal {
    pub fn is_disposed(&self) -> bool {
        *self.receiver.borrow() || self.receiver.has_changed().is_err()
    }

    /// Resolves once the signal fires or its handle is dropped.
    pub async fn disposed(&mut self) {
        // Err means the handle is gone.
        let _ = self.receiver.wait_for(|fired| *fired).await;
    }

    /// Spawns `task` so that it is aborted when the signal fires.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut signal = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = signal.disposed() => {}
                _ = task => {}
            }
        })
    }
}
