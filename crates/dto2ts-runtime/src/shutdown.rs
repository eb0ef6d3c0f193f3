//! Pool shutdown signalling

use std::sync::Arc;
use tokio::sync::watch;

/// Handle for stopping a pool; clones share the same state
#[derive(Clone)]
pub struct ShutdownHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Trigger shutdown; later calls are no-ops
    pub fn trigger(&self) {
        self.sender.send_if_modified(|triggered| {
            let first = !*triggered;
            *triggered = true;
            first
        });
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// A receiver side that queued jobs consult before starting
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a [`ShutdownHandle`]
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Non-blocking check
    pub fn is_triggered(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Wait for shutdown; returns immediately if already triggered
    pub async fn wait(&mut self) {
        // an error means every handle is gone, which also ends the pool
        let _ = self.receiver.wait_for(|triggered| *triggered).await;
    }
}
