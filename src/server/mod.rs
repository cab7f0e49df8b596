//! External server process: spawn/stop, stdin relay, stdout subscription,
//! and the lifecycle controller that guards transitions.

pub mod events;
pub mod lifecycle;
pub mod process;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::mpsc;

use crate::error::{DispatchError, LifecycleError};

pub use events::{scan_line, GameEvent};
pub use lifecycle::LifecycleController;
pub use process::HldsProcess;

/// Bound on in-flight output lines between the reader and the consumer loop.
pub const OUTPUT_CHANNEL_CAPACITY: usize = 1024;

/// Boundary to the external process manager.
pub trait ProcessManager: Send + Sync {
    fn start(&self) -> BoxFuture<'static, Result<(), LifecycleError>>;
    fn stop(&self) -> BoxFuture<'static, Result<(), LifecycleError>>;
    fn send_input(&self, line: String) -> BoxFuture<'static, Result<(), DispatchError>>;

    /// Open the single output subscription for this session, replacing any
    /// previous one.
    fn subscribe_output(&self) -> OutputSubscription;
}

/// Producer half of an output subscription, held by the reader thread.
#[derive(Clone)]
pub struct OutputSink {
    tx: mpsc::Sender<String>,
    active: Arc<AtomicBool>,
}

impl OutputSink {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Deliver one line, blocking the reader thread if the consumer lags.
    /// Returns false once the subscription was torn down; nothing is
    /// delivered after that point.
    pub fn deliver(&self, line: String) -> bool {
        if !self.is_active() {
            return false;
        }
        self.tx.blocking_send(line).is_ok()
    }
}

/// Consumer half of an output subscription, drained by the session view.
pub struct OutputSubscription {
    rx: mpsc::Receiver<String>,
    active: Arc<AtomicBool>,
}

impl OutputSubscription {
    /// Create a connected sink/subscription pair over a bounded channel.
    pub fn channel(capacity: usize) -> (OutputSink, OutputSubscription) {
        let (tx, rx) = mpsc::channel(capacity);
        let active = Arc::new(AtomicBool::new(true));
        (
            OutputSink {
                tx,
                active: Arc::clone(&active),
            },
            OutputSubscription { rx, active },
        )
    }

    /// Non-blocking poll for the next buffered line.
    pub fn try_next(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Tear the subscription down. Lines already sent but not yet drained
    /// are discarded and no further delivery happens.
    pub fn unsubscribe(mut self) {
        self.active.store(false, Ordering::Relaxed);
        self.rx.close();
    }
}
