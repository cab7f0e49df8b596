//! Lifecycle controller: user-invoked Stopped ⇄ Running transitions.
//!
//! A single atomic transition lock makes re-entrant toggles a no-op while a
//! transition is outstanding. The believed run state advances only after
//! the external call was acknowledged; a failure leaves it untouched. There
//! is no reconciliation poll, so the displayed state can drift if the
//! process dies through other means.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::LifecycleError;
use crate::models::ServerRunState;
use crate::server::ProcessManager;
use crate::ui::controller::ConsoleEvent;

/// Releases the transition lock on every exit path, panics included.
struct TransitionLock(Arc<AtomicBool>);

impl Drop for TransitionLock {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct LifecycleController {
    manager: Arc<dyn ProcessManager>,
    state: Arc<RwLock<ServerRunState>>,
    in_transition: Arc<AtomicBool>,
    events: mpsc::Sender<ConsoleEvent>,
    timeout: Option<Duration>,
}

impl LifecycleController {
    pub fn new(
        manager: Arc<dyn ProcessManager>,
        events: mpsc::Sender<ConsoleEvent>,
        timeout: Option<Duration>,
    ) -> Self {
        LifecycleController {
            manager,
            state: Arc::new(RwLock::new(ServerRunState::Stopped)),
            in_transition: Arc::new(AtomicBool::new(false)),
            events,
            timeout,
        }
    }

    /// Believed run state of the server process.
    pub fn run_state(&self) -> ServerRunState {
        *self.state.read().expect("run state lock")
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_transition.load(Ordering::SeqCst)
    }

    /// Request the opposite run state. A no-op while a transition is
    /// outstanding.
    pub fn toggle(&self) {
        if self.in_transition.swap(true, Ordering::SeqCst) {
            log::debug!("Lifecycle toggle ignored: transition in flight");
            return;
        }
        let lock = TransitionLock(Arc::clone(&self.in_transition));

        let manager = Arc::clone(&self.manager);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let _lock = lock;
            let target = state.read().expect("run state lock").toggled();
            let call = match target {
                ServerRunState::Running => manager.start(),
                ServerRunState::Stopped => manager.stop(),
            };
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or(Err(LifecycleError::TimedOut)),
                None => call.await,
            };
            match result {
                Ok(()) => {
                    *state.write().expect("run state lock") = target;
                    let _ = events.send(ConsoleEvent::RunState(target)).await;
                }
                Err(e) => {
                    log::error!("Lifecycle transition to {:?} failed: {}", target, e);
                    let _ = events
                        .send(ConsoleEvent::LifecycleFailed(e.user_message()))
                        .await;
                }
            }
        });
    }
}
