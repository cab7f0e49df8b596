//! Command relay: operator input into the server process.
//!
//! The local echo is appended before the dispatch outcome is known and is
//! never retracted on failure; the operator learns about delivery problems
//! from the notification sink, not from the transcript.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::console::ConsoleSession;
use crate::error::DispatchError;
use crate::models::Origin;
use crate::server::ProcessManager;
use crate::ui::controller::ConsoleEvent;

pub struct CommandRelay {
    manager: Arc<dyn ProcessManager>,
    events: tokio::sync::mpsc::Sender<ConsoleEvent>,
    timeout: Option<Duration>,
}

impl CommandRelay {
    pub fn new(
        manager: Arc<dyn ProcessManager>,
        events: tokio::sync::mpsc::Sender<ConsoleEvent>,
        timeout: Option<Duration>,
    ) -> Self {
        CommandRelay {
            manager,
            events,
            timeout,
        }
    }

    /// Submit one operator command.
    ///
    /// Empty or whitespace-only input is rejected as a no-op and `false` is
    /// returned. Otherwise the echo entry is appended synchronously, the raw
    /// text is forwarded to the process on a background task, and `true` is
    /// returned so the caller clears the input field in both outcomes.
    pub fn submit(&self, session: &mut ConsoleSession, input: &str) -> bool {
        if input.trim().is_empty() {
            return false;
        }

        let echo = format!("[{}] > {}", Local::now().format("%H:%M:%S"), input);
        session.append(echo, Origin::Local);

        let manager = Arc::clone(&self.manager);
        let events = self.events.clone();
        let timeout = self.timeout;
        let line = input.to_string();
        tokio::spawn(async move {
            let call = manager.send_input(line);
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or(Err(DispatchError::TimedOut)),
                None => call.await,
            };
            if let Err(e) = result {
                log::warn!("Command dispatch failed: {}", e);
                let _ = events
                    .send(ConsoleEvent::DispatchFailed(e.user_message()))
                    .await;
            }
        });
        true
    }
}
