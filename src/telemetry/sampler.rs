//! Periodic telemetry sampler.
//!
//! One provider call per tick. A failed tick is logged and swallowed; the
//! timer keeps running. The handle must be stopped exactly once when the
//! telemetry view goes away, otherwise the task runs with no observer.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::telemetry::MetricsProvider;
use crate::ui::controller::ConsoleEvent;

/// Default sampling period.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

pub struct TelemetrySampler;

pub struct SamplerHandle {
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl SamplerHandle {
    /// Tear the sampler down. Returns the task handle so callers that need
    /// to synchronize on shutdown can await it.
    pub fn stop(self) -> tokio::task::JoinHandle<()> {
        let _ = self.shutdown.send(true);
        self.task
    }
}

impl TelemetrySampler {
    /// Spawn the sampling task. Samples flow to the consumer loop through
    /// the event channel; the returned handle is the teardown contract.
    pub fn spawn(
        mut provider: Box<dyn MetricsProvider>,
        events: mpsc::Sender<ConsoleEvent>,
        period: Duration,
    ) -> SamplerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match provider.sample() {
                            Ok(snapshot) => {
                                if events.send(ConsoleEvent::Telemetry(snapshot)).await.is_err() {
                                    break;
                                }
                            }
                            // Transient miss: log and keep ticking.
                            Err(e) => log::warn!("Telemetry sample failed: {}", e),
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });
        SamplerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}
