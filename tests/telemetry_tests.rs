//! Integration tests for the telemetry sampler and its sliding window:
//! bounded capacity, FIFO eviction, resilience to provider failures, and
//! the teardown contract.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;

use hlds_console::error::MetricsError;
use hlds_console::models::{MetricsSnapshot, SystemIdentity, TelemetrySample};
use hlds_console::telemetry::{
    MetricsProvider, TelemetrySampler, TelemetryWindow, TELEMETRY_WINDOW_CAPACITY,
};
use hlds_console::ui::controller::ConsoleEvent;

/// Provider double: numbered samples, failing where requested.
struct CountingProvider {
    tick: u32,
    fail_every: Option<u32>,
}

impl CountingProvider {
    fn new(fail_every: Option<u32>) -> Self {
        CountingProvider {
            tick: 0,
            fail_every,
        }
    }
}

impl MetricsProvider for CountingProvider {
    fn sample(&mut self) -> Result<MetricsSnapshot, MetricsError> {
        self.tick += 1;
        if let Some(n) = self.fail_every {
            if self.tick % n == 0 {
                return Err(MetricsError::Unavailable("probe offline".to_string()));
            }
        }
        Ok(MetricsSnapshot {
            sample: TelemetrySample {
                timestamp: Local::now(),
                cpu_percent: self.tick as f32,
                ram_percent: 50.0,
                net_down_bytes_per_sec: 0,
                net_up_bytes_per_sec: 0,
            },
            identity: SystemIdentity {
                system_name: Some("Linux".to_string()),
                kernel_version: Some("6.1.0".to_string()),
                os_version: Some("Test OS".to_string()),
                host_name: Some(format!("host-{}", self.tick)),
            },
        })
    }
}

async fn next_sample(rx: &mut mpsc::Receiver<ConsoleEvent>) -> MetricsSnapshot {
    match rx.recv().await {
        Some(ConsoleEvent::Telemetry(snapshot)) => snapshot,
        other => panic!("expected Telemetry event, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn window_holds_exactly_the_last_twenty_of_twenty_five_ticks() {
    let (tx, mut rx) = mpsc::channel(64);
    let handle = TelemetrySampler::spawn(
        Box::new(CountingProvider::new(None)),
        tx,
        Duration::from_secs(1),
    );

    let mut window = TelemetryWindow::default();
    for _ in 0..25 {
        window.push(next_sample(&mut rx).await.sample);
    }
    handle.stop().await.unwrap();

    assert_eq!(window.len(), TELEMETRY_WINDOW_CAPACITY);
    let kept: Vec<f32> = window.iter().map(|s| s.cpu_percent).collect();
    let expected: Vec<f32> = (6..=25).map(|i| i as f32).collect();
    assert_eq!(kept, expected);
}

#[tokio::test(start_paused = true)]
async fn a_failed_tick_never_stops_subsequent_sampling() {
    let (tx, mut rx) = mpsc::channel(64);
    // Every third provider call fails.
    let handle = TelemetrySampler::spawn(
        Box::new(CountingProvider::new(Some(3))),
        tx,
        Duration::from_secs(1),
    );

    let mut received = vec![];
    for _ in 0..6 {
        received.push(next_sample(&mut rx).await.sample.cpu_percent);
    }
    handle.stop().await.unwrap();

    // Ticks 3, 6 and 9 were swallowed; the timer kept going.
    assert_eq!(received, vec![1.0, 2.0, 4.0, 5.0, 7.0, 8.0]);
}

#[tokio::test(start_paused = true)]
async fn identity_fields_are_republished_on_every_sample() {
    let (tx, mut rx) = mpsc::channel(64);
    let handle = TelemetrySampler::spawn(
        Box::new(CountingProvider::new(None)),
        tx,
        Duration::from_secs(1),
    );

    let first = next_sample(&mut rx).await;
    let second = next_sample(&mut rx).await;
    handle.stop().await.unwrap();

    assert_eq!(first.identity.host_name.as_deref(), Some("host-1"));
    assert_eq!(second.identity.host_name.as_deref(), Some("host-2"));
    assert_eq!(second.identity.system_name.as_deref(), Some("Linux"));
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_delivery() {
    let (tx, mut rx) = mpsc::channel(64);
    let handle = TelemetrySampler::spawn(
        Box::new(CountingProvider::new(None)),
        tx,
        Duration::from_secs(1),
    );

    let _ = next_sample(&mut rx).await;
    handle.stop().await.unwrap();

    // Drain anything buffered before the stop took effect.
    while rx.try_recv().is_ok() {}

    // With the task gone, no further ticks can arrive.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());
}
