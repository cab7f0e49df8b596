//! Host telemetry: a periodic sampler feeding a bounded sliding window.

pub mod provider;
pub mod sampler;

use std::collections::VecDeque;

use crate::models::TelemetrySample;

pub use provider::{MetricsProvider, SysinfoProvider};
pub use sampler::{SamplerHandle, TelemetrySampler};

/// How many samples the sliding window retains.
pub const TELEMETRY_WINDOW_CAPACITY: usize = 20;

/// Fixed-capacity sliding buffer of the most recent samples, oldest evicted
/// first. Owned by the consumer loop; read-only to the views.
pub struct TelemetryWindow {
    samples: VecDeque<TelemetrySample>,
    capacity: usize,
}

impl TelemetryWindow {
    pub fn new(capacity: usize) -> Self {
        TelemetryWindow {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, sample: TelemetrySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TelemetrySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for TelemetryWindow {
    fn default() -> Self {
        TelemetryWindow::new(TELEMETRY_WINDOW_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn sample(cpu: f32) -> TelemetrySample {
        TelemetrySample {
            timestamp: Local::now(),
            cpu_percent: cpu,
            ram_percent: 0.0,
            net_down_bytes_per_sec: 0,
            net_up_bytes_per_sec: 0,
        }
    }

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut window = TelemetryWindow::default();
        for i in 0..100 {
            window.push(sample(i as f32));
        }
        assert_eq!(window.len(), TELEMETRY_WINDOW_CAPACITY);
    }

    #[test]
    fn test_fifo_eviction_keeps_arrival_order() {
        let mut window = TelemetryWindow::default();
        for i in 1..=25 {
            window.push(sample(i as f32));
        }
        // After 25 pushes the window holds exactly samples 6..=25.
        let kept: Vec<f32> = window.iter().map(|s| s.cpu_percent).collect();
        let expected: Vec<f32> = (6..=25).map(|i| i as f32).collect();
        assert_eq!(kept, expected);
        assert_eq!(window.latest().unwrap().cpu_percent, 25.0);
    }
}
