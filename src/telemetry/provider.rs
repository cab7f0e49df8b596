//! Metrics providers.
//!
//! `SysinfoProvider` is the production implementation: global CPU usage,
//! RAM percentage, and per-interface network byte deltas against the
//! previous sample's cumulative counters.

use std::collections::HashMap;

use chrono::Local;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::MetricsError;
use crate::models::{MetricsSnapshot, SystemIdentity, TelemetrySample};

pub trait MetricsProvider: Send {
    fn sample(&mut self) -> Result<MetricsSnapshot, MetricsError>;
}

pub struct SysinfoProvider {
    system: System,
    /// Cumulative (received, transmitted) totals per interface from the
    /// previous sample; the first tick reports zero rates.
    previous_totals: HashMap<String, (u64, u64)>,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        SysinfoProvider {
            system: System::new_with_specifics(
                RefreshKind::nothing()
                    .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                    .with_memory(MemoryRefreshKind::everything()),
            ),
            previous_totals: HashMap::new(),
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        SysinfoProvider::new()
    }
}

impl MetricsProvider for SysinfoProvider {
    fn sample(&mut self) -> Result<MetricsSnapshot, MetricsError> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let networks = Networks::new_with_refreshed_list();
        let mut net_down = 0u64;
        let mut net_up = 0u64;
        for (interface, data) in networks.iter() {
            let current = (data.total_received(), data.total_transmitted());
            if let Some((prev_down, prev_up)) = self.previous_totals.get(interface) {
                net_down += current.0.saturating_sub(*prev_down);
                net_up += current.1.saturating_sub(*prev_up);
            }
            self.previous_totals.insert(interface.clone(), current);
        }

        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(MetricsError::Unavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        let ram_percent = (self.system.used_memory() as f32 / total_memory as f32) * 100.0;

        Ok(MetricsSnapshot {
            sample: TelemetrySample {
                timestamp: Local::now(),
                cpu_percent: self.system.global_cpu_usage(),
                ram_percent,
                net_down_bytes_per_sec: net_down,
                net_up_bytes_per_sec: net_up,
            },
            identity: SystemIdentity {
                system_name: System::name(),
                kernel_version: System::kernel_version(),
                os_version: System::os_version(),
                host_name: System::host_name(),
            },
        })
    }
}
