#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Resource usage of this process at the end of one export phase.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    pub phase_time: Duration,
    pub total_time: Duration,
}

#[cfg(feature = "cli")]
struct Sampler {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
    last_mark: Instant,
}

/// Samples CPU and memory of the current process between pipeline phases.
/// Disabled monitors, and hosts where the pid is unavailable, log nothing.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    sampler: Option<Mutex<Sampler>>,
    started: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let started = Instant::now();
        let sampler = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(Mutex::new(Sampler {
                    system: System::new(),
                    pid,
                    peak_memory_mb: 0,
                    last_mark: started,
                })),
                Err(e) => {
                    tracing::warn!("⚠️ Process monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self { sampler, started }
    }

    /// Samples now and starts timing the next phase.
    pub fn sample(&self) -> Option<PhaseStats> {
        let mut sampler = self.sampler.as_ref()?.lock().ok()?;
        let pid = sampler.pid;
        sampler
            .system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let (cpu_usage, memory_mb) = {
            let process = sampler.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        sampler.peak_memory_mb = sampler.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let phase_time = now.duration_since(sampler.last_mark);
        sampler.last_mark = now;

        Some(PhaseStats {
            cpu_usage,
            memory_mb,
            peak_memory_mb: sampler.peak_memory_mb,
            phase_time,
            total_time: now.duration_since(self.started),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Phase: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_mb,
                stats.peak_memory_mb,
                stats.phase_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.total_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sampler.is_some()
    }
}

#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_samples_nothing() {
        let monitor = SystemMonitor::new(false);
        assert!(!monitor.is_enabled());
        assert!(monitor.sample().is_none());
    }

    #[test]
    fn test_enabled_monitor_tracks_peak() {
        let monitor = SystemMonitor::new(true);
        if let (Some(first), Some(second)) = (monitor.sample(), monitor.sample()) {
            assert!(second.peak_memory_mb >= first.memory_mb);
            assert!(second.total_time >= first.total_time);
        }
    }
}
