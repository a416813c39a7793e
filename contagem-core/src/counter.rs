//! Shared request counter.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

const UNKNOWN: &str = "unknown";

/// Process-wide counter incremented by every protected request.
///
/// Increments are a single atomic fetch-and-add, so the value returned to a
/// caller is always the one its own increment produced.
#[derive(Debug)]
pub struct Counter {
    value: AtomicI64,
    host: String,
    kernel: String,
    framework: String,
}

/// Counter value plus environment metadata, built per request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSnapshot {
    pub current_value: i64,
    pub host: String,
    pub kernel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    pub framework: String,
}

impl Counter {
    /// Creates a counter at zero, capturing host and kernel details of the
    /// running machine
    pub fn new(framework: impl Into<String>) -> Self {
        Self::with_environment(0, host_name(), kernel_info(), framework)
    }

    pub fn with_environment(
        initial: i64,
        host: impl Into<String>,
        kernel: impl Into<String>,
        framework: impl Into<String>,
    ) -> Self {
        Self {
            value: AtomicI64::new(initial),
            host: host.into(),
            kernel: kernel.into(),
            framework: framework.into(),
        }
    }

    /// Adds one and returns the new value
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Snapshot of the current value without incrementing
    pub fn snapshot(&self, greeting: Option<&str>) -> ResultSnapshot {
        self.build_snapshot(self.current(), greeting)
    }

    /// Increments and returns a snapshot holding the value this call produced
    pub fn next_snapshot(&self, greeting: Option<&str>) -> ResultSnapshot {
        let value = self.increment();
        self.build_snapshot(value, greeting)
    }

    fn build_snapshot(&self, current_value: i64, greeting: Option<&str>) -> ResultSnapshot {
        ResultSnapshot {
            current_value,
            host: self.host.clone(),
            kernel: self.kernel.clone(),
            greeting: greeting.map(str::to_string),
            framework: self.framework.clone(),
        }
    }
}

fn host_name() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .or_else(|| read_trimmed("/etc/hostname"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn kernel_info() -> String {
    match (
        read_trimmed("/proc/sys/kernel/ostype"),
        read_trimmed("/proc/sys/kernel/osrelease"),
    ) {
        (Some(os), Some(release)) => format!("{os} {release} ({})", std::env::consts::ARCH),
        _ => format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
    }
}

fn read_trimmed(path: &str) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
