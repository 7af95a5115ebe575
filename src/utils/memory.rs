//! Process memory probe.

use serde::Serialize;

/// Point-in-time view of the process memory footprint.
///
/// Fields are `None` on platforms where the value cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemorySnapshot {
    /// Resident set size in bytes.
    pub rss_bytes: Option<u64>,
    /// Total virtual memory size in bytes.
    pub virtual_bytes: Option<u64>,
}

impl MemorySnapshot {
    /// Reads the current process memory usage.
    ///
    /// On Linux this parses `/proc/self/statm` (values in pages) and scales by
    /// the kernel page size. Other platforms return an empty snapshot.
    pub fn capture() -> Self {
        #[cfg(target_os = "linux")]
        {
            read_statm().unwrap_or_default()
        }

        #[cfg(not(target_os = "linux"))]
        {
            Self::default()
        }
    }

    /// Resident size in megabytes, rounded to two decimals.
    pub fn rss_mb(&self) -> Option<f64> {
        self.rss_bytes.map(to_mb)
    }

    /// Virtual size in megabytes, rounded to two decimals.
    pub fn virtual_mb(&self) -> Option<f64> {
        self.virtual_bytes.map(to_mb)
    }
}

fn to_mb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

#[cfg(target_os = "linux")]
fn read_statm() -> Option<MemorySnapshot> {
    use std::ffi::{c_int, c_long};

    unsafe extern "C" {
        fn sysconf(name: c_int) -> c_long;
    }
    // _SC_PAGESIZE on Linux
    const SC_PAGESIZE: c_int = 30;

    let content = std::fs::read_to_string("/proc/self/statm").ok()?;
    let (size, resident) = parse_statm(&content)?;

    // SAFETY: sysconf has no preconditions and only reads a system constant.
    let page_size = unsafe { sysconf(SC_PAGESIZE) };
    if page_size <= 0 {
        return None;
    }
    let page_size = page_size as u64;

    Some(MemorySnapshot {
        rss_bytes: Some(resident * page_size),
        virtual_bytes: Some(size * page_size),
    })
}

/// Extracts `(size, resident)` page counts from a statm line.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_statm(content: &str) -> Option<(u64, u64)> {
    let mut fields = content.split_whitespace();
    let size = fields.next()?.parse().ok()?;
    let resident = fields.next()?.parse().ok()?;
    Some((size, resident))
}
