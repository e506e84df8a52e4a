//! Process memory statistics from `/proc/self/status`.
//!
//! The status file is a list of `Key:\tvalue [unit]` lines. Only the
//! `Vm*` lines are used here, and their `kB` values are converted to
//! bytes. Parsing is a pure function of the text, so it is tested
//! against captured samples; reading the live file only happens in
//! [`SystemMemoryStats::read`].

use std::io;

use indexmap::IndexMap;

/// Path of the status file on Linux.
pub const STATUS_PATH: &str = "/proc/self/status";

/// Parse every numeric line of a status file into `key → value`.
///
/// Values with a `kB` unit are returned in bytes; unitless values are
/// returned as is. Lines without a numeric value (names, masks, state
/// strings) are skipped. Keys keep file order.
pub fn parse_status(text: &str) -> IndexMap<&str, u64> {
    let mut fields = IndexMap::new();
    for line in text.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let mut parts = rest.split_whitespace();
        let Some(value) = parts.next().and_then(|v| v.parse::<u64>().ok()) else {
            continue;
        };
        let value = match parts.next() {
            Some("kB") => value.saturating_mul(1024),
            _ => value,
        };
        fields.insert(key.trim(), value);
    }
    fields
}

/// Virtual-memory counters of the current process, in bytes.
///
/// Any counter missing from the source reads as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemMemoryStats {
    /// Peak virtual memory size (`VmPeak`).
    pub vm_peak: u64,
    /// Current virtual memory size (`VmSize`).
    pub vm_size: u64,
    /// Resident set size (`VmRSS`).
    pub vm_rss: u64,
    /// Peak resident set size (`VmHWM`).
    pub vm_hwm: u64,
    /// Data segment size (`VmData`).
    pub vm_data: u64,
    /// Stack size (`VmStk`).
    pub vm_stk: u64,
    /// Text segment size (`VmExe`).
    pub vm_exe: u64,
    /// Shared library code size (`VmLib`).
    pub vm_lib: u64,
}

impl SystemMemoryStats {
    /// Status keys, in the order of [`values`](Self::values).
    pub const KEYS: [&'static str; 8] = [
        "VmPeak", "VmSize", "VmRSS", "VmHWM", "VmData", "VmStk", "VmExe", "VmLib",
    ];

    /// Extract the counters from status file text.
    pub fn from_status(text: &str) -> Self {
        let fields = parse_status(text);
        let get = |key: &str| fields.get(key).copied().unwrap_or(0);
        Self {
            vm_peak: get("VmPeak"),
            vm_size: get("VmSize"),
            vm_rss: get("VmRSS"),
            vm_hwm: get("VmHWM"),
            vm_data: get("VmData"),
            vm_stk: get("VmStk"),
            vm_exe: get("VmExe"),
            vm_lib: get("VmLib"),
        }
    }

    /// Read the live counters of this process.
    ///
    /// On platforms without `/proc` every counter is zero.
    #[cfg(target_os = "linux")]
    pub fn read() -> io::Result<Self> {
        let text = std::fs::read_to_string(STATUS_PATH)?;
        Ok(Self::from_status(&text))
    }

    /// Read the live counters of this process.
    ///
    /// On platforms without `/proc` every counter is zero.
    #[cfg(not(target_os = "linux"))]
    pub fn read() -> io::Result<Self> {
        Ok(Self::default())
    }

    /// Counters in [`KEYS`](Self::KEYS) order.
    pub fn values(&self) -> [u64; 8] {
        [
            self.vm_peak,
            self.vm_size,
            self.vm_rss,
            self.vm_hwm,
            self.vm_data,
            self.vm_stk,
            self.vm_exe,
            self.vm_lib,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Name:\tchurn
Umask:\t0022
State:\tR (running)
Tgid:\t4242
VmPeak:\t   12000 kB
VmSize:\t   11800 kB
VmLck:\t       0 kB
VmHWM:\t    3000 kB
VmRSS:\t    2900 kB
VmData:\t    1500 kB
VmStk:\t     132 kB
VmExe:\t     800 kB
VmLib:\t    2100 kB
Threads:\t1
SigQ:\t0/63471
";

    #[test]
    fn parses_vm_lines_in_bytes() {
        let s = SystemMemoryStats::from_status(SAMPLE);
        assert_eq!(s.vm_peak, 12_000 * 1024);
        assert_eq!(s.vm_size, 11_800 * 1024);
        assert_eq!(s.vm_rss, 2_900 * 1024);
        assert_eq!(s.vm_hwm, 3_000 * 1024);
        assert_eq!(s.vm_data, 1_500 * 1024);
        assert_eq!(s.vm_stk, 132 * 1024);
        assert_eq!(s.vm_exe, 800 * 1024);
        assert_eq!(s.vm_lib, 2_100 * 1024);
    }

    #[test]
    fn parse_keeps_file_order_and_skips_text() {
        let fields = parse_status(SAMPLE);
        let keys: Vec<&str> = fields.keys().copied().collect();
        assert_eq!(keys[0], "Umask");
        assert_eq!(keys[1], "Tgid");
        assert!(!fields.contains_key("Name"));
        assert!(!fields.contains_key("State"));
        assert!(!fields.contains_key("SigQ"));
        assert_eq!(fields["Threads"], 1);
    }

    #[test]
    fn missing_keys_are_zero() {
        let s = SystemMemoryStats::from_status("VmRSS:\t10 kB\n");
        assert_eq!(s.vm_rss, 10_240);
        assert_eq!(s.vm_peak, 0);
        assert_eq!(SystemMemoryStats::from_status(""), SystemMemoryStats::default());
    }

    #[test]
    fn values_follow_key_order() {
        let s = SystemMemoryStats::from_status(SAMPLE);
        let values = s.values();
        assert_eq!(values[0], s.vm_peak);
        assert_eq!(values[2], s.vm_rss);
        assert_eq!(values[7], s.vm_lib);
        assert_eq!(SystemMemoryStats::KEYS[2], "VmRSS");
    }

    #[test]
    fn read_live_process() {
        let s = SystemMemoryStats::read().unwrap();
        if cfg!(target_os = "linux") {
            assert!(s.vm_size > 0);
        } else {
            assert_eq!(s, SystemMemoryStats::default());
        }
    }
}
