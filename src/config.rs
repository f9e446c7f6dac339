use serde::Deserialize;
use shulker_common::{Result, ShulkerError};
use shulker_logger::LogSeverity;
use std::path::Path;

/// What a batch scan does when a record fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Report the failure in the column's report and keep going.
    #[default]
    Skip,
    /// Yield the failing column's report, then end the scan.
    Abort,
}

/// Options for [`scan`](crate::scan::scan).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub error_policy: ErrorPolicy,
    /// Decode sub-chunks as well as surface records.
    pub include_subchunks: bool,
    pub log_level: LogSeverity,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Skip,
            include_subchunks: true,
            log_level: LogSeverity::Info,
        }
    }
}

impl ScanOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ShulkerError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Installs `log_level` as the process log level. Only the first call
    /// in a process takes effect.
    pub fn apply_log_level(&self) -> bool {
        shulker_logger::init(self.log_level)
    }
}
