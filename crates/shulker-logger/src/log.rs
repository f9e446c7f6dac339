use once_cell::sync::OnceCell;

use crate::severity::LogSeverity;
use crate::systime::now;

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the minimum severity that gets printed. Only the first call wins;
/// returns false if a level was already set.
pub fn init(min: LogSeverity) -> bool {
    MIN_SEVERITY.set(min).is_ok()
}

/// The active minimum severity, `Info` until [`init`] is called.
pub fn min_severity() -> LogSeverity {
    MIN_SEVERITY.get().copied().unwrap_or_default()
}

pub fn enabled(log_severity: LogSeverity) -> bool {
    log_severity >= min_severity()
}

pub fn format_line(msg: &str, log_severity: LogSeverity) -> String {
    format!("[{}] {} {}", log_severity, now(), msg)
}

pub fn log(msg: String, log_severity: LogSeverity) {
    if !enabled(log_severity) {
        return;
    }
    match log_severity {
        LogSeverity::Error | LogSeverity::Fatal => eprintln!("{}", format_line(&msg, log_severity)),
        _ => println!("{}", format_line(&msg, log_severity)),
    }
}
