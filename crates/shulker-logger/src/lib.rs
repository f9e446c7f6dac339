pub mod log;
pub mod severity;
pub mod systime;

pub use log::{init, log};
pub use severity::LogSeverity;
