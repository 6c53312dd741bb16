use crate::model::config::DEFAULT_LOG_TARGET;
use crate::model::timer::DurationValue;
use env_logger::Builder;
use log::SetLoggerError;
use std::io::Write;

/// Sink the registry reports to. Implementations handle their own failures,
/// the registry never looks at the outcome of a call.
pub trait TimeLogger: Send + Sync {
    /// `"{label}: {key} timer started"`
    fn log_info_start(&self, label: &str, key: &str);
    /// `"{label}: {key} {value}"`
    fn log_info_elapsed(&self, label: &str, key: &str, value: DurationValue);
    /// multi line timer listing, one record
    fn log_info_summary(&self, summary: &str);
}

/// [`TimeLogger`] on top of the `log` facade, records go out at info level
#[derive(Debug, Clone)]
pub struct LogLogger {
    target: String,
}

impl LogLogger {
    pub fn new(target: impl Into<String>) -> Self {
        LogLogger {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogLogger {
    fn default() -> Self {
        LogLogger::new(DEFAULT_LOG_TARGET)
    }
}

impl TimeLogger for LogLogger {
    fn log_info_start(&self, label: &str, key: &str) {
        log::info!(target: self.target.as_str(), "{label}: {key} timer started");
    }

    fn log_info_elapsed(&self, label: &str, key: &str, value: DurationValue) {
        log::info!(target: self.target.as_str(), "{label}: {key} {value}");
    }

    fn log_info_summary(&self, summary: &str) {
        log::info!(target: self.target.as_str(), "{summary}");
    }
}

fn builder() -> Builder {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}]: {}",
                chrono::Local::now().format("%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .parse_default_env();
    builder
}

/// terminal logger, RUST_LOG overrides the info default. Panics if a logger is already set.
pub fn log_init() {
    builder().init();
}

pub fn try_log_init() -> Result<(), SetLoggerError> {
    builder().try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        assert_eq!(LogLogger::default().target(), "timelog");
        assert_eq!(LogLogger::new("bench").target(), "bench");
    }

    #[test]
    fn test_log_without_subscriber() {
        // records are dropped silently when no logger is installed
        let logger = LogLogger::default();
        logger.log_info_start("TIMELOG", "k");
        logger.log_info_elapsed("TIMELOG_ELAPSED", "k", DurationValue::Ticks(42));
        logger.log_info_summary("k\n0.042");
    }

    #[test]
    fn test_try_log_init_twice() {
        let _ = try_log_init();
        assert!(try_log_init().is_err());
    }
}
