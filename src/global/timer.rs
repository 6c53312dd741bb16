use crate::logger::LogLogger;
use crate::registry::TimerRegistry;
use std::sync::Arc;
use std::time::Duration;

// static timers for global access, reported through the log facade
lazy_static::lazy_static! {
    pub static ref TIMERS: TimerRegistry = TimerRegistry::with_logger(Arc::new(LogLogger::default()));
}

/// start a global timer
pub fn start(name: &str) -> bool {
    TIMERS.start(name)
}

/// stop a global timer, logs and returns the accumulated time
pub fn stop(name: &str) -> Option<Duration> {
    TIMERS.stop(name)
}

/// reads a global timer without stopping it
pub fn elapsed(name: &str) -> Option<Duration> {
    TIMERS.elapsed(name)
}

pub fn reset(name: &str) -> bool {
    TIMERS.reset(name)
}

pub fn restart(name: &str) -> bool {
    TIMERS.restart(name)
}

pub fn remove(name: &str) -> bool {
    TIMERS.remove(name)
}

pub fn list_keys() -> Vec<String> {
    TIMERS.list_keys()
}

pub fn log_summary() {
    TIMERS.log_summary()
}
