use std::fmt;
use std::time::{Duration, Instant};

/// Unit used when rendering a duration into a log line, default set as milliseconds
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// raw clock ticks, nanoseconds of the monotonic clock
    Ticks,
    #[default]
    Milliseconds,
}

impl Granularity {
    pub fn render(self, duration: Duration) -> DurationValue {
        match self {
            Granularity::Ticks => DurationValue::Ticks(duration.as_nanos()),
            Granularity::Milliseconds => DurationValue::Milliseconds(as_millis_f64(duration)),
        }
    }
}

impl AsRef<str> for Granularity {
    fn as_ref(&self) -> &str {
        match self {
            Granularity::Ticks => "ticks",
            Granularity::Milliseconds => "milliseconds",
        }
    }
}

/// Duration as it appears in an elapsed log line
/// ```
/// use timelog::model::timer::{DurationValue, Granularity};
/// use std::time::Duration;
/// let value = Granularity::Milliseconds.render(Duration::from_micros(1500));
/// assert_eq!(value, DurationValue::Milliseconds(1.5));
/// assert_eq!(value.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationValue {
    Ticks(u128),
    Milliseconds(f64),
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DurationValue::Ticks(ticks) => write!(f, "{ticks}"),
            DurationValue::Milliseconds(ms) => write!(f, "{ms}"),
        }
    }
}

pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Per key state: running flag, time accumulated over finished spans and
/// the instant the current span began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    running: bool,
    elapsed: Duration,
    started_at: Option<Instant>,
}

impl Timer {
    /// Constructs a [`Timer`] already running from `now`.
    pub fn started(now: Instant) -> Self {
        Self {
            running: true,
            elapsed: Duration::ZERO,
            started_at: Some(now),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Accumulated time, counting the in-flight span up to `now` if running.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match self.started_at {
            Some(started_at) if self.running => {
                self.elapsed + now.saturating_duration_since(started_at)
            }
            _ => self.elapsed,
        }
    }

    // return false when already running, keeps elapsed
    pub fn start(&mut self, now: Instant) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.started_at = Some(now);
        true
    }

    /// Ends the current span and returns its length, the span is also added
    /// to the accumulated time. `None` when not running.
    pub fn stop(&mut self, now: Instant) -> Option<Duration> {
        let started_at = match self.started_at {
            Some(started_at) if self.running => started_at,
            _ => return None,
        };
        let span = now.saturating_duration_since(started_at);
        self.elapsed += span;
        self.running = false;
        self.started_at = None;
        Some(span)
    }

    pub fn reset(&mut self) {
        *self = Timer::default();
    }

    pub fn restart(&mut self, now: Instant) {
        *self = Timer::started(now);
    }
}

/// Point in time copy of one registry entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub key: String,
    pub running: bool,
    pub elapsed: Duration,
}
