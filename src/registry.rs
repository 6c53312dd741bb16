use crate::logger::TimeLogger;
use crate::model::config::{Config, DEFAULT_RESULT_LABEL, DEFAULT_START_LABEL};
use crate::model::timer::{as_millis_f64, Granularity, Timer, TimerSnapshot};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

pub const DEFAULT_SHARDS: usize = 16;

type Shard = RwLock<HashMap<String, Timer>>;

/// How a stop call behaves, default logs the result and keeps the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOptions {
    pub emit_log: bool,
    pub remove: bool,
    /// `None` falls back to the registry granularity
    pub granularity: Option<Granularity>,
}

impl Default for StopOptions {
    fn default() -> Self {
        StopOptions {
            emit_log: true,
            remove: false,
            granularity: None,
        }
    }
}

/// Key to use when the caller does not name its timer
pub fn caller_key(caller: &str, line: u32) -> String {
    format!("{caller}:{line}")
}

/// Thread safe collection of named timers.
///
/// Keys are spread over a fixed set of shards, each behind its own lock, so
/// operations on one key only ever serialize with keys of the same shard.
/// The logger is called after the shard lock has been released.
///
/// ```
/// use timelog::registry::TimerRegistry;
/// let timers = TimerRegistry::new();
/// assert!(timers.start("load"));
/// assert!(!timers.start("load"));
/// assert!(timers.stop("load").is_some());
/// assert_eq!(timers.list_keys(), vec!["load".to_string()]);
/// ```
pub struct TimerRegistry {
    shards: Box<[Shard]>,
    start_label: String,
    result_label: String,
    granularity: Granularity,
    logger: Option<Arc<dyn TimeLogger>>,
}

impl TimerRegistry {
    /// Registry without a logger, timing works but nothing is ever logged.
    pub fn new() -> Self {
        TimerRegistry {
            shards: (0..DEFAULT_SHARDS).map(|_| Shard::default()).collect(),
            start_label: DEFAULT_START_LABEL.to_string(),
            result_label: DEFAULT_RESULT_LABEL.to_string(),
            granularity: Granularity::default(),
            logger: None,
        }
    }

    pub fn with_logger(logger: Arc<dyn TimeLogger>) -> Self {
        TimerRegistry {
            logger: Some(logger),
            ..TimerRegistry::new()
        }
    }

    pub fn from_config(config: &Config, logger: Option<Arc<dyn TimeLogger>>) -> Self {
        TimerRegistry {
            logger,
            ..TimerRegistry::new()
        }
        .labels(config.start_label.clone(), config.result_label.clone())
        .granularity(config.granularity)
    }

    /// Overrides the start and elapsed log prefixes.
    pub fn labels(mut self, start: impl Into<String>, result: impl Into<String>) -> Self {
        self.start_label = start.into();
        self.result_label = result.into();
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Rebuilds the (empty) shard table with `count` shards, at least one.
    pub fn shards(mut self, count: usize) -> Self {
        self.shards = (0..count.max(1)).map(|_| Shard::default()).collect();
        self
    }

    pub fn start_label(&self) -> &str {
        &self.start_label
    }

    pub fn result_label(&self) -> &str {
        &self.result_label
    }

    fn shard(&self, key: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    // Timer updates are single assignments, a poisoned shard is still consistent
    fn write(&self, key: &str) -> RwLockWriteGuard<'_, HashMap<String, Timer>> {
        self.shard(key)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read(shard: &Shard) -> RwLockReadGuard<'_, HashMap<String, Timer>> {
        shard.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_timer(&self, key: &str) -> Option<Timer> {
        Self::read(self.shard(key)).get(key).copied()
    }

    /// Starts the timer for `key`, creating it when absent. A stopped timer
    /// resumes and keeps its accumulated time. Returns false when it was
    /// already running.
    pub fn start(&self, key: &str) -> bool {
        self.start_with(key, true)
    }

    pub fn start_no_log(&self, key: &str) -> bool {
        self.start_with(key, false)
    }

    pub fn start_with(&self, key: &str, emit_log: bool) -> bool {
        let now = Instant::now();
        let started = {
            let mut timers = self.write(key);
            match timers.get_mut(key) {
                Some(timer) => timer.start(now),
                None => {
                    timers.insert(key.to_string(), Timer::started(now));
                    true
                }
            }
        };
        if !started {
            log::debug!("timer [{key:?}] is already running");
            return false;
        }
        if emit_log {
            if let Some(logger) = &self.logger {
                logger.log_info_start(&self.start_label, key);
            }
        }
        true
    }

    /// Starts a timer keyed after the call site, see [`caller_key`] and
    /// [`timer_start!`](crate::timer_start).
    pub fn start_auto(&self, caller: &str, line: u32) -> (bool, String) {
        let key = caller_key(caller, line);
        (self.start(&key), key)
    }

    /// Stops a running timer and returns the time since its last start,
    /// logged in the registry granularity. The span is added to the
    /// accumulated time seen by [`elapsed`](Self::elapsed). `None` when
    /// absent or not running.
    pub fn stop(&self, key: &str) -> Option<Duration> {
        self.stop_with(key, StopOptions::default())
    }

    pub fn stop_no_log(&self, key: &str) -> Option<Duration> {
        self.stop_with(
            key,
            StopOptions {
                emit_log: false,
                ..StopOptions::default()
            },
        )
    }

    pub fn stop_and_remove(&self, key: &str) -> Option<Duration> {
        self.stop_with(
            key,
            StopOptions {
                remove: true,
                ..StopOptions::default()
            },
        )
    }

    pub fn stop_and_remove_no_log(&self, key: &str) -> Option<Duration> {
        self.stop_with(
            key,
            StopOptions {
                emit_log: false,
                remove: true,
                granularity: None,
            },
        )
    }

    pub fn stop_with(&self, key: &str, options: StopOptions) -> Option<Duration> {
        let now = Instant::now();
        let elapsed = {
            let mut timers = self.write(key);
            let elapsed = timers.get_mut(key).and_then(|timer| timer.stop(now));
            if elapsed.is_some() && options.remove {
                timers.remove(key);
            }
            elapsed
        };
        let Some(elapsed) = elapsed else {
            log::debug!("timer [{key:?}] is not found or not running");
            return None;
        };
        if options.emit_log {
            if let Some(logger) = &self.logger {
                let granularity = options.granularity.unwrap_or(self.granularity);
                logger.log_info_elapsed(&self.result_label, key, granularity.render(elapsed));
            }
        }
        Some(elapsed)
    }

    /// Clears the accumulated time and stops the timer, whatever its state.
    pub fn reset(&self, key: &str) -> bool {
        match self.write(key).get_mut(key) {
            Some(timer) => {
                timer.reset();
                true
            }
            None => false,
        }
    }

    /// Clears the accumulated time and starts over. Unlike [`start`](Self::start)
    /// it never creates the timer.
    pub fn restart(&self, key: &str) -> bool {
        let now = Instant::now();
        match self.write(key).get_mut(key) {
            Some(timer) => {
                timer.restart(now);
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        self.write(key).remove(key).is_some()
    }

    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
    }

    /// Accumulated time, including the current span of a running timer.
    pub fn elapsed(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.read_timer(key).map(|timer| timer.elapsed_at(now))
    }

    pub fn is_running(&self, key: &str) -> Option<bool> {
        self.read_timer(key).map(|timer| timer.is_running())
    }

    pub fn contains(&self, key: &str) -> bool {
        Self::read(self.shard(key)).contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| Self::read(shard).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| Self::read(shard).is_empty())
    }

    /// All keys, ascending. Each shard is copied under its own read lock.
    pub fn list_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .shards
            .iter()
            .flat_map(|shard| Self::read(shard).keys().cloned().collect::<Vec<_>>())
            .collect();
        keys.sort();
        keys
    }

    /// Copy of every timer sorted by key, running timers counted up to now.
    pub fn snapshot(&self) -> Vec<TimerSnapshot> {
        let now = Instant::now();
        let mut snapshot: Vec<TimerSnapshot> = Vec::with_capacity(self.len());
        for shard in self.shards.iter() {
            let timers = Self::read(shard);
            snapshot.extend(timers.iter().map(|(key, timer)| TimerSnapshot {
                key: key.clone(),
                running: timer.is_running(),
                elapsed: timer.elapsed_at(now),
            }));
        }
        snapshot.sort_by(|a, b| a.key.cmp(&b.key));
        snapshot
    }

    /// `"{key}\n{elapsed ms}\n\n"` stanzas, longest timer first and equal
    /// times by key, with the blank line after the last stanza cut so the
    /// text ends on its elapsed value. `None` when there are no timers.
    pub fn summary(&self) -> Option<String> {
        let mut snapshot = self.snapshot();
        if snapshot.is_empty() {
            return None;
        }
        // stable sort keeps the key order of equal times
        snapshot.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));
        let mut summary = String::new();
        for timer in snapshot.iter() {
            summary.push_str(&format!("{}\n{}\n\n", timer.key, as_millis_f64(timer.elapsed)));
        }
        summary.truncate(summary.len() - "\n\n".len());
        Some(summary)
    }

    /// Writes [`summary`](Self::summary) as a single record. No-op without a logger.
    pub fn log_summary(&self) {
        let Some(logger) = &self.logger else {
            return;
        };
        if let Some(summary) = self.summary() {
            logger.log_info_summary(&summary);
        }
    }
}

impl Default for TimerRegistry {
    fn default() -> Self {
        TimerRegistry::new()
    }
}

impl fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("timers", &self.len())
            .field("shards", &self.shards.len())
            .field("start_label", &self.start_label)
            .field("result_label", &self.result_label)
            .field("granularity", &self.granularity)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
