/// Starts a timer keyed after the invoking module and line, returns
/// `(started, key)`.
/// ```
/// use timelog::registry::TimerRegistry;
/// let timers = TimerRegistry::new();
/// let (started, key) = timelog::timer_start!(timers);
/// assert!(started);
/// assert!(timers.stop(&key).is_some());
/// ```
#[macro_export]
macro_rules! timer_start {
    ($registry:expr) => {
        $registry.start_auto(module_path!(), line!())
    };
}
