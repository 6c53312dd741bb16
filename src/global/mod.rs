/// global
/// Everything declared with lazy_statics! should come here.
/// Prefer owning a TimerRegistry and passing it around, this is for ad hoc instrumentation.
pub mod timer;
