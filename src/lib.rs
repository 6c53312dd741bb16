/// Config file loading
pub mod config;
/// Crate error for the fallible surfaces, timing itself never fails
pub mod error;
/// Process wide registry declared with lazy_static!. Refrain from overusing it, pass a registry instead
pub mod global;
/// Logger adapter trait, log facade implementation and logger intialization
pub mod logger;
/// Auto keyed timer macro
pub mod macros;
/// Plain data: timer state, granularity and config
pub mod model;
/// Thread safe named timer registry
pub mod registry;

pub use logger::{LogLogger, TimeLogger};
pub use model::timer::{DurationValue, Granularity};
pub use registry::{StopOptions, TimerRegistry};
