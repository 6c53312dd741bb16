use crate::model::timer::Granularity;

pub const DEFAULT_START_LABEL: &str = "TIMELOG";
pub const DEFAULT_RESULT_LABEL: &str = "TIMELOG_ELAPSED";
pub const DEFAULT_LOG_TARGET: &str = "timelog";

/// Config parameters, direct representation of config.ini
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub start_label: String,
    pub result_label: String,
    pub granularity: Granularity,
    pub log_target: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_label: DEFAULT_START_LABEL.to_string(),
            result_label: DEFAULT_RESULT_LABEL.to_string(),
            granularity: Granularity::default(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}
