use crate::error::Error;
use crate::model::config::Config;
use crate::model::timer::Granularity;
use ini::{Ini, Properties};

pub const SECTION: &str = "Timelog";

pub fn from_file(filename: &str) -> Result<Config, Error> {
    let ini_str = std::fs::read_to_string(filename).map_err(Error::IoError)?;
    from_str(&ini_str)
}

pub fn from_str(ini_str: &str) -> Result<Config, Error> {
    let ini = Ini::load_from_str(ini_str).map_err(Error::IniError)?;
    let section = ini
        .section(Some(SECTION))
        .ok_or_else(|| Error::MissingSection(SECTION.to_string()))?;
    from_section(section)
}

// keys left out keep their default
fn from_section(section: &Properties) -> Result<Config, Error> {
    let mut config = Config::default();
    if let Some(label) = section.get("start_label") {
        config.start_label = label.to_string();
    }
    if let Some(label) = section.get("result_label") {
        config.result_label = label.to_string();
    }
    if let Some(target) = section.get("log_target") {
        config.log_target = target.to_string();
    }
    if let Some(granularity) = section.get("granularity") {
        config.granularity = parse_granularity(granularity)?;
    }
    Ok(config)
}

fn parse_granularity(value: &str) -> Result<Granularity, Error> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ms" | "milliseconds" => Ok(Granularity::Milliseconds),
        "ticks" => Ok(Granularity::Ticks),
        _ => Err(Error::InvalidValue {
            key: "granularity".to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_section() {
        let ini = "[Timelog]\nstart_label = P\nresult_label = PE\ngranularity = Ticks\nlog_target = app::timing\n";
        let config = from_str(ini).expect("config parse");
        assert_eq!(config.start_label, "P");
        assert_eq!(config.result_label, "PE");
        assert_eq!(config.granularity, Granularity::Ticks);
        assert_eq!(config.log_target, "app::timing");
    }

    #[test]
    fn test_missing_keys_fall_back_to_default() {
        let config = from_str("[Timelog]\nresult_label = DONE\n").expect("config parse");
        assert_eq!(config.start_label, "TIMELOG");
        assert_eq!(config.result_label, "DONE");
        assert_eq!(config.granularity, Granularity::Milliseconds);
    }

    #[test]
    fn test_missing_section() {
        match from_str("[Other]\nkey = value\n") {
            Err(Error::MissingSection(section)) => assert_eq!(section, "Timelog"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_invalid_granularity() {
        let err = from_str("[Timelog]\ngranularity = weeks\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"weeks\" for key \"granularity\""
        );
    }

    #[test]
    fn test_missing_file() {
        let err = from_file("definitely/not/here.ini").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
