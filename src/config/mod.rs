use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;

use crate::instrument::Instrument;
use crate::logger::LogConfig;

pub mod error;
pub use error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    instrument: Instrument,
    inputs: Vec<String>,
    log_file: Option<PathBuf>,
    console: bool,
    log_level: LevelFilter,
    dated_log: bool,
}

// Deserializes a Config, rejecting an empty instrument and unknown log levels.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            instrument: String,
            #[serde(default)]
            inputs: Vec<String>,
            log_file: Option<PathBuf>,
            #[serde(default = "default_console")]
            console: bool,
            log_level: Option<String>,
            #[serde(default)]
            dated_log: bool,
        }

        fn default_console() -> bool {
            true
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.instrument.trim().is_empty() {
            return Err(D::Error::custom(ConfigError::EmptyInstrument));
        }

        let log_level = match helper.log_level.as_deref() {
            Some(level) => parse_level(level).map_err(D::Error::custom)?,
            None => LevelFilter::INFO,
        };

        Ok(Config {
            instrument: Instrument::parse(helper.instrument.trim()),
            inputs: helper.inputs,
            log_file: helper.log_file,
            console: helper.console,
            log_level,
            dated_log: helper.dated_log,
        })
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::LogLevel(level.to_string()))
}

impl Config {
    pub fn new(instrument: Instrument, inputs: Vec<String>) -> Self {
        Self {
            instrument,
            inputs,
            log_file: None,
            console: true,
            log_level: LevelFilter::INFO,
            dated_log: false,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.instrument = instrument;
    }

    pub fn extend_inputs<I: IntoIterator<Item = String>>(&mut self, inputs: I) {
        self.inputs.extend(inputs);
    }

    pub fn set_log_file(&mut self, log_file: PathBuf) {
        self.log_file = Some(log_file);
    }

    pub fn set_console(&mut self, console: bool) {
        self.console = console;
    }

    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = level;
    }

    pub fn set_dated_log(&mut self, dated: bool) {
        self.dated_log = dated;
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            console: self.console,
            file: self.log_file.clone(),
            level: self.log_level,
            dated: self.dated_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, file_path)
    }

    #[test]
    fn test_from_file() {
        let (_dir, path) = write_config(
            r#"
    {
        "instrument": "sgli",
        "inputs": ["/data/sgli/*.h5", "/data/extra"],
        "log_file": "check.log",
        "console": false,
        "log_level": "debug",
        "dated_log": true
    }
    "#,
        );

        let config = Config::from_file(path).unwrap();

        assert_eq!(config.instrument(), &Instrument::Sgli);
        assert_eq!(config.inputs(), ["/data/sgli/*.h5", "/data/extra"]);

        let log = config.log_config();
        assert!(!log.console);
        assert!(log.dated);
        assert_eq!(log.level, LevelFilter::DEBUG);
        assert_eq!(log.file, Some(PathBuf::from("check.log")));
    }

    #[test]
    fn test_defaults() {
        let (_dir, path) = write_config(r#"{ "instrument": "modisa" }"#);

        let config = Config::from_file(path).unwrap();

        assert_eq!(config.instrument(), &Instrument::ModisAqua);
        assert!(config.inputs().is_empty());
        assert_eq!(config.log_config(), LogConfig::default());
    }

    #[test]
    fn test_empty_instrument_is_rejected() {
        let (_dir, path) = write_config(r#"{ "instrument": "  " }"#);

        let err = Config::from_file(path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("instrument cannot be empty"));
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let (_dir, path) = write_config(r#"{ "instrument": "goci", "log_level": "loud" }"#);

        let err = Config::from_file(path).unwrap_err();
        assert!(err.to_string().contains("invalid log_level"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::new(Instrument::Octs, vec!["a.nc".to_string()]);
        config.set_instrument(Instrument::ViirsSnpp);
        config.extend_inputs(vec!["b.nc".to_string()]);
        config.set_log_file(PathBuf::from("run.log"));
        config.set_console(false);
        config.set_log_level(LevelFilter::WARN);
        config.set_dated_log(true);

        assert_eq!(config.instrument(), &Instrument::ViirsSnpp);
        assert_eq!(config.inputs(), ["a.nc", "b.nc"]);
        assert_eq!(
            config.log_config(),
            LogConfig {
                console: false,
                file: Some(PathBuf::from("run.log")),
                level: LevelFilter::WARN,
                dated: true,
            }
        );
    }
}
