use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info, warn};

use swathcheck::config::{self, Config};
use swathcheck::{GdalExtractor, Instrument, check, logger, utils};

/// Remove unreadable or empty swath files before mapping
#[derive(Parser, Debug)]
#[command(name = "swathcheck", version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sensor name (octs, seawifs, modisa, viirsn, viirsj, goci, sgli)
    #[arg(short, long, required_unless_present = "config")]
    instrument: Option<String>,

    /// Swath files, directories or glob patterns
    inputs: Vec<String>,

    /// Also append log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Level of the records written to the log file
    #[arg(long)]
    log_level: Option<String>,

    /// Do not log to the console
    #[arg(long)]
    no_console: bool,

    /// Add the current date to the log file name
    #[arg(long)]
    dated_log: bool,
}

fn load_config(args: Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(
            Instrument::parse(args.instrument.as_deref().unwrap_or_default()),
            Vec::new(),
        ),
    };

    if let Some(name) = args.instrument.as_deref() {
        config.set_instrument(Instrument::parse(name));
    }
    config.extend_inputs(args.inputs);
    if let Some(log_file) = args.log_file {
        config.set_log_file(log_file);
    }
    if let Some(level) = args.log_level.as_deref() {
        config.set_log_level(config::parse_level(level)?);
    }
    if args.no_console {
        config.set_console(false);
    }
    if args.dated_log {
        config.set_dated_log(true);
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(Args::parse())?;
    logger::init(&config.log_config())?;

    let instrument = config.instrument();
    if instrument.family().is_none() {
        warn!(
            "No extraction rule for instrument {:?}, every candidate file will be removed",
            instrument.to_string()
        );
    }

    let files = utils::collect_inputs(config.inputs());
    info!("Checking {} files for {}", files.len(), instrument);

    let report = check(&files, instrument, &GdalExtractor);
    for removed in report.removed() {
        debug!("Removed {} ({})", removed.path.display(), removed.outcome);
    }
    info!("{}", report.summary());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_cli_without_config() {
        let args = Args::parse_from([
            "swathcheck",
            "--instrument",
            "modisa",
            "--log-file",
            "check.log",
            "--no-console",
            "A.nc",
            "B.nc",
        ]);

        let config = load_config(args).unwrap();
        assert_eq!(config.instrument(), &Instrument::ModisAqua);
        assert_eq!(config.inputs(), ["A.nc", "B.nc"]);

        let log = config.log_config();
        assert!(!log.console);
        assert_eq!(log.file, Some(PathBuf::from("check.log")));
        assert_eq!(log.level, LevelFilter::INFO);
    }

    #[test]
    fn test_instrument_or_config_is_required() {
        assert!(Args::try_parse_from(["swathcheck", "A.nc"]).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let args = Args::parse_from(["swathcheck", "-i", "sgli", "--log-level", "verbose"]);
        assert!(load_config(args).is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "instrument": "modisa", "inputs": ["from_config.nc"], "log_level": "warn" }"#,
        )
        .unwrap();

        let args = Args::parse_from([
            "swathcheck",
            "--config",
            path.to_str().unwrap(),
            "--instrument",
            "sgli",
            "--dated-log",
            "extra.h5",
        ]);

        let config = load_config(args).unwrap();
        assert_eq!(config.instrument(), &Instrument::Sgli);
        assert_eq!(config.inputs(), ["from_config.nc", "extra.h5"]);
        assert_eq!(config.log_config().level, LevelFilter::WARN);
        assert!(config.log_config().dated);
    }
}
