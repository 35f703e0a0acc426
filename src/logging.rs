//! log4rs setup.
//!
//! stdout carries the inventory JSON, so every appender writes to stderr.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::{Path, PathBuf};

/// log4rs file looked up next to the config file and in the working directory.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";

const LOG_PATTERN: &str = "{d(%H:%M:%S)} {h({l:5})} {t} - {m}{n}";

/// Initialise logging from `log4rs.yml` if one is found, else log to stderr.
///
/// The fallback level is `warn`, overridable with `XO_LOG_LEVEL`.
pub fn init_logging(config_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    if let Some(path) = find_log_config(config_file) {
        log4rs::init_file(&path, Default::default())?;
        log::debug!("Logging configured from {}", path.display());
        return Ok(());
    }

    let level = std::env::var("XO_LOG_LEVEL")
        .ok()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    log4rs::init_config(stderr_config(level)?)?;
    Ok(())
}

fn find_log_config(config_file: Option<&Path>) -> Option<PathBuf> {
    let beside_config = config_file
        .and_then(Path::parent)
        .map(|dir| dir.join(LOG_CONFIG_FILE));
    beside_config
        .into_iter()
        .chain(std::iter::once(PathBuf::from(LOG_CONFIG_FILE)))
        .find(|p| p.exists())
}

fn stderr_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
