//! Resolved CLI settings and logging setup.

use anyhow::{bail, Context, Result};
use destiny_core::EventCatalog;
use std::path::PathBuf;
use tracing::Level;

/// Environment variable holding a log level when no `-v` is given.
pub const LOG_ENV: &str = "DESTINY_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub catalog: CatalogSource,
    pub log_level: Level,
    pub log_json: bool,
}

impl CliConfig {
    pub fn new(catalog: Option<PathBuf>, verbose: u8, log_json: bool) -> Result<Self> {
        let env_level = std::env::var(LOG_ENV).ok();
        Ok(Self {
            catalog: catalog.map_or(CatalogSource::Builtin, CatalogSource::File),
            log_level: resolve_level(verbose, env_level.as_deref())?,
            log_json,
        })
    }

    pub fn load_catalog(&self) -> Result<EventCatalog> {
        match &self.catalog {
            CatalogSource::Builtin => Ok(EventCatalog::builtin()),
            CatalogSource::File(path) => EventCatalog::load(path)
                .with_context(|| format!("loading event catalog {}", path.display())),
        }
    }
}

/// `-v` flags win over the environment; default is warnings only.
fn resolve_level(verbose: u8, env_level: Option<&str>) -> Result<Level> {
    match verbose {
        0 => match env_level.map(str::trim).filter(|level| !level.is_empty()) {
            None => Ok(Level::WARN),
            Some(raw) => match raw.parse::<Level>() {
                Ok(level) => Ok(level),
                Err(_) => bail!("invalid {}: {}", LOG_ENV, raw),
            },
        },
        1 => Ok(Level::INFO),
        2 => Ok(Level::DEBUG),
        _ => Ok(Level::TRACE),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for tables and CSV.
pub fn init_logging(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}
