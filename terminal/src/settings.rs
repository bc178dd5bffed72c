use std::default::Default;
use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub fn load() -> Result<Settings, ConfigError> {
    let mut s = Config::new();
    s.merge(File::with_name(DEFAULT_CFG_PATH).required(false))?;
    let env = env::var(RUN_MODE_ENV).unwrap_or_else(|_| "development".into());
    s.merge(File::with_name(&format!("config/{}", env)).required(false))?;
    s.merge(File::with_name(LOCAL_CFG_PATH).required(false))?;
    s.merge(Environment::with_prefix(ENV_PREFIX).separator("__"))?;
    s.try_into()
}

const DEFAULT_CFG_PATH: &str = "config/default";
const LOCAL_CFG_PATH: &str = "config/local";
const RUN_MODE_ENV: &str = "CHIPTALLY_TERMINAL_RUN_MODE";
const ENV_PREFIX: &str = "chiptally_terminal";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: Logging,
    pub storage: Storage,
    pub game: chiptally_game::Settings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    /// Write logs into this directory instead of stderr, which would
    /// otherwise interleave with the table.
    pub directory: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Logging {
            level: "info".into(),
            directory: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// The file holding the saved session.
    pub path: String,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            path: "chiptally-state.json".into(),
        }
    }
}
