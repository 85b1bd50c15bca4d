use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::utils::{GameError, GameResult};

/// Prefix for environment overrides, e.g. `TWENTY48__GAME__SEED=7`.
pub const ENV_PREFIX: &str = "TWENTY48";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub max_events: usize,
    pub confirm_restart: bool,
    // JSON dump of the event log, written when a session ends.
    pub event_log: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    pub show_help: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_events: 1000,
            confirm_restart: true,
            event_log: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            show_help: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Layer the TOML file at `path` (if it exists) under `TWENTY48__*`
    /// environment variables. Missing keys fall back to the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> GameResult<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> GameResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GameError::configuration(format!("Failed to create config directory: {}", e)))?;
        }

        let toml_content = toml::to_string_pretty(self)?;

        std::fs::write(path, toml_content)
            .map_err(|e| GameError::configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> GameResult<()> {
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => return Err(GameError::configuration("Invalid logging level")),
        }

        match self.ui.theme.as_str() {
            "default" | "plain" => {}
            other => return Err(GameError::configuration(format!("Unknown theme: {}", other))),
        }

        if self.game.max_events == 0 {
            return Err(GameError::configuration("Max events must be greater than 0"));
        }

        Ok(())
    }

    pub fn merge_with_cli(&mut self, cli_config: CliConfig) {
        if let Some(seed) = cli_config.seed {
            self.game.seed = Some(seed);
        }
        if let Some(log_level) = cli_config.log_level {
            self.logging.level = log_level;
        }
        if cli_config.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(theme) = cli_config.theme {
            self.ui.theme = theme;
        }
    }

    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn log_filter(&self) -> String {
        format!("twenty48={},warn", self.logging.level)
    }
}

// Configuration that can be overridden by CLI arguments
#[derive(Debug, Default)]
pub struct CliConfig {
    pub seed: Option<u64>,
    pub log_level: Option<String>,
    pub debug: bool,
    pub theme: Option<String>,
}
