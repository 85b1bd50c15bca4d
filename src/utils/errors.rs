use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid direction: {input:?} (expected up, down, left or right)")]
    InvalidDirection { input: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GameError {
    pub fn invalid_direction<S: Into<String>>(input: S) -> Self {
        Self::InvalidDirection {
            input: input.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn terminal<S: Into<String>>(message: S) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}
