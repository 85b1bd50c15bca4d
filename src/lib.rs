pub mod core;
pub mod ui;
pub mod config;
pub mod utils;

pub use crate::core::{engine::GameEngine, board::Board, direction::Direction, game_state::GameState};
pub use crate::ui::GameInterface;
pub use crate::config::Config;

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
