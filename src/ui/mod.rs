pub mod components;
pub mod interface;
pub mod theme;

pub use components::BoardView;
pub use interface::{Command, GameInterface};
pub use theme::Theme;
