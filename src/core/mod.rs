pub mod board;
pub mod direction;
pub mod engine;
pub mod events;
pub mod game_state;

pub use board::{slide_line, Board, Line, FOUR_PROBABILITY, SIZE};
pub use direction::Direction;
pub use engine::GameEngine;
pub use events::{EventLogger, GameEvent, GameEventHandler, GameEventType};
pub use game_state::GameState;
