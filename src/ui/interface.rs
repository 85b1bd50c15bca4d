use console::Key;
use dialoguer::Confirm;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{Direction, GameEngine};
use crate::ui::{BoardView, Theme};
use crate::utils::{GameError, GameResult};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Undo,
    Restart,
    Quit,
}

impl Command {
    pub fn from_key(key: &Key) -> Option<Self> {
        let command = match key {
            Key::ArrowUp => Command::Move(Direction::Up),
            Key::ArrowDown => Command::Move(Direction::Down),
            Key::ArrowLeft => Command::Move(Direction::Left),
            Key::ArrowRight => Command::Move(Direction::Right),
            Key::Escape => Command::Quit,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' | 'k' => Command::Move(Direction::Up),
                's' | 'j' => Command::Move(Direction::Down),
                'a' | 'h' => Command::Move(Direction::Left),
                'd' | 'l' => Command::Move(Direction::Right),
                'u' => Command::Undo,
                'r' => Command::Restart,
                'q' => Command::Quit,
                _ => return None,
            },
            _ => return None,
        };
        Some(command)
    }
}

pub struct GameInterface {
    engine: GameEngine,
    view: BoardView,
    config: Config,
}

impl GameInterface {
    pub fn new(config: Config) -> GameResult<Self> {
        info!("Initializing game interface");

        let theme = Theme::from_name(&config.ui.theme).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.ui.theme);
            Theme::Default
        });

        let engine = match config.game.seed {
            Some(seed) => {
                info!(seed, "Using fixed seed");
                GameEngine::seeded(seed)
            }
            None => GameEngine::new(),
        }
        .with_max_events(config.game.max_events);

        Ok(Self {
            engine,
            view: BoardView::new(theme, config.ui.show_help),
            config,
        })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn run(&mut self) -> GameResult<()> {
        info!(theme = self.view.theme().name(), "Starting game loop");

        loop {
            let game_over = self.engine.is_game_over();
            self.view.render(&self.engine.state(), game_over)?;

            if game_over {
                if self.confirm("Play again?", true)? {
                    self.engine.restart();
                    continue;
                }
                break;
            }

            let key = self.view.read_key()?;
            match Command::from_key(&key) {
                Some(Command::Move(direction)) => self.engine.make_move(direction),
                Some(Command::Undo) => self.engine.undo(),
                Some(Command::Restart) => {
                    if self.confirm_if_configured("Restart the current game?")? {
                        self.engine.restart();
                    }
                }
                Some(Command::Quit) => {
                    if self.confirm_if_configured("Quit?")? {
                        break;
                    }
                }
                None => debug!(?key, "Ignoring key"),
            }
        }

        info!(
            score = self.engine.score(),
            max_tile = self.engine.state().max_tile(),
            "Game session ended"
        );

        if let Some(path) = &self.config.game.event_log {
            self.save_event_log(path)?;
        }
        Ok(())
    }

    pub fn save_event_log(&self, path: &Path) -> GameResult<()> {
        let json = self.engine.event_log().export_events()?;
        std::fs::write(path, json)?;
        info!(
            path = %path.display(),
            events = self.engine.event_log().get_event_count(),
            "Saved event log"
        );
        Ok(())
    }

    fn confirm_if_configured(&self, prompt: &str) -> GameResult<bool> {
        if self.config.game.confirm_restart {
            self.confirm(prompt, false)
        } else {
            Ok(true)
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> GameResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| GameError::terminal(format!("Prompt failed: {}", e)))
    }
}
