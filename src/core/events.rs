use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Board, Direction};
use crate::utils::GameResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventType {
    GameStarted { board: Board },
    Moved { direction: Direction, gained: u64 },
    TileSpawned { row: usize, column: usize, value: u32 },
    Undone { score: u64 },
    GameOver { score: u64 },
}

impl GameEvent {
    pub fn new(event_type: GameEventType) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
        }
    }

    pub fn game_started(board: Board) -> Self {
        Self::new(GameEventType::GameStarted { board })
    }

    pub fn moved(direction: Direction, gained: u64) -> Self {
        Self::new(GameEventType::Moved { direction, gained })
    }

    pub fn tile_spawned(row: usize, column: usize, value: u32) -> Self {
        Self::new(GameEventType::TileSpawned { row, column, value })
    }

    pub fn undone(score: u64) -> Self {
        Self::new(GameEventType::Undone { score })
    }

    pub fn game_over(score: u64) -> Self {
        Self::new(GameEventType::GameOver { score })
    }
}

pub trait GameEventHandler {
    fn handle_event(&mut self, event: &GameEvent);
}

/// Bounded in-memory event history; the oldest events are dropped first.
#[derive(Debug, Clone)]
pub struct EventLogger {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    pub fn get_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Most recent first.
    pub fn get_recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events.iter().rev().take(count).collect()
    }

    pub fn export_events(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(&self.events)?)
    }

    pub fn get_event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GameEventHandler for EventLogger {
    fn handle_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());

        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.max_events;
            self.events.drain(..excess);
        }
    }
}
