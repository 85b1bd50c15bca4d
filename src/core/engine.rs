use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, info};

use crate::core::{Board, Direction, EventLogger, GameEvent, GameEventHandler, GameState};

pub struct GameEngine<R: Rng = StdRng> {
    state: GameState,
    previous: GameState,
    rng: R,
    events: EventLogger,
    game_over_recorded: bool,
}

impl GameEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_board(board: impl Into<Board>) -> Self {
        Self::from_board_with_rng(board, StdRng::from_entropy())
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        let mut engine = Self::blank(Board::EMPTY, rng);
        engine.start();
        engine.spawn_tile();
        engine.spawn_tile();
        engine
    }

    pub fn from_board_with_rng(board: impl Into<Board>, rng: R) -> Self {
        let mut engine = Self::blank(board.into(), rng);
        engine.start();
        engine
    }

    /// Keeps the most recent events already recorded.
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        let mut events = EventLogger::new(max_events);
        for event in self.events.get_events() {
            events.handle_event(event);
        }
        self.events = events;
        self
    }

    fn blank(board: Board, rng: R) -> Self {
        Self {
            state: GameState::new(board),
            previous: GameState::default(),
            rng,
            events: EventLogger::default(),
            game_over_recorded: false,
        }
    }

    fn start(&mut self) {
        info!(empty_cells = self.state.empty_count(), "Starting new game");
        self.game_over_recorded = false;
        self.record(GameEvent::game_started(self.state.board));
    }

    pub fn board(&self) -> Board {
        self.state.board
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.board.is_game_over()
    }

    /// A tile is spawned even when the slide changed nothing.
    pub fn make_move(&mut self, direction: Direction) {
        self.previous = self.state;

        let (board, gained) = self.state.board.shift(direction);
        self.state.board = board;
        self.state.score += gained;
        debug!(%direction, gained, score = self.state.score, "Applied move");
        self.record(GameEvent::moved(direction, gained));

        self.spawn_tile();
        debug_assert!(self.state.board.is_well_formed());

        if !self.game_over_recorded && self.is_game_over() {
            self.game_over_recorded = true;
            info!(score = self.state.score, max_tile = self.state.max_tile(), "Game over");
            self.record(GameEvent::game_over(self.state.score));
        }
    }

    /// Only one level is kept; before the first move this restores an empty
    /// board.
    pub fn undo(&mut self) {
        self.state = self.previous;
        self.game_over_recorded = self.is_game_over();
        debug!(score = self.state.score, "Undid last move");
        self.record(GameEvent::undone(self.state.score));
    }

    pub fn restart(&mut self) {
        self.state = GameState::default();
        self.previous = GameState::default();
        self.start();
        self.spawn_tile();
        self.spawn_tile();
    }

    pub fn events(&self) -> &[GameEvent] {
        self.events.get_events()
    }

    /// Most recent first.
    pub fn recent_events(&self, count: usize) -> Vec<&GameEvent> {
        self.events.get_recent_events(count)
    }

    pub fn event_log(&self) -> &EventLogger {
        &self.events
    }

    fn spawn_tile(&mut self) {
        if let Some((row, column, value)) = self.state.board.spawn_random_tile(&mut self.rng) {
            debug!(row, column, value, "Spawned tile");
            self.record(GameEvent::tile_spawned(row, column, value));
        }
    }

    fn record(&mut self, event: GameEvent) {
        self.events.handle_event(&event);
    }
}

impl<R: Rng> fmt::Display for GameEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}

impl<R: Rng> fmt::Debug for GameEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("previous", &self.previous)
            .field("events", &self.events.get_event_count())
            .finish()
    }
}
