use console::{Key, Term};
use std::io::{self, Write};

use crate::core::GameState;
use crate::ui::Theme;

const HELP: &str = "arrows/wasd/hjkl: move   u: undo   r: restart   q: quit";

/// Draws the board and reads key presses from the terminal.
pub struct BoardView {
    term: Term,
    theme: Theme,
    show_help: bool,
}

impl BoardView {
    pub fn new(theme: Theme, show_help: bool) -> Self {
        Self {
            term: Term::stdout(),
            theme,
            show_help,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// The grid rows, one string per board row, styled with the theme.
    pub fn board_lines(&self, state: &GameState) -> Vec<String> {
        state
            .board
            .rows()
            .iter()
            .map(|row| {
                let cells: String = row.iter().map(|&value| self.theme.paint_tile(value)).collect();
                format!("|{cells}|")
            })
            .collect()
    }

    pub fn render(&self, state: &GameState, game_over: bool) -> io::Result<()> {
        self.term.clear_screen()?;
        let mut out = io::stdout();

        writeln!(out, "{}", self.theme.apply_style("2048", "title"))?;
        for line in self.board_lines(state) {
            writeln!(out, "{line}")?;
        }
        let score = format!("Score: {}", state.score);
        writeln!(out, "{}", self.theme.apply_style(&score, "score"))?;

        if game_over {
            writeln!(out, "{}", self.theme.apply_style("No moves left.", "game_over"))?;
        } else if self.show_help {
            writeln!(out)?;
            writeln!(out, "{}", self.theme.apply_style(HELP, "help"))?;
        }
        out.flush()
    }

    pub fn read_key(&self) -> io::Result<Key> {
        self.term.read_key()
    }
}
