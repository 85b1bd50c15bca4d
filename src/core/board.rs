use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Direction;

pub const SIZE: usize = 4;

pub const FOUR_PROBABILITY: f64 = 0.2;

// One row or column, ordered from the edge tiles slide towards.
pub type Line = [u32; SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board([[u32; SIZE]; SIZE]);

impl Board {
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    pub fn new(cells: [[u32; SIZE]; SIZE]) -> Self {
        Board(cells)
    }

    /// # Panics
    ///
    /// Panics unless `rows` is exactly 4x4.
    pub fn from_rows(rows: &[Vec<u32>]) -> Self {
        assert_eq!(rows.len(), SIZE, "board must have {SIZE} rows, got {}", rows.len());
        let mut cells = [[0; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                SIZE,
                "board row {r} must have {SIZE} columns, got {}",
                row.len()
            );
            cells[r].copy_from_slice(row);
        }
        Board(cells)
    }

    pub fn rows(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    pub fn get(&self, row: usize, column: usize) -> u32 {
        self.0[row][column]
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: u32) {
        self.0[row][column] = value;
    }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for (r, row) in self.0.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    pub fn empty_count(&self) -> usize {
        self.0.iter().flatten().filter(|&&v| v == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().flatten().all(|&v| v != 0)
    }

    pub fn max_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn has_adjacent_pair(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let value = self.0[r][c];
                if c + 1 < SIZE && can_merge(value, self.0[r][c + 1]) {
                    return true;
                }
                if r + 1 < SIZE && can_merge(value, self.0[r + 1][c]) {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_game_over(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }

    pub fn is_well_formed(&self) -> bool {
        self.0
            .iter()
            .flatten()
            .all(|&v| v == 0 || (v >= 2 && v.is_power_of_two()))
    }

    /// Returns the shifted board and the score gained from merges.
    pub fn shift(&self, direction: Direction) -> (Board, u64) {
        let mut shifted = *self;
        let mut gained = 0;
        for index in 0..SIZE {
            let (line, line_gain) = slide_line(self.line(direction, index));
            shifted.set_line(direction, index, line);
            gained += line_gain;
        }
        (shifted, gained)
    }

    pub fn spawn_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(usize, usize, u32)> {
        let empty = self.empty_cells();
        let &(row, column) = empty.choose(rng)?;
        let value = if rng.gen_bool(FOUR_PROBABILITY) { 4 } else { 2 };
        self.set(row, column, value);
        Some((row, column, value))
    }

    fn line(&self, direction: Direction, index: usize) -> Line {
        let mut line = [0; SIZE];
        for (k, slot) in line.iter_mut().enumerate() {
            let (r, c) = cell(direction, index, k);
            *slot = self.0[r][c];
        }
        line
    }

    fn set_line(&mut self, direction: Direction, index: usize, line: Line) {
        for (k, value) in line.into_iter().enumerate() {
            let (r, c) = cell(direction, index, k);
            self.0[r][c] = value;
        }
    }
}

impl From<[[u32; SIZE]; SIZE]> for Board {
    fn from(cells: [[u32; SIZE]; SIZE]) -> Self {
        Board(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            f.write_str("|")?;
            for &value in row {
                if value == 0 {
                    f.write_str("    ")?;
                } else {
                    write!(f, "{value:>4}")?;
                }
            }
            f.write_str("|\n")?;
        }
        Ok(())
    }
}

fn cell(direction: Direction, index: usize, k: usize) -> (usize, usize) {
    match direction {
        Direction::Left => (index, k),
        Direction::Right => (index, SIZE - 1 - k),
        Direction::Up => (k, index),
        Direction::Down => (SIZE - 1 - k, index),
    }
}

// Equal tiles merge unless doubling would leave u32; 2^31 is the largest tile.
fn can_merge(a: u32, b: u32) -> bool {
    a == b && a.checked_mul(2).is_some()
}

/// Slide one line towards index 0. A merged tile never merges again in the
/// same slide, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
pub fn slide_line(line: Line) -> (Line, u64) {
    let mut out = [0; SIZE];
    let mut len = 0;
    let mut gained = 0;
    let mut pending: Option<u32> = None;

    for value in line.into_iter().filter(|&v| v != 0) {
        match pending.take() {
            Some(prev) if can_merge(prev, value) => {
                let merged = prev * 2;
                out[len] = merged;
                len += 1;
                gained += u64::from(merged);
            }
            Some(prev) => {
                out[len] = prev;
                len += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(prev) = pending {
        out[len] = prev;
    }

    (out, gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slide_line() {
        assert_eq!(slide_line([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(slide_line([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(slide_line([0, 0, 0, 2]), ([2, 0, 0, 0], 0));
        assert_eq!(slide_line([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(slide_line([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
        assert_eq!(slide_line([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    }

    #[test]
    fn test_slide_line_does_not_cascade() {
        assert_eq!(slide_line([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(slide_line([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(slide_line([4, 4, 8, 0]), ([8, 8, 0, 0], 8));
    }

    #[test]
    fn test_slide_line_odd_run_keeps_last() {
        assert_eq!(slide_line([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        let top = 1 << 31;
        assert_eq!(slide_line([top, top, 0, 0]), ([top, top, 0, 0], 0));
        assert_eq!(slide_line([0, top, 0, top]), ([top, top, 0, 0], 0));
        assert_eq!(slide_line([top, top, 2, 2]), ([top, top, 4, 0], 4));
        assert_eq!(slide_line([1 << 30, 1 << 30, 0, 0]), ([top, 0, 0, 0], 1 << 31));
    }

    #[test]
    fn test_full_board_with_only_largest_pairs_is_over() {
        let top = 1 << 31;
        let board = Board::new([
            [top, top, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!board.has_adjacent_pair());
        assert!(board.is_game_over());
    }

    #[test]
    fn test_shift_row_left_and_right() {
        let board = Board::new([[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]);

        let (left, gained) = board.shift(Direction::Left);
        assert_eq!(left.rows()[0], [4, 4, 0, 0]);
        assert_eq!(gained, 4);

        let (right, gained) = board.shift(Direction::Right);
        assert_eq!(right.rows()[0], [0, 0, 4, 4]);
        assert_eq!(gained, 4);
    }

    #[test]
    fn test_shift_columns_up_and_down() {
        let board = Board::new([
            [2, 4, 0, 0],
            [2, 0, 0, 0],
            [2, 4, 0, 0],
            [2, 8, 0, 0],
        ]);

        let (up, gained) = board.shift(Direction::Up);
        assert_eq!(
            up,
            Board::new([
                [4, 8, 0, 0],
                [4, 8, 0, 0],
                [0, 0, 0, 0],
                [0, 0, 0, 0],
            ])
        );
        assert_eq!(gained, 16);

        let (down, gained) = board.shift(Direction::Down);
        assert_eq!(
            down,
            Board::new([
                [0, 0, 0, 0],
                [0, 0, 0, 0],
                [4, 8, 0, 0],
                [4, 8, 0, 0],
            ])
        );
        assert_eq!(gained, 16);
    }

    #[test]
    fn test_shift_leaves_input_untouched() {
        let board = Board::new([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let copy = board;
        let _ = board.shift(Direction::Left);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_game_over_detection() {
        let stuck = Board::new([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(stuck.is_game_over());

        let mut with_gap = stuck;
        with_gap.set(1, 1, 0);
        assert!(!with_gap.is_game_over());

        let horizontal_pair = Board::new([
            [2, 2, 4, 8],
            [4, 8, 2, 4],
            [2, 4, 8, 2],
            [4, 2, 4, 8],
        ]);
        assert!(!horizontal_pair.is_game_over());

        let vertical_pair = Board::new([
            [2, 4, 2, 4],
            [4, 8, 4, 2],
            [2, 8, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!vertical_pair.is_game_over());
    }

    #[test]
    fn test_empty_board_with_equal_zeros_is_not_over() {
        assert!(!Board::EMPTY.is_game_over());
    }

    #[test]
    fn test_spawn_on_full_board_is_noop() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut full = Board::new([[2; SIZE]; SIZE]);
        let before = full;
        for _ in 0..50 {
            assert_eq!(full.spawn_random_tile(&mut rng), None);
        }
        assert_eq!(full, before);
    }

    #[test]
    fn test_spawn_fills_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::EMPTY;
        for filled in 1..=SIZE * SIZE {
            let (row, column, value) = board.spawn_random_tile(&mut rng).unwrap();
            assert!(value == 2 || value == 4);
            assert_eq!(board.get(row, column), value);
            assert_eq!(board.empty_count(), SIZE * SIZE - filled);
        }
        assert!(board.is_full());
        assert!(board.is_well_formed());
    }

    #[test]
    fn test_spawn_ratio_is_roughly_four_in_five_twos() {
        let mut rng = StdRng::seed_from_u64(2048);
        let mut fours = 0;
        let trials = 10_000;
        for _ in 0..trials {
            let mut board = Board::EMPTY;
            if let Some((_, _, 4)) = board.spawn_random_tile(&mut rng) {
                fours += 1;
            }
        }
        let ratio = fours as f64 / trials as f64;
        assert!((0.17..0.23).contains(&ratio), "ratio of fours was {ratio}");
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![vec![0, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0, 0, 0, 4]];
        let board = Board::from_rows(&rows);
        assert_eq!(board.get(0, 1), 2);
        assert_eq!(board.get(3, 3), 4);
    }

    #[test]
    #[should_panic(expected = "board must have 4 rows")]
    fn test_from_rows_rejects_wrong_height() {
        Board::from_rows(&[vec![0; 4], vec![0; 4]]);
    }

    #[test]
    #[should_panic(expected = "board row 2 must have 4 columns")]
    fn test_from_rows_rejects_wrong_width() {
        Board::from_rows(&[vec![0; 4], vec![0; 4], vec![0; 5], vec![0; 4]]);
    }

    #[test]
    fn test_well_formed() {
        assert!(Board::EMPTY.is_well_formed());
        assert!(!Board::new([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_well_formed());
        assert!(!Board::new([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_well_formed());
    }

    #[test]
    fn test_display() {
        let board = Board::new([[2, 0, 0, 2048], [0; 4], [0; 4], [0, 16, 0, 0]]);
        let expected = "|   2        2048|\n\
                        |                |\n\
                        |                |\n\
                        |      16        |\n";
        assert_eq!(board.to_string(), expected);
    }
}
