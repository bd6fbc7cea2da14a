use crate::grid::{Adjacency, Grid, MAX_GRID_WIDTH};
use std::fmt;

/// A board built from a letter string.
///
/// Parsing rules, left to right:
/// * `:` increments the letter multiplier for the next tile
/// * `;` increments the word multiplier for the next tile
/// * an uppercase letter or `?` starts a new tile
/// * `.` creates an empty tile placeholder
/// * a lowercase letter extends the previous tile (multi-letter tile)
/// * anything else is skipped
///
/// The adjacency matrix connects positions per the grid's [`Adjacency`]
/// mode; for `Full` grids the matrix is implicit (every position connects
/// to every other). A board is immutable after construction.
///
/// ## Examples
/// ```
/// # use wordgame_solver::{Adjacency, Board, Grid};
/// let grid = Grid::rectangle(1, 4, Adjacency::Straight);
/// let board = Board::new(":A;BCD", &grid);
/// assert_eq!(board.len(), 4);
/// assert_eq!(board.tile(0), "A");
/// assert_eq!(board.letter_mult(0), 2);
/// assert_eq!(board.word_mult(1), 2);
/// assert!(board.is_adjacent(0, 1));
/// assert!(!board.is_adjacent(0, 2));
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    letters: String,
    tiles: Vec<String>,
    letter_mult: Vec<u8>,
    word_mult: Vec<u8>,
    // None for fully connected boards
    adjacency: Option<Vec<bool>>,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letters)
    }
}

impl Board {
    #[must_use]
    pub fn new(letters: &str, grid: &Grid) -> Board {
        let mut board = Board {
            letters: String::from(letters),
            tiles: Vec::new(),
            letter_mult: Vec::new(),
            word_mult: Vec::new(),
            adjacency: None,
        };
        board.parse();
        board.build_adjacency_matrix(grid);
        board
    }

    /// The tile at position `i`; empty for a `.` placeholder.
    pub fn tile(&self, i: usize) -> &str {
        &self.tiles[i]
    }

    pub fn letter_mult(&self, i: usize) -> u8 {
        self.letter_mult[i]
    }

    pub fn word_mult(&self, i: usize) -> u8 {
        self.word_mult[i]
    }

    /// The number of tiles on the board.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The letter string the board was built from.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Whether a path may step from position `i` to position `j`.
    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        match &self.adjacency {
            Some(matrix) => matrix[i * self.tiles.len() + j],
            None => true,
        }
    }

    fn parse(&mut self) {
        let mut letter_multiplier: u8 = 1;
        let mut word_multiplier: u8 = 1;

        for ch in self.letters.chars() {
            match ch {
                ':' => letter_multiplier = letter_multiplier.saturating_add(1),
                ';' => word_multiplier = word_multiplier.saturating_add(1),
                'A'..='Z' | '?' => {
                    self.letter_mult.push(letter_multiplier);
                    self.word_mult.push(word_multiplier);
                    letter_multiplier = 1;
                    word_multiplier = 1;
                    self.tiles.push(ch.to_string());
                }
                '.' => {
                    self.letter_mult.push(letter_multiplier);
                    self.word_mult.push(word_multiplier);
                    letter_multiplier = 1;
                    word_multiplier = 1;
                    self.tiles.push(String::new());
                }
                'a'..='z' => {
                    if let Some(tile) = self.tiles.last_mut() {
                        tile.push(ch);
                    }
                }
                _ => {}
            }
        }
    }

    fn build_adjacency_matrix(&mut self, grid: &Grid) {
        if grid.adjacency() == Adjacency::Full {
            return;
        }

        let board_size = self.tiles.len();
        if board_size == 0 {
            self.adjacency = Some(Vec::new());
            return;
        }

        // Assign position indices row-major over the active grid cells.
        let mut pos_matrix = [[usize::MAX; MAX_GRID_WIDTH]; MAX_GRID_WIDTH];
        let mut pos = 0;
        for row in 0..MAX_GRID_WIDTH {
            for col in 0..MAX_GRID_WIDTH {
                if grid.is_tile_set(row, col) && pos < board_size {
                    pos_matrix[row][col] = pos;
                    pos += 1;
                }
            }
        }

        let mut matrix = vec![false; board_size * board_size];
        let mut connect = |from: usize, row: isize, col: isize| {
            if (0..MAX_GRID_WIDTH as isize).contains(&row)
                && (0..MAX_GRID_WIDTH as isize).contains(&col)
            {
                let to = pos_matrix[row as usize][col as usize];
                if to != usize::MAX {
                    matrix[from * board_size + to] = true;
                }
            }
        };

        for row in 0..MAX_GRID_WIDTH {
            for col in 0..MAX_GRID_WIDTH {
                let from = pos_matrix[row][col];
                if from == usize::MAX {
                    continue;
                }
                let (row, col) = (row as isize, col as isize);

                if grid.adjacency() == Adjacency::Diagonal {
                    connect(from, row - 1, col - 1);
                    connect(from, row - 1, col + 1);
                    connect(from, row + 1, col - 1);
                    connect(from, row + 1, col + 1);
                }
                connect(from, row - 1, col);
                connect(from, row + 1, col);
                connect(from, row, col - 1);
                connect(from, row, col + 1);
            }
        }

        self.adjacency = Some(matrix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multipliers() {
        let grid = Grid::rectangle(1, 4, Adjacency::Straight);
        let board = Board::new("::A;;B?.", &grid);
        assert_eq!(board.len(), 4);
        assert_eq!(board.tile(0), "A");
        assert_eq!(board.letter_mult(0), 3);
        assert_eq!(board.word_mult(0), 1);
        assert_eq!(board.tile(1), "B");
        assert_eq!(board.word_mult(1), 3);
        assert_eq!(board.tile(2), "?");
        assert_eq!(board.letter_mult(2), 1);
        assert_eq!(board.tile(3), "");
    }

    #[test]
    fn test_parse_multi_letter_tiles() {
        let grid = Grid::rectangle(1, 3, Adjacency::Straight);
        let board = Board::new("Qu IN", &grid);
        assert_eq!(board.len(), 3);
        assert_eq!(board.tile(0), "Qu");
        assert_eq!(board.tile(1), "I");
        assert_eq!(board.tile(2), "N");
    }

    #[test]
    fn test_parse_skips_unknown_characters() {
        let grid = Grid::rectangle(1, 2, Adjacency::Straight);
        let board = Board::new("A-1 B!", &grid);
        assert_eq!(board.len(), 2);
        assert_eq!(board.tile(0), "A");
        assert_eq!(board.tile(1), "B");
    }

    #[test]
    fn test_empty_board() {
        let grid = Grid::rectangle(2, 2, Adjacency::Straight);
        let board = Board::new("", &grid);
        assert!(board.is_empty());
    }

    #[test]
    fn test_straight_adjacency() {
        // A B
        // C D
        let grid = Grid::rectangle(2, 2, Adjacency::Straight);
        let board = Board::new("ABCD", &grid);
        assert!(board.is_adjacent(0, 1));
        assert!(board.is_adjacent(0, 2));
        assert!(!board.is_adjacent(0, 3));
        assert!(!board.is_adjacent(0, 0));
        assert!(board.is_adjacent(3, 1));
        assert!(board.is_adjacent(3, 2));
    }

    #[test]
    fn test_diagonal_adjacency() {
        let grid = Grid::rectangle(2, 2, Adjacency::Diagonal);
        let board = Board::new("ABCD", &grid);
        assert!(board.is_adjacent(0, 3));
        assert!(board.is_adjacent(1, 2));
        assert!(board.is_adjacent(0, 1));
    }

    #[test]
    fn test_full_adjacency() {
        let grid = Grid::rectangle(2, 2, Adjacency::Full);
        let board = Board::new("ABCD", &grid);
        for i in 0..4 {
            for j in 0..4 {
                assert!(board.is_adjacent(i, j));
            }
        }
    }

    #[test]
    fn test_inactive_cells_are_skipped() {
        // Row of three with the middle cell missing: 0 and 1 end up two
        // columns apart and are not adjacent.
        let mut grid = Grid::new(Adjacency::Straight);
        grid.set_tile(0, 0);
        grid.set_tile(0, 2);
        let board = Board::new("AB", &grid);
        assert!(!board.is_adjacent(0, 1));
        assert!(!board.is_adjacent(1, 0));
    }
}
