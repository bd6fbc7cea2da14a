use crate::board::Board;
use crate::rules::ScoringRules;
use crate::solution::Solution;
use crate::trie::Trie;
use tinyvec::ArrayVec;

// Path capacity; the next tinyvec-supported size above the 100-tile grid.
type Path = ArrayVec<[u8; 128]>;

/// Finds every scoring path through a board.
///
/// The solver owns the dictionary trie plus the mutable scratch state of
/// the depth-first search (`used`, `path`, the wildcard letter currently
/// trialed per position). Scratch state is reinitialized by every call to
/// [`solve`](Solver::solve).
///
/// ## Examples
/// ```
/// # use wordgame_solver::{Adjacency, Board, Grid, ScoringRules, Solver};
/// let grid = Grid::rectangle(1, 3, Adjacency::Straight);
/// let mut solver = Solver::new();
/// solver.add_word("cat");
/// let mut rules = ScoringRules::default();
/// rules.letter_values = [('C', 3), ('A', 1), ('T', 1)].into_iter().collect();
/// solver.solve(&Board::new("CAT", &grid), &rules);
/// assert_eq!(solver.solutions().len(), 1);
/// assert_eq!(solver.solutions()[0].word(), "CAT");
/// assert_eq!(solver.solutions()[0].score(), 5);
/// ```
#[derive(Default)]
pub struct Solver {
    dict: Trie,
    scratch: Scratch,
}

#[derive(Default)]
struct Scratch {
    solutions: Vec<Solution>,
    used: Vec<bool>,
    path: Path,
    wildcard: Vec<u8>,
}

impl Solver {
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Add the uppercase projection of `word` to the dictionary.
    pub fn add_word(&mut self, word: &str) {
        self.dict.add_word(word);
    }

    /// The solutions found by the last [`solve`](Solver::solve), in
    /// discovery order. Duplicate words found along different paths are
    /// all present; see [`dedup_solutions`](crate::dedup_solutions).
    pub fn solutions(&self) -> &[Solution] {
        &self.scratch.solutions
    }

    /// Enumerate every path through `board` that spells a dictionary word
    /// of at least `rules.min_word_length` letters.
    pub fn solve(&mut self, board: &Board, rules: &ScoringRules) {
        let scratch = &mut self.scratch;
        scratch.solutions.clear();
        scratch.path.clear();
        scratch.used.clear();
        scratch.used.resize(board.len(), false);
        scratch.wildcard.clear();
        scratch.wildcard.resize(board.len(), 0);

        for pos in 0..board.len() {
            walk(&self.dict, scratch, board, rules, pos, board.tile(pos));
        }
    }
}

fn walk(
    node: &Trie,
    scratch: &mut Scratch,
    board: &Board,
    rules: &ScoringRules,
    pos: usize,
    tile: &str,
) {
    if tile.is_empty() {
        return;
    }

    let mut node = node;
    for ch in tile.chars() {
        if ch == '?' {
            // Fan out over the alphabet, rewriting the leading wildcard
            // to the letter being trialed.
            for letter in b'A'..=b'Z' {
                scratch.wildcard[pos] = letter;
                let mut tile_value = String::with_capacity(tile.len());
                tile_value.push(letter as char);
                tile_value.push_str(&tile[1..]);
                walk(node, scratch, board, rules, pos, &tile_value);
            }
            return;
        }

        let letter = ch.to_ascii_uppercase();
        node = match node.child(letter as u8) {
            Some(child) => child,
            None => return,
        };

        if rules.q_is_qu && letter == 'Q' {
            node = match node.child(b'U') {
                Some(child) => child,
                None => return,
            };
        }
    }

    // Paths longer than the scratch capacity cannot happen on a legal
    // grid; treat the attempt as no match.
    if scratch.path.len() == scratch.path.capacity() {
        return;
    }
    scratch.used[pos] = true;
    scratch.path.push(pos as u8);

    if node.is_terminal() {
        let solution = score_path(board, rules, &scratch.path, &scratch.wildcard);
        if solution.word_length() >= rules.min_word_length {
            scratch.solutions.push(solution);
        }
    }

    for next in 0..board.len() {
        if !scratch.used[next] && board.is_adjacent(pos, next) {
            walk(node, scratch, board, rules, next, board.tile(next));
        }
    }

    scratch.path.pop();
    scratch.used[pos] = false;
}

/// Score one path. Pure in `(path, board, rules)`; `wildcard` holds the
/// letter currently standing in for each `?` tile.
fn score_path(board: &Board, rules: &ScoringRules, path: &[u8], wildcard: &[u8]) -> Solution {
    let mut word_len = 0usize;
    let mut letter_points = 0u32;
    let mut word_multiplier = 1u32;
    let mut word = String::new();

    for &pos in path {
        let pos = pos as usize;
        let mut tile_value = 0u32;

        for ch in board.tile(pos).chars() {
            let (letter, is_wildcard) = if ch == '?' {
                (wildcard[pos] as char, true)
            } else {
                (ch, false)
            };

            word_len += 1;
            let letter = letter.to_ascii_uppercase();
            word.push(letter);

            if letter == 'Q' && rules.q_is_qu {
                word.push('U');
                if rules.qu_length == 2 {
                    word_len += 1;
                }
            }

            if !is_wildcard || rules.wild_card_points {
                tile_value += rules.letter_value(letter);
            }
        }

        letter_points += tile_value * u32::from(board.letter_mult(pos));
        word_multiplier *= u32::from(board.word_mult(pos));
    }

    let positions = path.to_vec();

    if word_len < rules.min_word_length {
        // Zero score distinguishes "too short" from "not a word".
        return Solution::new(word, positions, word_len, 0, 0, 1, 0.0);
    }

    if word_len <= rules.short_word_length {
        return if rules.short_word_multiplier {
            Solution::new(
                word,
                positions,
                word_len,
                word_multiplier * rules.short_word_points,
                rules.short_word_points,
                word_multiplier,
                0.0,
            )
        } else {
            Solution::new(
                word,
                positions,
                word_len,
                rules.short_word_points,
                rules.short_word_points,
                1,
                0.0,
            )
        };
    }

    let length_bonus = rules.length_bonus(word_len);
    let raw = if rules.multiply_length_bonus {
        f64::from(letter_points) * f64::from(word_multiplier) * length_bonus
    } else {
        f64::from(letter_points * word_multiplier) + length_bonus
    };
    let score = if rules.round_bonus_up {
        raw.ceil() as u32
    } else {
        raw as u32
    };

    Solution::new(
        word,
        positions,
        word_len,
        score,
        letter_points,
        word_multiplier,
        length_bonus,
    )
}
