use crate::board::Board;
use crate::config::GameRuleSet;
use crate::dice::Dice;
use crate::distribution::LetterDistribution;
use crate::error::Error;
use crate::grid::Adjacency;
use crate::solution::{dedup_solutions, sort_solutions};
use crate::solver::Solver;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::read_to_string;

const MAX_DUDS: usize = 200;

/// Generate one random board from the game's letter distribution. No
/// dictionary is involved.
///
/// ## Errors
/// Fails if a word list distribution's file can not be read.
pub fn generate_simple_board<R: Rng>(rules: &GameRuleSet, rng: &mut R) -> Result<String, Error> {
    match &rules.letters {
        LetterDistribution::Dice { dice, shuffle_dice } => {
            Ok(simple_dice_board(rules, dice, *shuffle_dice, rng))
        }
        LetterDistribution::Propensity {
            tiles,
            sample_without_replacement,
        } => Ok(simple_propensity_board(
            rules,
            tiles,
            *sample_without_replacement,
            rng,
        )),
        LetterDistribution::WordList {
            path,
            shuffle_letters,
        } => simple_word_list_board(rules, path, *shuffle_letters, rng),
    }
}

/// Generate a board that meets (or, for `reverse_target`, stays under)
/// the given word count and score targets, by hill climbing from a
/// random board: mutate one slot at a time, keep mutations the
/// acceptance rule likes, stop after 200 consecutive rejected mutations
/// or once the target is met.
///
/// With no targets at all this falls back to
/// [`generate_simple_board`].
///
/// ## Errors
/// [`Error::UnsupportedGeneration`] for word list distributions when a
/// target is requested.
pub fn generate_board<R: Rng>(
    rules: &GameRuleSet,
    solver: &mut Solver,
    min_words: usize,
    min_score: usize,
    reverse_target: bool,
    rng: &mut R,
) -> Result<String, Error> {
    if min_words == 0 && min_score == 0 && !reverse_target {
        return generate_simple_board(rules, rng);
    }

    match &rules.letters {
        LetterDistribution::Dice { dice, shuffle_dice } => Ok(climb_dice_board(
            rules,
            solver,
            dice,
            *shuffle_dice,
            min_words,
            min_score,
            reverse_target,
            rng,
        )),
        LetterDistribution::Propensity {
            tiles,
            sample_without_replacement,
        } => Ok(climb_propensity_board(
            rules,
            solver,
            tiles,
            *sample_without_replacement,
            min_words,
            min_score,
            reverse_target,
            rng,
        )),
        LetterDistribution::WordList { .. } => Err(Error::UnsupportedGeneration),
    }
}

/// The tile count for generated boards: the configured random board
/// size, capped by (and defaulting to) the grid's active count.
fn board_capacity(rules: &GameRuleSet) -> usize {
    let max_letters = rules.scoring.random_board_size;
    if max_letters == 0 || rules.grid.tiles_set() < max_letters {
        rules.grid.tiles_set()
    } else {
        max_letters
    }
}

fn simple_dice_board<R: Rng>(
    rules: &GameRuleSet,
    dice: &[Vec<String>],
    shuffle_dice: bool,
    rng: &mut R,
) -> String {
    let max_letters = board_capacity(rules);
    let mut dice = dice.to_vec();
    if shuffle_dice {
        dice.shuffle(rng);
    }
    dice.truncate(max_letters);

    let mut board = String::new();
    for die in &dice {
        board.push_str(&die[rng.gen_range(0..die.len())]);
    }
    board
}

fn simple_propensity_board<R: Rng>(
    rules: &GameRuleSet,
    tiles: &[String],
    sample_without_replacement: bool,
    rng: &mut R,
) -> String {
    let max_letters = board_capacity(rules);
    let mut letters = tiles.to_vec();
    let mut board = String::new();

    if letters.is_empty() {
        return board;
    }

    if sample_without_replacement {
        for i in 0..max_letters {
            if i == letters.len() {
                break;
            }
            let j = i + rng.gen_range(0..letters.len() - i);
            board.push_str(&letters[j]);
            letters.swap(i, j);
        }
    } else {
        for _ in 0..max_letters {
            board.push_str(&letters[rng.gen_range(0..letters.len())]);
        }
    }

    board
}

/// Pick one candidate line from the word list by reservoir sampling,
/// optionally shuffling its tiles (multiplier marks stay attached to
/// their tile; empty tiles re-emit as `.`).
fn simple_word_list_board<R: Rng>(
    rules: &GameRuleSet,
    path: &str,
    shuffle_letters: bool,
    rng: &mut R,
) -> Result<String, Error> {
    let text = read_to_string(path).map_err(|source| Error::ReadError {
        path: String::from(path),
        source,
    })?;

    let mut board = String::new();
    let mut lines = 1usize;
    for candidate in text.split_whitespace() {
        if rng.gen::<f64>() <= 1.0 / lines as f64 {
            board = String::from(candidate);
        }
        lines += 1;
    }

    if shuffle_letters {
        let parsed = Board::new(&board, &rules.grid);
        let mut board_tiles = Vec::with_capacity(parsed.len());
        for i in 0..parsed.len() {
            let mut tile = String::new();
            for _ in 1..parsed.letter_mult(i) {
                tile.push(':');
            }
            for _ in 1..parsed.word_mult(i) {
                tile.push(';');
            }
            if parsed.tile(i).is_empty() {
                tile.push('.');
            } else {
                tile.push_str(parsed.tile(i));
            }
            board_tiles.push(tile);
        }
        board_tiles.shuffle(rng);
        board = board_tiles.concat();
    }

    Ok(board)
}

#[allow(clippy::too_many_arguments)]
fn climb_dice_board<R: Rng>(
    rules: &GameRuleSet,
    solver: &mut Solver,
    dice: &[Vec<String>],
    shuffle_dice: bool,
    min_words: usize,
    min_score: usize,
    reverse_target: bool,
    rng: &mut R,
) -> String {
    let is_anagram = rules.grid.adjacency() == Adjacency::Full;
    let max_letters = board_capacity(rules);

    let mut best_score = initial_best(reverse_target);
    let mut best_points = initial_best(reverse_target);
    let mut duds = 0;
    let mut changes: i32 = 1;
    let mut iterations = 0usize;

    let mut dice = dice.to_vec();
    if shuffle_dice {
        dice.shuffle(rng);
    }
    dice.truncate(max_letters);

    let num_dice = dice.len();
    if num_dice == 0 {
        return String::new();
    }
    let mut best = Dice::new(dice, rng);

    loop {
        iterations += 1;
        let mut tmp = best.clone();

        // Anagram boards are fully connected, so swapping slots changes
        // nothing; only rerolls matter.
        if is_anagram || rng.gen_range(0..2) == 1 {
            tmp.roll_one(rng.gen_range(0..num_dice), rng);
        } else {
            let i = rng.gen_range(0..num_dice);
            let j = rng.gen_range(0..num_dice);
            tmp.swap_dice(i, j);
        }

        let board = Board::new(&tmp.letters(), &rules.grid);
        solver.solve(&board, &rules.scoring);
        let (board_score, board_points) = tally(solver);

        if accepts(reverse_target, best_score, best_points, board_score, board_points, changes) {
            best = tmp;
            best_score = board_score;
            best_points = board_points;
            duds = 0;
            changes += 1;
        } else {
            duds += 1;
        }

        if duds >= MAX_DUDS
            || target_met(reverse_target, best_score, best_points, min_words, min_score)
        {
            break;
        }
    }

    debug!(
        "board settled after {} iterations: {} words, {} points",
        iterations, best_score, best_points
    );
    best.letters()
}

#[allow(clippy::too_many_arguments)]
fn climb_propensity_board<R: Rng>(
    rules: &GameRuleSet,
    solver: &mut Solver,
    prop_letters: &[String],
    sample_without_replacement: bool,
    min_words: usize,
    min_score: usize,
    reverse_target: bool,
    rng: &mut R,
) -> String {
    let is_anagram = rules.grid.adjacency() == Adjacency::Full;
    let max_letters = board_capacity(rules);

    let mut best_score = initial_best(reverse_target);
    let mut best_points = initial_best(reverse_target);
    let mut duds = 0;
    let mut changes: i32 = 1;
    let mut iterations = 0usize;

    let mut num_letters = max_letters;
    let mut best: Vec<String> = Vec::new();
    let mut pool: Vec<String> = Vec::new();
    let mut prop_letters = prop_letters.to_vec();

    if prop_letters.is_empty() {
        return String::new();
    }

    if sample_without_replacement {
        let mut i = 0;
        while i < max_letters {
            if i == prop_letters.len() {
                num_letters = i;
                break;
            }
            let j = i + rng.gen_range(0..prop_letters.len() - i);
            best.push(prop_letters[j].clone());
            prop_letters.swap(i, j);
            i += 1;
        }
        if i < prop_letters.len() {
            pool.extend_from_slice(&prop_letters[i..]);
        }
    } else {
        for _ in 0..max_letters {
            best.push(prop_letters[rng.gen_range(0..prop_letters.len())].clone());
        }
    }

    if num_letters == 0 {
        return best.concat();
    }

    // An anagram board is fully connected, so the only useful move is
    // swapping a letter for one outside the board; with nothing left in
    // the pool there is no move to make.
    if is_anagram && sample_without_replacement && pool.is_empty() {
        return best.concat();
    }

    loop {
        iterations += 1;
        let mut tmp = best.clone();
        let save_pool = pool.clone();

        if is_anagram
            || (rng.gen_range(0..2) == 1 && !(sample_without_replacement && pool.is_empty()))
        {
            // change one of the letters
            let i = rng.gen_range(0..num_letters);
            if sample_without_replacement {
                let j = rng.gen_range(0..pool.len());
                std::mem::swap(&mut tmp[i], &mut pool[j]);
            } else {
                let j = rng.gen_range(0..prop_letters.len());
                tmp[i] = prop_letters[j].clone();
            }
        } else {
            let i = rng.gen_range(0..num_letters);
            let j = rng.gen_range(0..num_letters);
            tmp.swap(i, j);
        }

        let board = Board::new(&tmp.concat(), &rules.grid);
        solver.solve(&board, &rules.scoring);
        let (board_score, board_points) = tally(solver);

        if accepts(reverse_target, best_score, best_points, board_score, board_points, changes) {
            best = tmp;
            best_score = board_score;
            best_points = board_points;
            duds = 0;
            changes += 1;
        } else {
            duds += 1;
            pool = save_pool;
        }

        if duds >= MAX_DUDS
            || target_met(reverse_target, best_score, best_points, min_words, min_score)
        {
            break;
        }
    }

    debug!(
        "board settled after {} iterations: {} words, {} points",
        iterations, best_score, best_points
    );
    best.concat()
}

// 0 when maximizing, the maximum value when minimizing, so the first
// solved candidate always registers as an improvement.
fn initial_best(reverse_target: bool) -> usize {
    if reverse_target {
        usize::MAX
    } else {
        0
    }
}

/// The acceptance rule. Besides strict improvement in either metric, a
/// candidate within `250 / changes` of the best word count is accepted;
/// the subtraction wraps and the cast narrows on purpose, so while
/// `changes` is small a candidate that beats the best shows up as a huge
/// negative difference and always passes.
fn accepts(
    reverse_target: bool,
    best_score: usize,
    best_points: usize,
    board_score: usize,
    board_points: usize,
    changes: i32,
) -> bool {
    if reverse_target {
        board_score < best_score
            || board_points < best_points
            || (board_score.wrapping_sub(best_score) as i32) < 250 / changes
    } else {
        board_score > best_score
            || board_points > best_points
            || (best_score.wrapping_sub(board_score) as i32) < 250 / changes
    }
}

fn target_met(
    reverse_target: bool,
    best_score: usize,
    best_points: usize,
    min_words: usize,
    min_score: usize,
) -> bool {
    if reverse_target {
        best_score <= min_words && best_points <= min_score
    } else {
        best_score >= min_words && best_points >= min_score
    }
}

/// Distinct-word count and total points of the solver's current
/// solutions.
fn tally(solver: &Solver) -> (usize, usize) {
    let mut solutions = solver.solutions().to_vec();
    sort_solutions(&mut solutions);
    dedup_solutions(&mut solutions);
    let points = solutions.iter().map(|s| s.score() as usize).sum();
    (solutions.len(), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use crate::grid::Grid;
    use crate::rules::ScoringRules;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ruleset(letters: LetterDistribution, grid: Grid) -> GameRuleSet {
        let mut scoring = ScoringRules::default();
        scoring.letter_values = ('A'..='Z').map(|c| (c, 1)).collect();
        GameRuleSet {
            name: String::from("test"),
            grid,
            dictionary: String::new(),
            scoring,
            letters,
            preferences: Preferences::default(),
        }
    }

    fn cube_letters(board: &str) -> Vec<char> {
        let mut letters: Vec<char> = board.chars().collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn test_simple_dice_board() {
        let letters = LetterDistribution::Dice {
            dice: vec![vec![String::from("A")], vec![String::from("B")]],
            shuffle_dice: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 2, Adjacency::Full));
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_simple_board(&rules, &mut rng).unwrap();
        assert_eq!(cube_letters(&board), ['A', 'B']);
    }

    #[test]
    fn test_simple_board_respects_random_board_size() {
        let letters = LetterDistribution::Propensity {
            tiles: vec!["A", "B", "C", "D"].into_iter().map(String::from).collect(),
            sample_without_replacement: true,
        };
        let mut rules = ruleset(letters, Grid::rectangle(1, 4, Adjacency::Full));
        rules.scoring.random_board_size = 2;
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_simple_board(&rules, &mut rng).unwrap();
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_simple_propensity_with_replacement_can_repeat() {
        let letters = LetterDistribution::Propensity {
            tiles: vec![String::from("A")],
            sample_without_replacement: false,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 3, Adjacency::Full));
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_simple_board(&rules, &mut rng).unwrap(), "AAA");
    }

    #[test]
    fn test_word_list_generation_with_targets_is_unsupported() {
        let letters = LetterDistribution::WordList {
            path: String::from("boards.txt"),
            shuffle_letters: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 3, Adjacency::Full));
        let mut solver = Solver::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            generate_board(&rules, &mut solver, 1, 0, false, &mut rng),
            Err(Error::UnsupportedGeneration)
        ));
    }

    #[test]
    fn test_climb_terminates_on_unreachable_target() {
        let letters = LetterDistribution::Dice {
            dice: vec![
                vec![String::from("A"), String::from("B")],
                vec![String::from("C"), String::from("A")],
            ],
            shuffle_dice: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 2, Adjacency::Full));
        let mut solver = Solver::new();
        solver.add_word("AB");
        let mut rng = StdRng::seed_from_u64(3);
        // no two-dice board yields 1000 words; the dud counter stops the
        // climb
        let board = generate_board(&rules, &mut solver, 1000, 0, false, &mut rng).unwrap();
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_climb_reaches_easy_target() {
        let letters = LetterDistribution::Dice {
            dice: vec![
                vec![String::from("A"), String::from("X")],
                vec![String::from("B"), String::from("Y")],
            ],
            shuffle_dice: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 2, Adjacency::Straight));
        let mut solver = Solver::new();
        solver.add_word("AB");
        solver.add_word("BA");
        let mut rng = StdRng::seed_from_u64(5);
        let board = generate_board(&rules, &mut solver, 2, 4, false, &mut rng).unwrap();
        assert_eq!(cube_letters(&board), ['A', 'B']);
    }

    #[test]
    fn test_climb_propensity_without_replacement_keeps_pool_letters() {
        let letters = LetterDistribution::Propensity {
            tiles: vec!["A", "B", "C", "D", "E"].into_iter().map(String::from).collect(),
            sample_without_replacement: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 2, Adjacency::Straight));
        let mut solver = Solver::new();
        solver.add_word("AB");
        let mut rng = StdRng::seed_from_u64(11);
        let board = generate_board(&rules, &mut solver, 1, 0, false, &mut rng).unwrap();
        // board letters always come from the pool
        assert_eq!(board.len(), 2);
        assert!(board.chars().all(|c| ('A'..='E').contains(&c)));
    }

    #[test]
    fn test_anagram_without_pool_returns_immediately() {
        let letters = LetterDistribution::Propensity {
            tiles: vec![String::from("A"), String::from("B")],
            sample_without_replacement: true,
        };
        let rules = ruleset(letters, Grid::rectangle(1, 2, Adjacency::Full));
        let mut solver = Solver::new();
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_board(&rules, &mut solver, 1000, 0, false, &mut rng).unwrap();
        assert_eq!(cube_letters(&board), ['A', 'B']);
    }

    #[test]
    fn test_acceptance_window() {
        // early on the window is wide open in both directions
        assert!(accepts(false, 10, 10, 5, 5, 1));
        // with many changes behind it only improvement passes
        assert!(!accepts(false, 10, 10, 5, 5, 300));
        assert!(accepts(false, 10, 10, 11, 5, 300));
        assert!(accepts(false, 10, 10, 5, 11, 300));
        // minimizing flips the directions
        assert!(!accepts(true, 10, 10, 11, 11, 300));
        assert!(accepts(true, 10, 10, 9, 11, 300));
    }
}
