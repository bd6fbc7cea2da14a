//! A configurable word game solver and board generator.
//!
//! This crate finds and scores every word a tiled board can produce,
//! generates boards that hit word-count or score targets, and decides
//! whether a word or board can be produced at all from a game's dice or
//! letter pool. Game variants are described by a [`GameRuleSet`]: a
//! [`Grid`] (active positions and adjacency), [`ScoringRules`], a
//! [`LetterDistribution`] and a dictionary, usually loaded together from
//! a JSON [`GameConfig`].
//!
//! # Basic usage
//! ```
//! use wordgame_solver::{Adjacency, Board, Grid, ScoringRules, Solver};
//!
//! let grid = Grid::rectangle(1, 3, Adjacency::Straight);
//! let mut solver = Solver::new();
//! solver.add_word("cat");
//! let mut rules = ScoringRules::default();
//! rules.letter_values = [('C', 3), ('A', 1), ('T', 1)].into_iter().collect();
//!
//! solver.solve(&Board::new("CAT", &grid), &rules);
//! for solution in solver.solutions() {
//!     println!("{} {}", solution.word(), solution.score());
//! }
//! ```
//!
//! Word and board validation runs bipartite matching first and falls
//! back to exact cover only when multi-letter die faces are in play:
//! ```
//! # use wordgame_solver::{GameConfig, GameRuleSet, Validator, Error};
//! # fn example(config: &GameConfig) -> Result<(), Error> {
//! let ruleset = GameRuleSet::resolve(config, "boggle")?;
//! let mut validator = Validator::new();
//! assert!(validator.validate(&ruleset, "QUEST", true));
//! # Ok(())
//! # }
//! ```

mod analyze;
mod board;
mod config;
mod dice;
mod dictionary;
mod distribution;
mod dlx;
mod error;
mod generator;
mod grid;
mod maxflow;
mod rules;
mod solution;
mod solver;
mod trie;
mod validate;

pub use crate::analyze::SolutionAnalysis;
pub use crate::board::Board;
pub use crate::config::{GameConfig, GameRuleSet, GameRules, Preferences};
pub use crate::dice::Dice;
pub use crate::dictionary::{load_solver, read_words};
pub use crate::distribution::{parse_dice, parse_tiles, LetterDistribution};
pub use crate::dlx::Dlx;
pub use crate::error::Error;
pub use crate::generator::{generate_board, generate_simple_board};
pub use crate::grid::{Adjacency, Grid, MAX_GRID_WIDTH};
pub use crate::maxflow::MaxFlow;
pub use crate::rules::ScoringRules;
pub use crate::solution::{dedup_solutions, sort_solutions, unescape, Solution};
pub use crate::solver::Solver;
pub use crate::trie::Trie;
pub use crate::validate::{Validator, ValidatorStats};
