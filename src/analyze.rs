use crate::board::Board;
use crate::solution::Solution;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate statistics over a board's solution list.
///
/// Expects the solutions sorted by word then by score descending (see
/// [`sort_solutions`](crate::sort_solutions)); the first instance of each
/// word is its highest-scoring one and is the only one counted. Counts
/// are bucketed by word length, with bucket 0 holding board totals.
pub struct SolutionAnalysis {
    // distinct n-letter words and their total points
    word_length_counts: BTreeMap<usize, usize>,
    point_length_counts: BTreeMap<usize, usize>,
    // cumulative counts for words of n or more letters
    word_lengthp_counts: BTreeMap<usize, usize>,
    point_lengthp_counts: BTreeMap<usize, usize>,
    // distinct words touching board position n (1-based)
    position_words: BTreeMap<usize, usize>,
    position_points: BTreeMap<usize, usize>,
    // highest scoring n-letter word; index 0 is the overall best
    best_words: BTreeMap<usize, String>,
    best_word_points: BTreeMap<usize, usize>,
    board_letters: String,
}

impl SolutionAnalysis {
    pub fn new(board: &Board, solutions: &[Solution]) -> SolutionAnalysis {
        let mut analysis = SolutionAnalysis {
            word_length_counts: BTreeMap::new(),
            point_length_counts: BTreeMap::new(),
            word_lengthp_counts: BTreeMap::new(),
            point_lengthp_counts: BTreeMap::new(),
            position_words: BTreeMap::new(),
            position_points: BTreeMap::new(),
            best_words: BTreeMap::new(),
            best_word_points: BTreeMap::new(),
            board_letters: String::from(board.letters()),
        };

        let mut last_word = "";
        let mut last_word_positions: BTreeSet<usize> = BTreeSet::new();

        for solution in solutions {
            let score = solution.score() as usize;
            let word = solution.word();
            let word_length = word.len();

            if word != last_word {
                last_word_positions.clear();
            }

            if *analysis.best_word_points.entry(word_length).or_default() < score {
                analysis.best_words.insert(word_length, String::from(word));
                analysis.best_word_points.insert(word_length, score);
            }
            if *analysis.best_word_points.entry(0).or_default() < score {
                analysis.best_words.insert(0, String::from(word));
                analysis.best_word_points.insert(0, score);
            }

            if word != last_word {
                *analysis.word_length_counts.entry(word_length).or_default() += 1;
                *analysis.word_length_counts.entry(0).or_default() += 1;

                // Duplicate words are not counted again; the first
                // instance in a properly sorted list is the highest
                // scoring one.
                *analysis.point_length_counts.entry(word_length).or_default() += score;
                *analysis.point_length_counts.entry(0).or_default() += score;

                for j in 0..=word_length {
                    *analysis.word_lengthp_counts.entry(j).or_default() += 1;
                    *analysis.point_lengthp_counts.entry(j).or_default() += score;
                }

                *analysis.position_words.entry(0).or_default() += 1;
                *analysis.position_points.entry(0).or_default() += score;
            }

            // Each word is counted at most once per position, even when
            // tied-score instances touch the same tile.
            for &pos in solution.positions() {
                let p = pos as usize + 1;
                if last_word_positions.insert(p) {
                    *analysis.position_words.entry(p).or_default() += 1;
                    *analysis.position_points.entry(p).or_default() += score;
                }
            }

            last_word = solution.word();
        }

        analysis
    }

    /// Render the analysis according to a format string.
    ///
    /// Directives: `%B` board letters, `%nW`/`%nS` distinct words/points
    /// at position `n` (`n` = 0 means the whole board), `%nC`/`%nP`
    /// count/points of exactly-n-letter words, `%n+C`/`%n+P` the same for
    /// n-or-more letters, `%nX`/`%nY` the best n-letter word and its
    /// score, `%%` a literal percent. `%*` substitutes `star_value` for
    /// `n`. The escapes `\t`, `\n` and `\\` are recognized.
    pub fn format(&self, fmt: &str, star_value: usize) -> String {
        let mut result = String::new();
        let mut it = fmt.chars().peekable();

        while let Some(ch) = it.next() {
            match ch {
                '%' => {
                    let mut counter = 0usize;
                    while let Some(digit) = it.peek().and_then(|c| c.to_digit(10)) {
                        counter = counter * 10 + digit as usize;
                        it.next();
                    }
                    let mut plus = false;
                    if it.peek() == Some(&'+') {
                        plus = true;
                        it.next();
                    }
                    if it.peek() == Some(&'*') {
                        counter = star_value;
                        it.next();
                    }
                    let spec = match it.next() {
                        Some(spec) => spec,
                        None => break,
                    };
                    match spec {
                        'B' => result.push_str(&self.board_letters),
                        'W' => result.push_str(&count(&self.position_words, counter)),
                        'S' => result.push_str(&count(&self.position_points, counter)),
                        'X' => {
                            if let Some(word) = self.best_words.get(&counter) {
                                result.push_str(word);
                            }
                        }
                        'Y' => result.push_str(&count(&self.best_word_points, counter)),
                        'C' => {
                            let map = if plus {
                                &self.word_lengthp_counts
                            } else {
                                &self.word_length_counts
                            };
                            result.push_str(&count(map, counter));
                        }
                        'P' => {
                            let map = if plus {
                                &self.point_lengthp_counts
                            } else {
                                &self.point_length_counts
                            };
                            result.push_str(&count(map, counter));
                        }
                        '%' => result.push('%'),
                        other => {
                            result.push('%');
                            result.push(other);
                        }
                    }
                }
                '\\' => {
                    let escape = match it.next() {
                        Some(escape) => escape,
                        None => break,
                    };
                    match escape {
                        '\\' => result.push('\\'),
                        't' => result.push('\t'),
                        'n' => result.push('\n'),
                        other => {
                            result.push('\\');
                            result.push(other);
                        }
                    }
                }
                other => result.push(other),
            }
        }

        result
    }
}

fn count(map: &BTreeMap<usize, usize>, key: usize) -> String {
    map.get(&key).copied().unwrap_or(0).to_string()
}
