use crate::board::Board;
use crate::config::GameRuleSet;
use crate::distribution::LetterDistribution;
use crate::dlx::Dlx;
use crate::grid::Grid;
use crate::maxflow::MaxFlow;
use log::debug;
use std::collections::BTreeMap;
use std::fmt;

/// Counters for the validation strategies employed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidatorStats {
    /// The number of times Ford-Fulkerson is employed
    pub ff_used: usize,
    /// The number of times Ford-Fulkerson finds a match
    pub ff_found: usize,
    /// The number of times Dancing Links is employed
    pub dlx_used: usize,
    /// The number of times Dancing Links finds a match
    pub dlx_found: usize,
    /// The number of times the word is too long to be spelled at all
    pub long_words: usize,
}

impl fmt::Display for ValidatorStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Validator stats:")?;
        writeln!(f, "FF Used:    {}", self.ff_used)?;
        writeln!(f, "FF Found:   {}", self.ff_found)?;
        writeln!(f, "DLX Used:   {}", self.dlx_used)?;
        writeln!(f, "DLX Found:  {}", self.dlx_found)?;
        write!(f, "Long words: {}", self.long_words)
    }
}

/// Decides whether a word or board is producible from a game's letter
/// distribution.
///
/// Bipartite matching (Ford-Fulkerson) is the fast path; the exact-cover
/// fallback (DLX) only runs for words when multi-letter faces could
/// explain letters the matching could not. The validator never fails: it
/// answers with a boolean.
#[derive(Debug, Default)]
pub struct Validator {
    stats: ValidatorStats,
}

impl Validator {
    pub fn new() -> Validator {
        Validator::default()
    }

    pub fn stats(&self) -> &ValidatorStats {
        &self.stats
    }

    /// Check `to_check` against the game's letter distribution.
    ///
    /// With `interpret` set the input is a word to spell (wildcards
    /// expand, multi-letter faces match into the word); without it the
    /// input is a board whose tile multiset must be drawable.
    pub fn validate(&mut self, rules: &GameRuleSet, to_check: &str, interpret: bool) -> bool {
        match &rules.letters {
            LetterDistribution::Dice { dice, .. } => {
                let mut dice: Vec<Vec<String>> = dice
                    .iter()
                    .map(|die| die.iter().map(|face| clean_face(face)).collect())
                    .collect();
                let cleaned = clean_input(to_check, interpret);

                for die in &mut dice {
                    die.sort();
                    die.dedup();
                }

                if interpret {
                    let word = cleaned.to_ascii_uppercase();
                    if rules.scoring.q_is_qu {
                        for die in &mut dice {
                            for face in die.iter_mut() {
                                *face = face.replace('Q', "QU");
                            }
                        }
                    }
                    self.validate_dice_word(&dice, &word)
                } else {
                    let tiles = board_tiles(&cleaned, &rules.grid);
                    self.validate_dice_board(&dice, &tiles)
                }
            }
            LetterDistribution::Propensity {
                tiles,
                sample_without_replacement,
            } => {
                let mut letters: Vec<String> = tiles.iter().map(|tile| clean_face(tile)).collect();
                let cleaned = clean_input(to_check, interpret);

                // With replacement every tile is an unlimited supply, so
                // duplicates in the pool carry no information.
                if !sample_without_replacement {
                    letters.sort();
                    letters.dedup();
                }

                if interpret {
                    let word = cleaned.to_ascii_uppercase();
                    if rules.scoring.q_is_qu {
                        for tile in letters.iter_mut() {
                            *tile = tile.replace('Q', "QU");
                        }
                    }
                    self.validate_propensity_word(&letters, &word, *sample_without_replacement)
                } else {
                    let tiles = board_tiles(&cleaned, &rules.grid);
                    self.validate_propensity_board(&letters, &tiles, *sample_without_replacement)
                }
            }
            LetterDistribution::WordList { .. } => {
                debug!("word list games cannot be validated");
                false
            }
        }
    }

    /// Can the word be spelled by some arrangement of the dice?
    /// Ford-Fulkerson decides when single-letter faces suffice; DLX takes
    /// over when a multi-letter face present in the word might.
    fn validate_dice_word(&mut self, dice: &[Vec<String>], word: &str) -> bool {
        debug!("checking \"{}\" with FF", word);
        self.stats.ff_used += 1;

        // 0 = super source, then dice, then word positions, then sink
        let mut ff = MaxFlow::new(dice.len() + word.len() + 2);
        let source = 0;
        let sink = dice.len() + word.len() + 1;

        for i in 1..=dice.len() {
            ff.add_edge(source, i);
        }
        for k in 1..=word.len() {
            ff.add_edge(k + dice.len(), sink);
        }
        for (i, die) in dice.iter().enumerate() {
            for face in die {
                if face.len() != 1 {
                    continue;
                }
                for (k, letter) in word.bytes().enumerate() {
                    if face.as_bytes()[0] == letter || face == "?" {
                        ff.add_edge(i + 1, k + 1 + dice.len());
                    }
                }
            }
        }

        if ff.max_flow(source, sink) == word.len() {
            debug!("FF found a solution, done");
            self.stats.ff_found += 1;
            return true;
        }

        // No single-letter assignment. The word may still be impossible
        // outright: the dice cannot produce more letters than the sum of
        // their longest faces.
        let capacity: usize = dice
            .iter()
            .map(|die| die.iter().map(String::len).max().unwrap_or(0))
            .sum();
        if word.len() > capacity {
            debug!("word is too long to be spelled with these dice, done");
            self.stats.long_words += 1;
            return false;
        }

        let multi_matches = dice.iter().flatten().any(|face| {
            face.len() > 1
                && (word.contains(face.as_str())
                    || (face.starts_with('?')
                        && word.find(&face[1..]).map_or(false, |at| at > 0)))
        });
        if !multi_matches {
            debug!("FF failed and no multi-letter face appears in the word, done");
            return false;
        }

        debug!("falling back to DLX");
        self.stats.dlx_used += 1;

        // Columns 0..len(word) are word positions, then one per die.
        let mut dlx = Dlx::new();
        for _ in 0..word.len() + dice.len() {
            dlx.add_column();
        }
        let mut die_col = word.len();
        for die in dice {
            for face in die {
                add_face_rows(&mut dlx, word, face, die_col);
            }
            // the die may go unused
            dlx.add_row(&[die_col]);
            die_col += 1;
        }

        let found = dlx.solve(false) > 0;
        if found {
            debug!("DLX found a solution, done");
            self.stats.dlx_found += 1;
        } else {
            debug!("DLX did not find a solution, done");
        }
        found
    }

    /// Is the tile multiset drawable from the dice? One die can supply at
    /// most one tile, faces must match tiles exactly, and the board need
    /// not use every die.
    fn validate_dice_board(&mut self, dice: &[Vec<String>], board_tiles: &[String]) -> bool {
        self.stats.ff_used += 1;

        let mut ff = MaxFlow::new(dice.len() + board_tiles.len() + 2);
        let source = 0;
        let sink = dice.len() + board_tiles.len() + 1;

        for i in 1..=dice.len() {
            ff.add_edge(source, i);
        }
        for k in 1..=board_tiles.len() {
            ff.add_edge(k + dice.len(), sink);
        }
        for (i, die) in dice.iter().enumerate() {
            for face in die {
                for (k, tile) in board_tiles.iter().enumerate() {
                    if face == tile {
                        ff.add_edge(i + 1, k + 1 + dice.len());
                    }
                }
            }
        }

        let found = ff.max_flow(source, sink) == board_tiles.len();
        if found {
            self.stats.ff_found += 1;
        }
        found
    }

    /// Board tiles against a propensity pool: every tile must exist in
    /// the pool, each pool entry usable once when sampling without
    /// replacement.
    fn validate_propensity_board(
        &mut self,
        prop_letters: &[String],
        board_tiles: &[String],
        sample_without_replacement: bool,
    ) -> bool {
        let mut letters = prop_letters.to_vec();
        for tile in board_tiles {
            match letters.iter().position(|t| t == tile) {
                Some(i) => {
                    if sample_without_replacement {
                        letters.remove(i);
                    }
                }
                None => {
                    debug!("tile '{}' does not exist in pool, done", tile);
                    return false;
                }
            }
        }
        true
    }

    /// Word against a propensity pool: greedy single-letter matching
    /// (consuming `?` wildcards for unmatched letters), with the DLX
    /// fallback when a multi-letter tile appears in the word.
    fn validate_propensity_word(
        &mut self,
        prop_letters: &[String],
        word: &str,
        sample_without_replacement: bool,
    ) -> bool {
        let multiletter_tiles = prop_letters.iter().any(|tile| tile.len() > 1);
        let mut letters = prop_letters.to_vec();

        for letter in word.chars() {
            let single = letter.to_string();
            let found = letters
                .iter()
                .position(|tile| *tile == single)
                .or_else(|| letters.iter().position(|tile| tile == "?"));
            match found {
                Some(i) => {
                    if sample_without_replacement {
                        letters.remove(i);
                    }
                }
                None => {
                    if !multiletter_tiles {
                        debug!("tile '{}' not in pool and no multi-letter tiles exist", single);
                        return false;
                    }
                    let multi_matches = letters.iter().any(|tile| {
                        tile.len() > 1
                            && (word.contains(tile.as_str())
                                || (tile.starts_with('?')
                                    && word.find(&tile[1..]).map_or(false, |at| at > 0)))
                    });
                    if !multi_matches {
                        debug!("no single-letter spelling and no multi-letter tile matches, done");
                        return false;
                    }
                    debug!("falling back to DLX");
                    return self.propensity_dlx(prop_letters, word, sample_without_replacement);
                }
            }
        }

        true
    }

    fn propensity_dlx(
        &mut self,
        prop_letters: &[String],
        word: &str,
        sample_without_replacement: bool,
    ) -> bool {
        self.stats.dlx_used += 1;

        let mut prop_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for tile in prop_letters {
            *prop_counts.entry(tile).or_default() += 1;
        }

        // How many of each tile the word could possibly use. With
        // replacement the pool count is no limit.
        let mut letters_map: BTreeMap<&str, usize> = BTreeMap::new();
        for (&tile, &count) in &prop_counts {
            if tile == "?" {
                // With replacement a wildcard would already have matched
                // in the greedy pass.
                if sample_without_replacement {
                    letters_map.insert(tile, word.len().min(count));
                }
                continue;
            }
            let (start, face_text) = if let Some(tail) = tile.strip_prefix('?') {
                (1, tail)
            } else {
                (0, tile)
            };
            let mut match_count = 0;
            let mut pos = start;
            while pos <= word.len() {
                match word[pos..].find(face_text) {
                    Some(found) => {
                        match_count += 1;
                        pos += found + 1;
                    }
                    None => break,
                }
            }
            let limit = if sample_without_replacement {
                match_count.min(count)
            } else {
                match_count
            };
            letters_map.insert(tile, limit);
        }

        let mut letters: Vec<&str> = Vec::new();
        for (&tile, &count) in &letters_map {
            for _ in 0..count {
                letters.push(tile);
            }
        }

        let mut dlx = Dlx::new();
        for _ in 0..word.len() + letters.len() {
            dlx.add_column();
        }
        let mut tile_col = word.len();
        for tile in &letters {
            add_face_rows(&mut dlx, word, tile, tile_col);
            dlx.add_row(&[tile_col]);
            tile_col += 1;
        }

        let found = dlx.solve(false) > 0;
        if found {
            self.stats.dlx_found += 1;
        }
        found
    }
}

/// Strip a die face or pool tile down to letters and wildcards,
/// uppercased.
fn clean_face(face: &str) -> String {
    face.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == '?')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Strip the input down to letters; wildcards survive only for board
/// validation.
fn clean_input(input: &str, interpret: bool) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || (!interpret && *c == '?'))
        .collect()
}

/// Parse the cleaned input as a board and return its tiles, uppercased.
fn board_tiles(input: &str, grid: &Grid) -> Vec<String> {
    let board = Board::new(input, grid);
    (0..board.len())
        .map(|i| board.tile(i).to_ascii_uppercase())
        .collect()
}

/// Add the DLX rows for one die face (or pool tile): every placement of
/// the face in the word, covering the spanned positions, the implicit
/// wildcard position for `?`-led faces, and the face's own column.
fn add_face_rows(dlx: &mut Dlx, word: &str, face: &str, face_col: usize) {
    if face == "?" {
        for i in 0..word.len() {
            dlx.add_row(&[i, face_col]);
        }
        return;
    }

    let (start, face_text, using_wildcard) = if let Some(tail) = face.strip_prefix('?') {
        (1, tail, true)
    } else {
        (0, face, false)
    };

    let mut pos = start;
    while pos <= word.len() {
        let found = match word[pos..].find(face_text) {
            Some(found) => pos + found,
            None => break,
        };
        let mut row: Vec<usize> = (found..found + face_text.len()).collect();
        if using_wildcard {
            // the `?` consumes the position just before the tail
            row.push(found - 1);
        }
        row.push(face_col);
        dlx.add_row(&row);
        pos = found + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preferences;
    use crate::grid::Adjacency;
    use crate::rules::ScoringRules;

    fn dice(faces: &[&[&str]]) -> LetterDistribution {
        LetterDistribution::Dice {
            dice: faces
                .iter()
                .map(|die| die.iter().map(|f| String::from(*f)).collect())
                .collect(),
            shuffle_dice: true,
        }
    }

    fn pool(tiles: &[&str], sample_without_replacement: bool) -> LetterDistribution {
        LetterDistribution::Propensity {
            tiles: tiles.iter().map(|t| String::from(*t)).collect(),
            sample_without_replacement,
        }
    }

    fn ruleset(letters: LetterDistribution, q_is_qu: bool) -> GameRuleSet {
        GameRuleSet {
            name: String::from("test"),
            grid: Grid::rectangle(1, 10, Adjacency::Full),
            dictionary: String::new(),
            scoring: ScoringRules {
                q_is_qu,
                ..ScoringRules::default()
            },
            letters,
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_dice_board() {
        let rules = ruleset(dice(&[&["A", "B"], &["C", "D"], &["E", "F"]]), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "ACE", false));
        assert!(v.validate(&rules, "ACF", false));
        assert!(!v.validate(&rules, "ACG", false));
        // a board need not use every die
        assert!(v.validate(&rules, "BD", false));
        assert_eq!(v.stats().ff_used, 4);
        assert_eq!(v.stats().ff_found, 3);
    }

    #[test]
    fn test_dice_board_with_multi_letter_faces() {
        let rules = ruleset(dice(&[&["Qu", "A"], &["B"]]), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "QuB", false));
        assert!(!v.validate(&rules, "QB", false));
    }

    #[test]
    fn test_dice_word_single_letters() {
        let rules = ruleset(dice(&[&["C", "X"], &["A"], &["T", "S"]]), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "CAT", true));
        assert!(v.validate(&rules, "XAS", true));
        assert!(!v.validate(&rules, "CAB", true));
        assert_eq!(v.stats().dlx_used, 0);
    }

    #[test]
    fn test_dice_word_wildcard_face() {
        let rules = ruleset(dice(&[&["A"], &["?"]]), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "AZ", true));
        assert!(v.validate(&rules, "ZA", true));
        assert!(!v.validate(&rules, "ZZZ", true));
    }

    #[test]
    fn test_dice_word_too_long() {
        let rules = ruleset(dice(&[&["A", "B"]]), false);
        let mut v = Validator::new();
        assert!(!v.validate(&rules, "AB", true));
        assert_eq!(v.stats().long_words, 1);
    }

    #[test]
    fn test_dice_word_multi_letter_dlx() {
        // ?h can place "xH" with the wildcard showing any letter
        let rules = ruleset(dice(&[&["?h"], &["E"], &["L"], &["L"], &["O"]]), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "OHELL", true));
        assert_eq!(v.stats().dlx_used, 1);
        assert_eq!(v.stats().dlx_found, 1);
        // H at offset 0 leaves no position for the wildcard to consume
        assert!(!v.validate(&rules, "HELLO", true));
    }

    #[test]
    fn test_dice_word_q_is_qu() {
        let rules = ruleset(dice(&[&["Q"], &["I"], &["T"]]), true);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "QUIT", true));
        assert_eq!(v.stats().dlx_used, 1);

        let rules = ruleset(dice(&[&["Q"], &["I"], &["T"]]), false);
        assert!(!v.validate(&rules, "QUIT", true));
    }

    #[test]
    fn test_propensity_board() {
        let rules = ruleset(pool(&["A", "B", "C"], true), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "AB", false));
        assert!(v.validate(&rules, "CBA", false));
        assert!(!v.validate(&rules, "AA", false));

        let rules = ruleset(pool(&["A", "B", "C"], false), false);
        assert!(v.validate(&rules, "AA", false));
    }

    #[test]
    fn test_propensity_word_greedy() {
        let rules = ruleset(pool(&["C", "A", "T", "?"], true), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "CAT", true));
        assert!(v.validate(&rules, "CATS", true));
        assert!(!v.validate(&rules, "CATSS", true));
    }

    #[test]
    fn test_propensity_word_with_replacement() {
        let rules = ruleset(pool(&["A", "B"], false), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "ABBA", true));
        assert!(!v.validate(&rules, "ABC", true));
    }

    #[test]
    fn test_propensity_word_multi_letter_dlx() {
        let rules = ruleset(pool(&["Th", "E"], true), false);
        let mut v = Validator::new();
        assert!(v.validate(&rules, "THE", true));
        assert_eq!(v.stats().dlx_used, 1);
        assert!(!v.validate(&rules, "TEE", true));
    }

    #[test]
    fn test_word_list_never_validates() {
        let rules = ruleset(
            LetterDistribution::WordList {
                path: String::from("boards.txt"),
                shuffle_letters: true,
            },
            false,
        );
        let mut v = Validator::new();
        assert!(!v.validate(&rules, "ANYTHING", false));
    }
}
