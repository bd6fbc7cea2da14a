use serde::Deserialize;
use std::collections::HashMap;

/// The rules that specify how a game is scored.
///
/// Deserializes from the `ScoringRules` section of a game config; missing
/// options take the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Treat every `Q` as `QU`: trie descent passes through `U` and the
    /// emitted word gains a `U` after each `Q`.
    #[serde(rename = "QIsQu")]
    pub q_is_qu: bool,

    /// Whether `QU` counts as 1 or 2 toward the word length.
    #[serde(rename = "QuLength")]
    pub qu_length: u32,

    /// Solutions shorter than this are discarded.
    #[serde(rename = "MinWordLength")]
    pub min_word_length: usize,

    /// Words no longer than this score `short_word_points` instead of
    /// their letter value.
    #[serde(rename = "ShortWordLength")]
    pub short_word_length: usize,

    #[serde(rename = "ShortWordPoints")]
    pub short_word_points: u32,

    /// Apply the accumulated word multiplier to short word points.
    #[serde(rename = "ShortWordMultiplier")]
    pub short_word_multiplier: bool,

    /// Round fractional scores up instead of truncating.
    #[serde(rename = "RoundBonusUp")]
    pub round_bonus_up: bool,

    /// Multiply by the length bonus instead of adding it.
    #[serde(rename = "MultiplyLengthBonus")]
    pub multiply_length_bonus: bool,

    /// Whether a letter supplied by a wildcard contributes its letter
    /// value.
    #[serde(rename = "WildCardPoints")]
    pub wild_card_points: bool,

    /// Preferred tile count for generated boards; 0 means the grid's
    /// active count.
    #[serde(rename = "RandomBoardSize")]
    pub random_board_size: usize,

    #[serde(rename = "LetterValues")]
    pub letter_values: HashMap<char, u32>,

    /// Bonus per exact word length; may be fractional.
    #[serde(rename = "LengthBonuses")]
    pub length_bonuses: HashMap<usize, f64>,
}

impl Default for ScoringRules {
    fn default() -> ScoringRules {
        ScoringRules {
            q_is_qu: true,
            qu_length: 2,
            min_word_length: 1,
            short_word_length: 0,
            short_word_points: 0,
            short_word_multiplier: false,
            round_bonus_up: false,
            multiply_length_bonus: false,
            wild_card_points: false,
            random_board_size: 0,
            letter_values: HashMap::new(),
            length_bonuses: HashMap::new(),
        }
    }
}

impl ScoringRules {
    /// The point value of `letter`; unlisted letters are worth 0.
    pub fn letter_value(&self, letter: char) -> u32 {
        self.letter_values
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// The bonus for a word of exactly `length` letters, default 0.
    pub fn length_bonus(&self, length: usize) -> f64 {
        self.length_bonuses.get(&length).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = ScoringRules::default();
        assert!(rules.q_is_qu);
        assert_eq!(rules.qu_length, 2);
        assert_eq!(rules.min_word_length, 1);
        assert_eq!(rules.letter_value('A'), 0);
        assert_eq!(rules.length_bonus(8), 0.0);
    }

    #[test]
    fn test_letter_value_is_case_insensitive() {
        let mut rules = ScoringRules::default();
        rules.letter_values.insert('Q', 10);
        assert_eq!(rules.letter_value('q'), 10);
        assert_eq!(rules.letter_value('Q'), 10);
    }

    #[test]
    fn test_deserialize() {
        let rules: ScoringRules = serde_json::from_str(
            r#"{
                "QIsQu": false,
                "MinWordLength": 3,
                "LetterValues": {"A": 1, "Z": 10},
                "LengthBonuses": {"7": 1.5}
            }"#,
        )
        .unwrap();
        assert!(!rules.q_is_qu);
        assert_eq!(rules.min_word_length, 3);
        assert_eq!(rules.qu_length, 2);
        assert_eq!(rules.letter_value('Z'), 10);
        assert_eq!(rules.length_bonus(7), 1.5);
    }
}
