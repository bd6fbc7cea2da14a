use crate::distribution::{parse_dice, parse_tiles, LetterDistribution};
use crate::error::Error;
use crate::grid::{Adjacency, Grid};
use crate::rules::ScoringRules;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::read_to_string;

/// String preferences consulted by the command-line front end
/// (`SolutionFormat`, `SolutionPrefix`, `SolutionSuffix`,
/// `AnalysisFormat`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preferences(BTreeMap<String, String>);

impl Preferences {
    pub fn preference(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set_preference(&mut self, key: &str, value: &str) {
        self.0.insert(String::from(key), String::from(value));
    }

    fn merge_defaults(&mut self, defaults: &Preferences) {
        for (key, value) in &defaults.0 {
            self.0.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// One `GameRules` entry: the names of the four config entries (plus
/// preferences) that make up a game.
pub struct GameRules {
    #[serde(rename = "GridDesign", default)]
    pub grid_design: String,
    #[serde(rename = "ScoringRules", default)]
    pub scoring_rules: String,
    #[serde(rename = "LetterDistribution", default)]
    pub letter_distribution: String,
    #[serde(rename = "Dictionary", default)]
    pub dictionary: String,
    #[serde(rename = "Preferences", default)]
    pub preferences: String,
}

#[derive(Debug, Deserialize)]
struct GridSpec {
    #[serde(rename = "Tiles", default)]
    tiles: Vec<(usize, usize)>,
    #[serde(rename = "Adjacency", default)]
    adjacency: Adjacency,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct DistributionSpec {
    #[serde(rename = "GenerationMethod", default)]
    generation_method: String,
    #[serde(rename = "DiceLetters", default)]
    dice_letters: String,
    #[serde(rename = "PropensityLetters", default)]
    propensity_letters: String,
    #[serde(rename = "WordListFile", default)]
    word_list_file: String,
    #[serde(rename = "ShuffleDice", default = "default_true")]
    shuffle_dice: bool,
    #[serde(rename = "ShuffleLetters", default = "default_true")]
    shuffle_letters: bool,
    #[serde(rename = "SampleWithoutReplacement", default = "default_true")]
    sample_without_replacement: bool,
}

/// A parsed game configuration: six named sections, each a map from
/// entry name to entry.
#[derive(Debug, Default)]
pub struct GameConfig {
    pub grids: BTreeMap<String, Grid>,
    pub dictionaries: BTreeMap<String, String>,
    pub scoring_rules: BTreeMap<String, ScoringRules>,
    pub distributions: BTreeMap<String, LetterDistribution>,
    pub game_rules: BTreeMap<String, GameRules>,
    pub preferences: BTreeMap<String, Preferences>,
}

impl GameConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Malformed entries are reported on the log and skipped; only an
    /// unreadable file or a document that is not JSON at all is an error.
    ///
    /// ## Errors
    /// [`Error::ReadError`] or [`Error::ConfigParseError`].
    pub fn from_file(path: &str) -> Result<GameConfig, Error> {
        let text = read_to_string(path).map_err(|source| Error::ReadError {
            path: String::from(path),
            source,
        })?;
        let root: Value = serde_json::from_str(&text).map_err(|source| Error::ConfigParseError {
            path: String::from(path),
            source,
        })?;
        Ok(GameConfig::from_value(&root))
    }

    fn from_value(root: &Value) -> GameConfig {
        let mut config = GameConfig::default();

        for (name, spec) in section::<GridSpec>(root, "Grids") {
            let mut grid = Grid::new(spec.adjacency);
            for (i, &(x, y)) in spec.tiles.iter().enumerate() {
                if !(1..=10).contains(&x) || !(1..=10).contains(&y) {
                    warn!(
                        "grid {}: position {},{} is out of range for tile #{}",
                        name,
                        x,
                        y,
                        i + 1
                    );
                    continue;
                }
                grid.set_tile(x - 1, y - 1);
            }
            config.grids.insert(name, grid);
        }

        if let Some(Value::Object(entries)) = root.get("Dictionaries") {
            for (name, value) in entries {
                match value.as_str() {
                    Some(path) => {
                        config.dictionaries.insert(name.clone(), String::from(path));
                    }
                    None => warn!("dictionary {}: expected a file name string", name),
                }
            }
        }

        for (name, rules) in section::<ScoringRules>(root, "ScoringRules") {
            config.scoring_rules.insert(name, rules);
        }

        for (name, spec) in section::<DistributionSpec>(root, "LetterDistributions") {
            let distribution = match spec.generation_method.as_str() {
                "Dice" => LetterDistribution::Dice {
                    dice: parse_dice(&spec.dice_letters),
                    shuffle_dice: spec.shuffle_dice,
                },
                "LetterPropensity" => LetterDistribution::Propensity {
                    tiles: parse_tiles(&spec.propensity_letters),
                    sample_without_replacement: spec.sample_without_replacement,
                },
                "WordList" => LetterDistribution::WordList {
                    path: spec.word_list_file,
                    shuffle_letters: spec.shuffle_letters,
                },
                other => {
                    warn!(
                        "letter distribution {}: unknown generation method \"{}\"",
                        name, other
                    );
                    continue;
                }
            };
            config.distributions.insert(name, distribution);
        }

        for (name, rules) in section::<GameRules>(root, "GameRules") {
            config.game_rules.insert(name, rules);
        }

        for (name, preferences) in section::<Preferences>(root, "Preferences") {
            config.preferences.insert(name, preferences);
        }

        config
    }
}

/// Deserialize the entries of one config section, reporting and skipping
/// any entry that does not parse.
fn section<T: DeserializeOwned>(root: &Value, name: &'static str) -> Vec<(String, T)> {
    let mut entries = Vec::new();
    if let Some(Value::Object(map)) = root.get(name) {
        for (key, value) in map {
            match serde_json::from_value(value.clone()) {
                Ok(entry) => entries.push((key.clone(), entry)),
                Err(err) => warn!("config section {} entry {}: {}", name, key, err),
            }
        }
    }
    entries
}

/// The resolved bundle of everything a game needs: grid, dictionary
/// path, scoring rules, letter distribution and preferences.
#[derive(Debug, Clone)]
pub struct GameRuleSet {
    pub name: String,
    pub grid: Grid,
    pub dictionary: String,
    pub scoring: ScoringRules,
    pub letters: LetterDistribution,
    pub preferences: Preferences,
}

impl GameRuleSet {
    /// Look up `game` in the config and resolve the entries it names.
    /// Preferences from the `Default` entry fill in any keys the game's
    /// own preferences leave unset.
    ///
    /// ## Errors
    /// [`Error::UnknownGame`] if `game` is not configured,
    /// [`Error::MissingEntry`] if it names a nonexistent entry.
    pub fn resolve(config: &GameConfig, game: &str) -> Result<GameRuleSet, Error> {
        let rules = config
            .game_rules
            .get(game)
            .ok_or_else(|| Error::UnknownGame(String::from(game)))?;

        let grid = config
            .grids
            .get(&rules.grid_design)
            .cloned()
            .ok_or_else(|| missing("Grids", &rules.grid_design))?;
        let dictionary = config
            .dictionaries
            .get(&rules.dictionary)
            .cloned()
            .ok_or_else(|| missing("Dictionaries", &rules.dictionary))?;
        let scoring = config
            .scoring_rules
            .get(&rules.scoring_rules)
            .cloned()
            .ok_or_else(|| missing("ScoringRules", &rules.scoring_rules))?;
        let letters = config
            .distributions
            .get(&rules.letter_distribution)
            .cloned()
            .ok_or_else(|| missing("LetterDistributions", &rules.letter_distribution))?;

        let mut preferences = config
            .preferences
            .get(&rules.preferences)
            .cloned()
            .unwrap_or_default();
        if let Some(defaults) = config.preferences.get("Default") {
            preferences.merge_defaults(defaults);
        }

        Ok(GameRuleSet {
            name: String::from(game),
            grid,
            dictionary,
            scoring,
            letters,
            preferences,
        })
    }
}

fn missing(section: &'static str, name: &str) -> Error {
    Error::MissingEntry {
        section,
        name: String::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "Grids": {
            "Square": {
                "Tiles": [[1, 1], [1, 2], [2, 1], [2, 2], [11, 3]],
                "Adjacency": "Diagonal"
            }
        },
        "Dictionaries": {
            "Standard": "words.txt"
        },
        "ScoringRules": {
            "Simple": {"MinWordLength": 3, "LetterValues": {"A": 1}},
            "Broken": {"QuLength": "not a number"}
        },
        "LetterDistributions": {
            "Pool": {
                "GenerationMethod": "LetterPropensity",
                "PropensityLetters": "AB?",
                "SampleWithoutReplacement": false
            },
            "Cubes": {
                "GenerationMethod": "Dice",
                "DiceLetters": "AB,CD"
            }
        },
        "GameRules": {
            "Demo": {
                "GridDesign": "Square",
                "ScoringRules": "Simple",
                "LetterDistribution": "Pool",
                "Dictionary": "Standard",
                "Preferences": "Demo"
            }
        },
        "Preferences": {
            "Default": {"SolutionFormat": "%w", "AnalysisFormat": "%B"},
            "Demo": {"SolutionFormat": "%w %s"}
        }
    }"#;

    fn config() -> GameConfig {
        GameConfig::from_value(&serde_json::from_str(CONFIG).unwrap())
    }

    #[test]
    fn test_sections() {
        let config = config();
        let grid = &config.grids["Square"];
        assert_eq!(grid.tiles_set(), 4);
        assert_eq!(grid.adjacency(), Adjacency::Diagonal);
        assert_eq!(config.dictionaries["Standard"], "words.txt");
        assert_eq!(config.scoring_rules["Simple"].min_word_length, 3);
        assert!(matches!(
            config.distributions["Cubes"],
            LetterDistribution::Dice { .. }
        ));
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let config = config();
        assert!(config.scoring_rules.contains_key("Simple"));
        assert!(!config.scoring_rules.contains_key("Broken"));
    }

    #[test]
    fn test_resolve_merges_default_preferences() {
        let config = config();
        let ruleset = GameRuleSet::resolve(&config, "Demo").unwrap();
        assert_eq!(ruleset.dictionary, "words.txt");
        assert_eq!(ruleset.preferences.preference("SolutionFormat"), Some("%w %s"));
        assert_eq!(ruleset.preferences.preference("AnalysisFormat"), Some("%B"));
        assert!(matches!(
            ruleset.letters,
            LetterDistribution::Propensity {
                sample_without_replacement: false,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_unknown_game() {
        assert!(matches!(
            GameRuleSet::resolve(&config(), "Nope"),
            Err(Error::UnknownGame(_))
        ));
    }
}
