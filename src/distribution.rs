/// The letter source for board generation and validation.
///
/// Dice games roll one die per board position; propensity games sample
/// tiles from a pool (with or without replacement); word list games draw
/// whole boards from a file of candidates.
#[derive(Debug, Clone)]
pub enum LetterDistribution {
    Dice {
        /// One entry per die, each a list of face strings.
        dice: Vec<Vec<String>>,
        shuffle_dice: bool,
    },
    Propensity {
        /// The tile pool.
        tiles: Vec<String>,
        sample_without_replacement: bool,
    },
    WordList {
        /// Path to a file of candidate board words.
        path: String,
        shuffle_letters: bool,
    },
}

/// Split a tile specification string into tiles.
///
/// Tiles share the board letter grammar: an uppercase letter, `?` or `.`
/// starts a tile, lowercase letters extend the previous tile, and `:`/`;`
/// multiplier marks are carried into the tile they precede. Anything else
/// is skipped.
pub fn parse_tiles(letters: &str) -> Vec<String> {
    let mut tiles: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in letters.chars() {
        match ch {
            ':' | ';' => current.push(ch),
            'A'..='Z' | '?' | '.' => {
                current.push(ch);
                tiles.push(current.clone());
                current.clear();
            }
            'a'..='z' => {
                if let Some(tile) = tiles.last_mut() {
                    tile.push(ch);
                }
            }
            _ => {}
        }
    }

    tiles
}

/// Split a dice specification string into dice. Faces follow the tile
/// grammar; a `,` closes the current die.
pub fn parse_dice(letters: &str) -> Vec<Vec<String>> {
    let mut dice: Vec<Vec<String>> = Vec::new();
    let mut sides: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in letters.chars() {
        match ch {
            ':' | ';' => current.push(ch),
            'A'..='Z' | '?' | '.' => {
                current.push(ch);
                sides.push(current.clone());
                current.clear();
            }
            'a'..='z' => {
                if let Some(side) = sides.last_mut() {
                    side.push(ch);
                }
            }
            ',' => {
                if !sides.is_empty() {
                    dice.push(std::mem::take(&mut sides));
                    current.clear();
                }
            }
            _ => {}
        }
    }
    if !sides.is_empty() {
        dice.push(sides);
    }

    dice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tiles() {
        assert_eq!(parse_tiles("AB?"), ["A", "B", "?"]);
        assert_eq!(parse_tiles("Qu?h."), ["Qu", "?h", "."]);
        assert_eq!(parse_tiles(":A;;B"), [":A", ";;B"]);
        assert_eq!(parse_tiles("x A"), ["A"]);
        assert!(parse_tiles("").is_empty());
    }

    #[test]
    fn test_parse_dice() {
        assert_eq!(parse_dice("AB,CD"), [["A", "B"], ["C", "D"]]);
        let dice = parse_dice("?Hi,E");
        assert_eq!(dice[0], ["?", "Hi"]);
        assert_eq!(dice[1], ["E"]);
    }

    #[test]
    fn test_parse_dice_trailing_and_empty_groups() {
        assert_eq!(parse_dice("AB,,CD,"), [["A", "B"], ["C", "D"]]);
        assert!(parse_dice(",").is_empty());
    }
}
