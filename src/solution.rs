/// One scoring path found on a board.
///
/// `word_length` counts letters toward the scoring rules and can differ
/// from both the word string length and the path length when multi-letter
/// tiles or `QU` expansion are in play.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    word: String,
    positions: Vec<u8>,
    word_length: usize,
    score: u32,
    letter_points: u32,
    word_multiplier: u32,
    length_bonus: f64,
}

impl Solution {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        word: String,
        positions: Vec<u8>,
        word_length: usize,
        score: u32,
        letter_points: u32,
        word_multiplier: u32,
        length_bonus: f64,
    ) -> Solution {
        Solution {
            word,
            positions,
            word_length,
            score,
            letter_points,
            word_multiplier,
            length_bonus,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// The board positions used, in path order.
    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Letter points including letter multipliers, before word
    /// multipliers and length bonuses.
    pub fn letter_points(&self) -> u32 {
        self.letter_points
    }

    /// The product of all word multipliers along the path.
    pub fn word_multiplier(&self) -> u32 {
        self.word_multiplier
    }

    pub fn length_bonus(&self) -> f64 {
        self.length_bonus
    }

    /// Render the solution according to a format string.
    ///
    /// Directives: `%w` word, `%s` score, `%l` letter points, `%m` word
    /// multiplier, `%b` length bonus, `%pC` the 1-based positions
    /// separated by the character `C`, `%%` a literal percent.
    /// `%(text)` emits `text` only when `expand_paren` is set, which
    /// callers use to separate consecutive solutions (the text supports
    /// `\t`, `\n`, `\\` and `\)`). The escapes `\t`, `\n` and `\\` apply
    /// everywhere else.
    pub fn format(&self, fmt: &str, expand_paren: bool) -> String {
        let mut result = String::new();
        let mut it = fmt.chars();

        while let Some(ch) = it.next() {
            match ch {
                '%' => {
                    let spec = match it.next() {
                        Some(spec) => spec,
                        None => break,
                    };
                    match spec {
                        'w' => result.push_str(&self.word),
                        's' => result.push_str(&self.score.to_string()),
                        'b' => result.push_str(&self.length_bonus.to_string()),
                        'm' => result.push_str(&self.word_multiplier.to_string()),
                        'l' => result.push_str(&self.letter_points.to_string()),
                        '%' => result.push('%'),
                        'p' => {
                            let separator = match it.next() {
                                Some(separator) => separator,
                                None => return result,
                            };
                            for (i, pos) in self.positions.iter().enumerate() {
                                if i > 0 {
                                    result.push(separator);
                                }
                                // 0-base to 1-base
                                result.push_str(&(pos + 1).to_string());
                            }
                        }
                        '(' => {
                            let mut in_escape = false;
                            for ch in it.by_ref() {
                                let ch = if in_escape {
                                    in_escape = false;
                                    match ch {
                                        't' => '\t',
                                        'n' => '\n',
                                        other => other,
                                    }
                                } else if ch == '\\' {
                                    in_escape = true;
                                    continue;
                                } else if ch == ')' {
                                    break;
                                } else {
                                    ch
                                };
                                if expand_paren {
                                    result.push(ch);
                                }
                            }
                        }
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

/// Sort by word ascending, then score descending, so that deduplicating
/// by word keeps the highest-scoring instance of each word.
pub fn sort_solutions(solutions: &mut [Solution]) {
    solutions.sort_by(|a, b| a.word.cmp(&b.word).then_with(|| b.score.cmp(&a.score)));
}

/// Drop all but the first (highest-scoring) instance of each word.
/// Expects the list to be sorted with [`sort_solutions`].
pub fn dedup_solutions(solutions: &mut Vec<Solution>) {
    solutions.dedup_by(|a, b| a.word == b.word);
}

/// Apply the C-style escapes `\t`, `\n` and `\\` to a prefix or suffix
/// string taken from the command line or preferences.
pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            result.push(match ch {
                't' => '\t',
                'n' => '\n',
                other => other,
            });
            in_escape = false;
        } else if ch == '\\' {
            in_escape = true;
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(word: &str, score: u32) -> Solution {
        Solution::new(String::from(word), vec![2, 0, 1], word.len(), score, 7, 2, 1.5)
    }

    #[test]
    fn test_format_directives() {
        let s = solution("CAT", 20);
        assert_eq!(s.format("%w %s %l %m %b", true), "CAT 20 7 2 1.5");
        assert_eq!(s.format("%p,", true), "3,1,2");
        // the character after %p is the separator
        assert_eq!(s.format("%p %%", true), "3 1 2%");
        assert_eq!(s.format("a\\tb\\nc\\\\d", true), "a\tb\nc\\d");
        assert_eq!(s.format("%q", true), "%q");
    }

    #[test]
    fn test_format_paren() {
        let s = solution("CAT", 20);
        assert_eq!(s.format("%w%(, )", true), "CAT, ");
        assert_eq!(s.format("%w%(, )", false), "CAT");
        assert_eq!(s.format("%(a\\)b\\tc)", true), "a)b\tc");
    }

    #[test]
    fn test_sort_and_dedup() {
        let mut solutions = vec![
            solution("CAT", 5),
            solution("BAT", 9),
            solution("CAT", 8),
            solution("BAT", 2),
        ];
        sort_solutions(&mut solutions);
        let words: Vec<_> = solutions.iter().map(|s| (s.word(), s.score())).collect();
        assert_eq!(
            words,
            &[("BAT", 9), ("BAT", 2), ("CAT", 8), ("CAT", 5)]
        );
        dedup_solutions(&mut solutions);
        let words: Vec<_> = solutions.iter().map(|s| (s.word(), s.score())).collect();
        assert_eq!(words, &[("BAT", 9), ("CAT", 8)]);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a\\tb\\nc\\\\"), "a\tb\nc\\");
        assert_eq!(unescape("plain"), "plain");
    }
}
