use crate::checker::oracle::OracleHandle;
use crate::MisspelledWord;
use lazy_static::lazy_static;
use regex::Regex;

/// Tokens shorter than this are never checked.
pub const MIN_WORD_LEN: usize = 2;

lazy_static! {
    // ASCII word boundaries: digits and underscores glue onto a run of letters.
    static ref WORD: Regex = Regex::new(r"(?-u:\b)[a-zA-Z']+(?-u:\b)").unwrap();
}

/// A candidate word and its char-column span on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split a line into candidate words, dropping the ones too short to check.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut byte_pos = 0;
    let mut column = 0;

    for m in WORD.find_iter(line) {
        column += line[byte_pos..m.start()].chars().count();
        byte_pos = m.start();

        // Matches are ASCII, so byte length equals char length.
        let len = m.as_str().len();
        if len >= MIN_WORD_LEN {
            tokens.push(Token {
                text: m.as_str(),
                start: column,
                end: column + len,
            });
        }
    }

    tokens
}

/// Every token on `line_text` the oracle rejects, ascending by start column.
///
/// Returns nothing when the oracle is unavailable; callers check readiness
/// first so that case is never mistaken for a clean line.
pub fn scan_line(oracle: &OracleHandle, line_text: &str, line_number: usize) -> Vec<MisspelledWord> {
    let Some(oracle) = oracle.get() else {
        return Vec::new();
    };

    let mut misspelled: Vec<MisspelledWord> = tokenize(line_text)
        .into_iter()
        .filter(|token| !oracle.correct(token.text))
        .map(|token| MisspelledWord::new(token.text, line_number, token.start, token.end))
        .collect();

    misspelled.sort_by_key(|w| w.from.column);
    misspelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::oracle::fake::FakeOracle;

    fn words(line: &str) -> Vec<(&str, usize, usize)> {
        tokenize(line)
            .into_iter()
            .map(|t| (t.text, t.start, t.end))
            .collect()
    }

    #[test]
    fn test_tokenize_letters_and_apostrophes() {
        assert_eq!(
            words("Don't stop, it's fine"),
            vec![
                ("Don't", 0, 5),
                ("stop", 6, 10),
                ("it's", 12, 16),
                ("fine", 17, 21)
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_short_tokens_and_numbers() {
        assert_eq!(words("I saw 42 a cat"), vec![("saw", 2, 5), ("cat", 11, 14)]);
    }

    #[test]
    fn test_tokenize_ignores_words_glued_to_digits() {
        assert_eq!(words("abc123 foo_bar v2 ok"), vec![("ok", 18, 20)]);
    }

    #[test]
    fn test_tokenize_trims_trailing_apostrophe() {
        assert_eq!(words("'quoted' dogs'"), vec![("quoted", 1, 7), ("dogs", 9, 13)]);
    }

    #[test]
    fn test_tokenize_columns_count_chars() {
        assert_eq!(words("naïve teh"), vec![("na", 0, 2), ("ve", 3, 5), ("teh", 6, 9)]);
    }

    #[test]
    fn test_scan_line_keeps_incorrect_tokens() {
        let oracle = OracleHandle::ready(FakeOracle::new(&["the", "cat"]));
        let found = scan_line(&oracle, "the catt sat", 3);
        assert_eq!(
            found,
            vec![
                MisspelledWord::new("catt", 3, 4, 8),
                MisspelledWord::new("sat", 3, 9, 12)
            ]
        );
    }

    #[test]
    fn test_scan_line_clean_and_empty_lines() {
        let oracle = OracleHandle::ready(FakeOracle::new(&["all", "good", "here"]));
        assert!(scan_line(&oracle, "", 0).is_empty());
        assert!(scan_line(&oracle, "all good here", 0).is_empty());
        assert!(scan_line(&oracle, "all good here", 0).is_empty());
    }

    #[test]
    fn test_scan_line_without_oracle() {
        let oracle = OracleHandle::unavailable("not loaded");
        assert!(scan_line(&oracle, "Helo wrold", 0).is_empty());
    }
}
