use crate::checker::oracle::Oracle;

/// Hard cap on suggestions offered for one word: one per number key.
pub const MAX_SUGGESTIONS: usize = 10;

/// The oracle's suggestions for `word`, best first, capped at `limit` (and never above ten).
pub fn top_suggestions(oracle: &dyn Oracle, word: &str, limit: usize) -> Vec<String> {
    let mut suggestions = oracle.suggest(word);
    suggestions.truncate(limit.min(MAX_SUGGESTIONS));
    suggestions
}

/// Number key shown for the suggestion at `index`: 1-9, then 0 for the tenth.
pub fn slot_label(index: usize) -> Option<u8> {
    match index {
        0..=8 => Some(index as u8 + 1),
        9 => Some(0),
        _ => None,
    }
}

/// Suggestion index selected by pressing `digit`.
pub fn slot_for_digit(digit: u8) -> Option<usize> {
    match digit {
        0 => Some(9),
        1..=9 => Some(digit as usize - 1),
        _ => None,
    }
}
