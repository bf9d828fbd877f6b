use crate::{MisspelledWord, Position};

/// Which rule picked the word in [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    Containing,
    Left,
    Right,
    Fallback,
}

/// The misspelling nearest to `cursor`, or `None` for an empty list.
///
/// A word touching the cursor (boundaries inclusive) wins, then the nearest
/// word ending at or before it, then the nearest word starting after it.
/// Ties go to the earliest word in scan order.
pub fn closest_word(words: &[MisspelledWord], cursor: Position) -> Option<&MisspelledWord> {
    resolve(words, cursor).map(|(_, word)| word)
}

pub(crate) fn resolve(
    words: &[MisspelledWord],
    cursor: Position,
) -> Option<(Resolution, &MisspelledWord)> {
    let col = cursor.column;

    if let Some(word) = words
        .iter()
        .find(|w| w.from.column <= col && col <= w.to.column)
    {
        return Some((Resolution::Containing, word));
    }

    if let Some(word) = words
        .iter()
        .filter(|w| w.to.column <= col)
        .min_by_key(|w| col - w.to.column)
    {
        return Some((Resolution::Left, word));
    }

    if let Some(word) = words
        .iter()
        .filter(|w| w.from.column > col)
        .min_by_key(|w| w.from.column - col)
    {
        return Some((Resolution::Right, word));
    }

    words.first().map(|word| (Resolution::Fallback, word))
}
