//! The suggestion menu: what it lists, how keys act on it, and the surface
//! that presents it.

use crate::checker::suggestions::{slot_for_digit, slot_label};
use crate::editor::ScreenPoint;
use crate::{MisspelledWord, Position};

/// Where the menu goes when the host cannot place it next to the text.
pub const FALLBACK_POINT: ScreenPoint = ScreenPoint { x: 100.0, y: 100.0 };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Suggestion { label: Option<u8>, text: String },
    Separator,
    AddToDictionary { word: String },
}

impl MenuItem {
    pub fn title(&self) -> String {
        match self {
            MenuItem::Suggestion {
                label: Some(n),
                text,
            } => format!("{} {}", n, text),
            MenuItem::Suggestion { label: None, text } => text.clone(),
            MenuItem::Separator => String::new(),
            MenuItem::AddToDictionary { word } => format!("Add \"{}\" to dictionary", word),
        }
    }
}

/// A click on a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Suggestion(usize),
    AddToDictionary,
}

/// Keys the host forwards while a menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Digit(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
    Tab,
    Char(char),
    Other,
}

impl MenuKey {
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            MenuKey::ArrowUp
                | MenuKey::ArrowDown
                | MenuKey::ArrowLeft
                | MenuKey::ArrowRight
                | MenuKey::Enter
                | MenuKey::Escape
                | MenuKey::Tab
        )
    }
}

impl From<char> for MenuKey {
    fn from(c: char) -> Self {
        match c.to_digit(10) {
            Some(d) => MenuKey::Digit(d as u8),
            None => MenuKey::Char(c),
        }
    }
}

/// What a key press does to an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    /// Apply the suggestion at this index and close.
    Select(usize),
    /// A number key naming an empty slot: swallowed, menu stays.
    Swallow,
    /// Navigation handled by the surface itself.
    PassThrough,
    Dismiss,
}

/// Suggestions for one misspelled word, ready to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionMenu {
    pub word: MisspelledWord,
    pub suggestions: Vec<String>,
    pub number_keys: bool,
}

impl SuggestionMenu {
    pub fn new(word: MisspelledWord, suggestions: Vec<String>, number_keys: bool) -> Self {
        Self {
            word,
            suggestions,
            number_keys,
        }
    }

    /// Suggestions, a separator, then the add-to-dictionary entry.
    pub fn items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, text)| MenuItem::Suggestion {
                label: if self.number_keys { slot_label(i) } else { None },
                text: text.clone(),
            })
            .collect();
        items.push(MenuItem::Separator);
        items.push(MenuItem::AddToDictionary {
            word: self.word.word.clone(),
        });
        items
    }

    /// Middle of the word; the menu is anchored below it.
    pub fn anchor(&self) -> Position {
        Position::new(
            self.word.from.line,
            self.word.from.column + self.word.char_len() / 2,
        )
    }

    pub fn key_effect(&self, key: MenuKey) -> KeyEffect {
        match key {
            MenuKey::Digit(d) if self.number_keys => match slot_for_digit(d) {
                Some(index) if index < self.suggestions.len() => KeyEffect::Select(index),
                _ => KeyEffect::Swallow,
            },
            key if key.is_navigation() => KeyEffect::PassThrough,
            _ => KeyEffect::Dismiss,
        }
    }
}

/// Hides a shown menu. Dropping the owning checker state calls this exactly once.
pub trait MenuHandle {
    fn hide(&mut self);
}

/// Presents menus for the host.
pub trait MenuSurface {
    fn show(&mut self, menu: &SuggestionMenu, at: ScreenPoint) -> Box<dyn MenuHandle>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Log of everything a surface was asked to do.
    #[derive(Debug, Default)]
    pub struct SurfaceLog {
        pub shown: Vec<(SuggestionMenu, ScreenPoint)>,
        pub hidden: usize,
    }

    #[derive(Debug, Default, Clone)]
    pub struct RecordingSurface {
        pub log: Rc<RefCell<SurfaceLog>>,
    }

    struct RecordingHandle {
        log: Rc<RefCell<SurfaceLog>>,
    }

    impl MenuHandle for RecordingHandle {
        fn hide(&mut self) {
            self.log.borrow_mut().hidden += 1;
        }
    }

    impl MenuSurface for RecordingSurface {
        fn show(&mut self, menu: &SuggestionMenu, at: ScreenPoint) -> Box<dyn MenuHandle> {
            self.log.borrow_mut().shown.push((menu.clone(), at));
            Box::new(RecordingHandle {
                log: Rc::clone(&self.log),
            })
        }
    }

    impl RecordingSurface {
        pub fn shown_words(&self) -> Vec<String> {
            self.log
                .borrow()
                .shown
                .iter()
                .map(|(menu, _)| menu.word.word.clone())
                .collect()
        }

        pub fn hidden(&self) -> usize {
            self.log.borrow().hidden
        }

        pub fn last_point(&self) -> Option<ScreenPoint> {
            self.log.borrow().shown.last().map(|(_, at)| *at)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(count: usize, number_keys: bool) -> SuggestionMenu {
        let suggestions = (0..count).map(|i| format!("s{}", i)).collect();
        SuggestionMenu::new(MisspelledWord::new("wrold", 0, 6, 11), suggestions, number_keys)
    }

    #[test]
    fn test_items_end_with_add_entry() {
        let items = menu(2, true).items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].title(), "1 s0");
        assert_eq!(items[2], MenuItem::Separator);
        assert_eq!(items[3].title(), "Add \"wrold\" to dictionary");
    }

    #[test]
    fn test_tenth_item_is_labelled_zero() {
        let items = menu(10, true).items();
        assert_eq!(items[9].title(), "0 s9");
        assert_eq!(menu(10, false).items()[9].title(), "s9");
    }

    #[test]
    fn test_anchor_is_word_middle() {
        assert_eq!(menu(1, true).anchor(), Position::new(0, 8));
    }

    #[test]
    fn test_digit_keys() {
        let m = menu(3, true);
        assert_eq!(m.key_effect(MenuKey::Digit(1)), KeyEffect::Select(0));
        assert_eq!(m.key_effect(MenuKey::Digit(3)), KeyEffect::Select(2));
        assert_eq!(m.key_effect(MenuKey::Digit(4)), KeyEffect::Swallow);
        assert_eq!(m.key_effect(MenuKey::Digit(0)), KeyEffect::Swallow);
        assert_eq!(menu(10, true).key_effect(MenuKey::Digit(0)), KeyEffect::Select(9));
    }

    #[test]
    fn test_digits_dismiss_when_number_keys_disabled() {
        assert_eq!(menu(3, false).key_effect(MenuKey::Digit(1)), KeyEffect::Dismiss);
    }

    #[test]
    fn test_navigation_passes_other_keys_dismiss() {
        let m = menu(3, true);
        for key in [
            MenuKey::ArrowUp,
            MenuKey::ArrowDown,
            MenuKey::ArrowLeft,
            MenuKey::ArrowRight,
            MenuKey::Enter,
            MenuKey::Escape,
            MenuKey::Tab,
        ] {
            assert_eq!(m.key_effect(key), KeyEffect::PassThrough);
        }
        assert_eq!(m.key_effect(MenuKey::Char('x')), KeyEffect::Dismiss);
        assert_eq!(m.key_effect(MenuKey::Other), KeyEffect::Dismiss);
    }

    #[test]
    fn test_char_keys_convert() {
        assert_eq!(MenuKey::from('7'), MenuKey::Digit(7));
        assert_eq!(MenuKey::from('q'), MenuKey::Char('q'));
    }
}
