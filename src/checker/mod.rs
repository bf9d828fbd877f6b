pub mod dictionary;
pub mod edit;
pub mod oracle;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod suggestions;

use crate::dict::CustomWordList;
use crate::editor::{Editor, EditorError};
use crate::menu::{
    KeyEffect, MenuAction, MenuHandle, MenuKey, MenuSurface, SuggestionMenu, FALLBACK_POINT,
};
use crate::{MisspelledWord, Position};
use edit::{apply_batch, apply_replacement, BatchReport};
use oracle::OracleHandle;
use resolver::closest_word;
use scanner::scan_line;
use serde::Serialize;
use session::{Clock, CorrectionSession, SystemClock, DEFAULT_IDLE_TIMEOUT};
use std::time::Duration;
use suggestions::{top_suggestions, MAX_SUGGESTIONS};
use tracing::{debug, warn};

/// Behaviour switches handed to the checker by whoever owns the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerSettings {
    pub number_key_selection: bool,
    pub idle_timeout: Duration,
    pub max_suggestions: usize,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            number_key_selection: true,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

/// Result of a user action. None of these are failures of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    OracleUnavailable,
    NoMisspellings,
    NoSuggestions {
        word: MisspelledWord,
    },
    Applied {
        word: MisspelledWord,
        replacement: String,
        cursor: Position,
    },
    BatchApplied(BatchReport),
    EditFailed {
        word: MisspelledWord,
        reason: String,
    },
    MenuOpened {
        word: MisspelledWord,
        index: usize,
        total: usize,
    },
    AddedToDictionary {
        word: String,
        persisted: bool,
    },
    /// The key was for the menu but changed nothing.
    KeyConsumed,
    MenuDismissed,
    NoMenu,
}

/// A shown menu together with the handle that hides it. Dropping it hides the menu.
struct OpenMenu {
    menu: SuggestionMenu,
    handle: Box<dyn MenuHandle>,
}

impl Drop for OpenMenu {
    fn drop(&mut self) {
        self.handle.hide();
    }
}

/// Cursor-aware spell correction for one editor instance.
pub struct SpellChecker {
    oracle: OracleHandle,
    settings: CheckerSettings,
    custom_words: CustomWordList,
    session: CorrectionSession,
    clock: Box<dyn Clock>,
    open_menu: Option<OpenMenu>,
    reported_unavailable: bool,
}

impl SpellChecker {
    pub fn new(oracle: OracleHandle, settings: CheckerSettings, custom_words: CustomWordList) -> Self {
        let session = CorrectionSession::new(settings.idle_timeout);
        Self {
            oracle,
            settings,
            custom_words,
            session,
            clock: Box::new(SystemClock),
            open_menu: None,
            reported_unavailable: false,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn settings(&self) -> &CheckerSettings {
        &self.settings
    }

    pub fn session(&self) -> &CorrectionSession {
        &self.session
    }

    pub fn oracle(&self) -> &OracleHandle {
        &self.oracle
    }

    pub fn custom_words(&self) -> &CustomWordList {
        &self.custom_words
    }

    pub fn open_menu(&self) -> Option<&SuggestionMenu> {
        self.open_menu.as_ref().map(|open| &open.menu)
    }

    /// Misspellings on the cursor's line, without touching the cycling state.
    pub fn misspellings_at_cursor(&mut self, editor: &dyn Editor) -> Vec<MisspelledWord> {
        if !self.oracle_ready() {
            return Vec::new();
        }
        let cursor = editor.cursor();
        scan_line(&self.oracle, &editor.line_text(cursor.line), cursor.line)
    }

    /// Suggestions for `word`, capped by the configured limit.
    pub fn suggestions_for(&self, word: &str) -> Vec<String> {
        self.oracle
            .get()
            .map(|oracle| top_suggestions(oracle, word, self.settings.max_suggestions))
            .unwrap_or_default()
    }

    /// Replace the misspelling closest to the cursor with its top suggestion.
    pub fn accept_top_suggestion(&mut self, editor: &mut dyn Editor) -> Outcome {
        let words = self.misspellings_at_cursor(editor);
        if !self.oracle.is_ready() {
            return Outcome::OracleUnavailable;
        }

        let Some(target) = closest_word(&words, editor.cursor()) else {
            return Outcome::NoMisspellings;
        };

        let Some(top) = self.suggestions_for(&target.word).into_iter().next() else {
            return Outcome::NoSuggestions {
                word: target.clone(),
            };
        };

        self.replace(editor, target, top)
    }

    /// Replace every misspelling on the cursor's line with its top suggestion.
    pub fn accept_all_top_suggestions(&mut self, editor: &mut dyn Editor) -> Outcome {
        let words = self.misspellings_at_cursor(editor);
        if !self.oracle.is_ready() {
            return Outcome::OracleUnavailable;
        }
        if words.is_empty() {
            return Outcome::NoMisspellings;
        }

        let Some(oracle) = self.oracle.get() else {
            return Outcome::OracleUnavailable;
        };
        let report = apply_batch(editor, &words, |word| {
            top_suggestions(oracle, &word.word, 1).into_iter().next()
        });
        debug!(
            "Batch correction: {} applied, {} without suggestions, {} failed",
            report.applied.len(),
            report.skipped.len(),
            report.failed.len()
        );
        if !report.applied.is_empty() {
            self.session.reset();
        }
        Outcome::BatchApplied(report)
    }

    /// Show suggestions for the misspelling nearest the cursor, or for the next
    /// one on the line when called again before the idle timeout.
    pub fn open_spelling_menu(
        &mut self,
        editor: &mut dyn Editor,
        surface: &mut dyn MenuSurface,
    ) -> Outcome {
        if !self.oracle_ready() {
            return Outcome::OracleUnavailable;
        }

        let cursor = editor.cursor();
        let now = self.clock.now();
        let oracle = &self.oracle;
        let target = self
            .session
            .advance(cursor, now, || {
                scan_line(oracle, &editor.line_text(cursor.line), cursor.line)
            })
            .cloned();

        let Some(target) = target else {
            return Outcome::NoMisspellings;
        };
        let index = self.session.active_index().unwrap_or_default();
        let total = self.session.misspellings().len();

        self.dismiss_menu();

        let suggestions = self.suggestions_for(&target.word);
        if suggestions.is_empty() {
            return Outcome::NoSuggestions { word: target };
        }

        let menu = SuggestionMenu::new(
            target.clone(),
            suggestions,
            self.settings.number_key_selection,
        );
        let at = editor
            .screen_coordinate(menu.anchor())
            .or_else(|| editor.screen_coordinate(cursor))
            .unwrap_or(FALLBACK_POINT);
        let handle = surface.show(&menu, at);
        self.open_menu = Some(OpenMenu { menu, handle });

        Outcome::MenuOpened {
            word: target,
            index,
            total,
        }
    }

    /// Route a key press to the open menu. Keys are not intercepted when no menu is open.
    pub fn handle_menu_key(&mut self, editor: &mut dyn Editor, key: MenuKey) -> Outcome {
        let Some(open) = &self.open_menu else {
            return Outcome::NoMenu;
        };

        match open.menu.key_effect(key) {
            KeyEffect::Select(index) => self.select_menu_item(editor, MenuAction::Suggestion(index)),
            KeyEffect::Swallow | KeyEffect::PassThrough => Outcome::KeyConsumed,
            KeyEffect::Dismiss => {
                self.dismiss_menu();
                Outcome::MenuDismissed
            }
        }
    }

    /// Act on a menu entry and close the menu.
    pub fn select_menu_item(&mut self, editor: &mut dyn Editor, action: MenuAction) -> Outcome {
        let Some(open) = self.open_menu.take() else {
            return Outcome::NoMenu;
        };
        let word = open.menu.word.clone();

        match action {
            MenuAction::Suggestion(index) => match open.menu.suggestions.get(index).cloned() {
                Some(replacement) => self.replace(editor, &word, replacement),
                None => Outcome::MenuDismissed,
            },
            MenuAction::AddToDictionary => self.add_to_dictionary(editor, &word.word),
        }
    }

    /// Accept `word` for this session and record it in the custom word list.
    pub fn add_to_dictionary(&mut self, editor: &mut dyn Editor, word: &str) -> Outcome {
        if let Some(oracle) = self.oracle.get_mut() {
            oracle.add(word);
        }

        let persisted = match self.custom_words.insert(word) {
            Ok(added) => {
                editor.notify(&format!("Added \"{}\" to dictionary", word));
                added
            }
            Err(e) => {
                warn!("{}", e);
                editor.notify(&format!(
                    "Added \"{}\" for this session only; saving it failed",
                    word
                ));
                false
            }
        };

        Outcome::AddedToDictionary {
            word: word.to_string(),
            persisted,
        }
    }

    pub fn dismiss_menu(&mut self) {
        self.open_menu = None;
    }

    /// The document changed: forget the cycle.
    pub fn on_content_change(&mut self) {
        self.session.reset();
    }

    /// Let the idle timer fire. Hosts call this from their event loop.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.session.tick(now)
    }

    /// Tear down: cancel the idle timer and hide any open menu.
    pub fn dispose(&mut self) {
        self.session.reset();
        self.dismiss_menu();
    }

    fn replace(&mut self, editor: &mut dyn Editor, word: &MisspelledWord, replacement: String) -> Outcome {
        match apply_replacement(editor, word, &replacement) {
            Ok(cursor) => {
                // Spans of the cycle were computed on the old text.
                self.session.reset();
                Outcome::Applied {
                    word: word.clone(),
                    replacement,
                    cursor,
                }
            }
            Err(e) => self.edit_failed(word, e),
        }
    }

    fn edit_failed(&self, word: &MisspelledWord, e: EditorError) -> Outcome {
        warn!("Failed to replace '{}': {}", word.word, e);
        Outcome::EditFailed {
            word: word.clone(),
            reason: e.to_string(),
        }
    }

    /// Whether the oracle can be used; reports an unavailable oracle once.
    fn oracle_ready(&mut self) -> bool {
        if self.oracle.is_ready() {
            return true;
        }

        let reason = self.oracle.unavailable_reason().unwrap_or("unknown");
        if self.reported_unavailable {
            debug!("Spell checker not initialized: {}", reason);
        } else {
            warn!("Spell checker not initialized: {}", reason);
            self.reported_unavailable = true;
        }
        false
    }
}
