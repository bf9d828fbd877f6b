use crate::checker::Outcome;
use crate::editor::ScreenPoint;
use crate::menu::{MenuAction, MenuHandle, MenuItem, MenuSurface, SuggestionMenu};
use crate::{MisspelledWord, Position};
use anyhow::{Context, Result};
use colored::*;
use console::Term;
use dialoguer::theme::{ColorfulTheme, SimpleTheme};
use dialoguer::Select;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonMisspelling<'a> {
    word: &'a str,
    line: usize,
    column: usize,
    suggestions: &'a [String],
}

#[derive(Debug, Serialize)]
struct JsonScan<'a> {
    file: String,
    line: usize,
    total_errors: usize,
    errors: Vec<JsonMisspelling<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonAction<'a> {
    file: String,
    line_text: &'a str,
    line: usize,
    column: usize,
    result: &'a Outcome,
}

/// Print the misspellings of one line. Lines and columns are shown 1-based.
pub fn print_misspellings(
    file_path: &Path,
    line_text: &str,
    found: &[(MisspelledWord, Vec<String>)],
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print_text_misspellings(file_path, line_text, found, colored_output);
            Ok(())
        }
        OutputFormat::Json => {
            let line = found.first().map(|(w, _)| w.from.line + 1).unwrap_or(0);
            let output = JsonScan {
                file: file_path.display().to_string(),
                line,
                total_errors: found.len(),
                errors: found
                    .iter()
                    .map(|(w, suggestions)| JsonMisspelling {
                        word: &w.word,
                        line: w.from.line + 1,
                        column: w.from.column + 1,
                        suggestions,
                    })
                    .collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize output")?
            );
            Ok(())
        }
    }
}

fn print_text_misspellings(
    file_path: &Path,
    line_text: &str,
    found: &[(MisspelledWord, Vec<String>)],
    colored_output: bool,
) {
    if found.is_empty() {
        if colored_output {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
        return;
    }

    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
        println!("  {}", highlight_line(line_text, found));
    } else {
        println!("\n{}", file_name);
        println!("  {}", line_text);
    }

    for (word, suggestions) in found {
        let position = format!("{}:{}", word.from.line + 1, word.from.column + 1);

        if colored_output {
            println!("  {} {}", position.blue().bold(), word.word.red().bold());
            if !suggestions.is_empty() {
                let suggestions = suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), suggestions);
            }
        } else {
            println!("  {} {}", position, word.word);
            if !suggestions.is_empty() {
                println!("    → {}", suggestions.join(", "));
            }
        }
    }
}

/// The line with every misspelled span in red.
fn highlight_line(line_text: &str, found: &[(MisspelledWord, Vec<String>)]) -> String {
    let chars: Vec<char> = line_text.chars().collect();
    let mut out = String::new();
    let mut column = 0;

    for (word, _) in found {
        if word.from.column < column || word.to.column > chars.len() {
            continue;
        }
        out.extend(&chars[column..word.from.column]);
        let span: String = chars[word.from.column..word.to.column].iter().collect();
        out.push_str(&span.red().bold().to_string());
        column = word.to.column;
    }
    out.extend(&chars[column..]);
    out
}

/// Report what an action did to the line the cursor is on.
pub fn print_outcome(
    file_path: &Path,
    outcome: &Outcome,
    line_text: &str,
    cursor: Position,
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        let output = JsonAction {
            file: file_path.display().to_string(),
            line_text,
            line: cursor.line + 1,
            column: cursor.column + 1,
            result: outcome,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize output")?
        );
        return Ok(());
    }

    let message = describe(outcome);
    if colored_output {
        let marker = match outcome {
            Outcome::Applied { .. }
            | Outcome::BatchApplied(_)
            | Outcome::AddedToDictionary { .. } => "✓".green().bold(),
            Outcome::OracleUnavailable | Outcome::EditFailed { .. } => "✗".red().bold(),
            _ => "•".yellow().bold(),
        };
        println!("{} {}", marker, message);
        println!(
            "  {} {}",
            format!("{}:{}", cursor.line + 1, cursor.column + 1).blue(),
            line_text
        );
    } else {
        println!("{}", message);
        println!("  {}:{} {}", cursor.line + 1, cursor.column + 1, line_text);
    }
    Ok(())
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::OracleUnavailable => {
            "Spell checker not initialized (run `spellpick dict download <code>`)".to_string()
        }
        Outcome::NoMisspellings => "No spelling errors on this line".to_string(),
        Outcome::NoSuggestions { word } => format!("No suggestions for \"{}\"", word.word),
        Outcome::Applied {
            word, replacement, ..
        } => format!("Replaced \"{}\" with \"{}\"", word.word, replacement),
        Outcome::BatchApplied(report) => {
            let count = report.applied.len();
            format!(
                "{} {} applied",
                count,
                if count == 1 { "correction" } else { "corrections" }
            )
        }
        Outcome::EditFailed { word, reason } => {
            format!("Could not replace \"{}\": {}", word.word, reason)
        }
        Outcome::MenuOpened { word, index, total } => {
            format!("Suggestions for \"{}\" ({}/{})", word.word, index + 1, total)
        }
        Outcome::AddedToDictionary { word, .. } => format!("Added \"{}\" to dictionary", word),
        Outcome::KeyConsumed | Outcome::NoMenu => "Nothing changed".to_string(),
        Outcome::MenuDismissed => "Menu dismissed".to_string(),
    }
}

/// Menu surface for a terminal: the menu is drawn when the user is prompted.
#[derive(Debug, Default)]
pub struct TerminalMenu;

struct TerminalMenuHandle {
    word: String,
}

impl MenuHandle for TerminalMenuHandle {
    fn hide(&mut self) {
        tracing::debug!("Closed suggestion menu for '{}'", self.word);
    }
}

impl MenuSurface for TerminalMenu {
    fn show(&mut self, menu: &SuggestionMenu, at: ScreenPoint) -> Box<dyn MenuHandle> {
        tracing::debug!(
            "Showing {} suggestions for '{}' at ({}, {})",
            menu.suggestions.len(),
            menu.word.word,
            at.x,
            at.y
        );
        Box::new(TerminalMenuHandle {
            word: menu.word.word.clone(),
        })
    }
}

/// Ask the user to pick an entry of `menu`. `None` means the menu was dismissed.
pub fn prompt_menu_choice(menu: &SuggestionMenu, colored_output: bool) -> Result<Option<MenuAction>> {
    let entries: Vec<(String, MenuAction)> = menu
        .items()
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            MenuItem::Separator => None,
            MenuItem::Suggestion { .. } => Some((item.title(), MenuAction::Suggestion(i))),
            MenuItem::AddToDictionary { .. } => Some((item.title(), MenuAction::AddToDictionary)),
        })
        .collect();
    let labels: Vec<&str> = entries.iter().map(|(label, _)| label.as_str()).collect();
    let prompt = format!("Suggestions for \"{}\"", menu.word.word);

    let choice = if colored_output {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_on_opt(&Term::stderr())
    } else {
        Select::with_theme(&SimpleTheme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_on_opt(&Term::stderr())
    }
    .context("Failed to read menu choice")?;

    Ok(choice.map(|index| entries[index].1))
}
