use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::*;
use spellpick::checker::dictionary::load_oracle;
use spellpick::cli::output::{self, OutputFormat, TerminalMenu};
use spellpick::dict::{self, CustomWordList};
use spellpick::{logging, Config, Document, Editor, Outcome, Position, SpellChecker};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spellpick")]
#[command(version, about = "Cursor-aware spelling correction for text files", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Dictionary code to use (e.g., en, en-GB, fr)
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Directory holding `<code>/index.aff` and `<code>/index.dic`
    #[arg(long, global = true, value_name = "DIR")]
    dictionary_dir: Option<PathBuf>,

    /// Custom dictionary file (one word per line)
    #[arg(long, global = true, value_name = "FILE")]
    custom_dictionary: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct LineArgs {
    /// File to check
    file: PathBuf,

    /// Line number (1-based)
    #[arg(long, default_value_t = 1)]
    line: usize,
}

#[derive(Args, Debug)]
struct CursorArgs {
    #[command(flatten)]
    target: LineArgs,

    /// Cursor column (1-based)
    #[arg(long, default_value_t = 1)]
    column: usize,

    /// Write the corrected text back to the file
    #[arg(short, long)]
    write: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List misspellings on a line with their suggestions
    Scan {
        #[command(flatten)]
        target: LineArgs,

        /// Exit with code 0 even if errors are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Replace the misspelling closest to the cursor with its top suggestion
    Accept(CursorArgs),
    /// Replace every misspelling on the cursor's line with its top suggestion
    AcceptAll(CursorArgs),
    /// Pick a suggestion for the misspelling closest to the cursor
    Menu {
        #[command(flatten)]
        cursor: CursorArgs,

        /// Skip ahead to the n-th following misspelling on the line
        #[arg(long, default_value_t = 0)]
        next: usize,
    },
    /// Add words to the custom dictionary
    AddWord {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// List every dictionary that can be downloaded
    Available,
    /// Download a dictionary
    Download {
        /// Dictionary code (e.g., en, en-GB, fr)
        code: String,
    },
    /// Delete an installed dictionary
    Delete {
        /// Dictionary code
        code: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellpick", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::load(
        cli.language.clone(),
        cli.dictionary_dir.clone(),
        cli.custom_dictionary.clone(),
    )?;
    let colored_output = !cli.no_color;

    match command {
        Commands::Scan { target, no_fail } => {
            let found = scan(&config, &target, colored_output, cli.format)?;
            if found > 0 && !no_fail {
                std::process::exit(1);
            }
        }
        Commands::Accept(args) => {
            run_action(&config, &args, colored_output, cli.format, |checker, doc| {
                Ok(checker.accept_top_suggestion(doc))
            })?;
        }
        Commands::AcceptAll(args) => {
            run_action(&config, &args, colored_output, cli.format, |checker, doc| {
                Ok(checker.accept_all_top_suggestions(doc))
            })?;
        }
        Commands::Menu { cursor, next } => {
            run_action(&config, &cursor, colored_output, cli.format, |checker, doc| {
                pick_from_menu(checker, doc, next, colored_output)
            })?;
        }
        Commands::AddWord { words } => add_words(&config, &words, colored_output)?,
        Commands::Dict { action } => handle_dict(&config, action)?,
    }

    Ok(())
}

fn build_checker(config: &Config) -> Result<SpellChecker> {
    let custom = match &config.custom_dictionary {
        Some(path) => CustomWordList::load(path)?,
        None => CustomWordList::default(),
    };
    let dictionary_dir = config.resolved_dictionary_dir();
    let oracle = load_oracle(dictionary_dir.as_deref(), &config.language, &custom);
    Ok(SpellChecker::new(oracle, config.checker_settings(), custom))
}

fn open_document(path: &Path, cursor: Position) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let doc = Document::new(&text);
    if cursor.line >= doc.line_count() {
        anyhow::bail!(
            "Line {} is past the end of {} ({} lines)",
            cursor.line + 1,
            path.display(),
            doc.line_count()
        );
    }
    Ok(doc.with_cursor(cursor))
}

fn scan(
    config: &Config,
    target: &LineArgs,
    colored_output: bool,
    format: OutputFormat,
) -> Result<usize> {
    let mut checker = build_checker(config)?;
    let doc = open_document(&target.file, Position::new(target.line.saturating_sub(1), 0))?;
    if !checker.oracle().is_ready() {
        anyhow::bail!(
            "No usable dictionary for '{}'. Run `spellpick dict download {}` first.",
            config.language,
            config.language
        );
    }

    let found: Vec<_> = checker
        .misspellings_at_cursor(&doc)
        .into_iter()
        .map(|word| {
            let suggestions = checker.suggestions_for(&word.word);
            (word, suggestions)
        })
        .collect();

    let line_text = doc.line_text(doc.cursor().line);
    output::print_misspellings(&target.file, &line_text, &found, colored_output, format)?;
    Ok(found.len())
}

fn run_action<F>(
    config: &Config,
    args: &CursorArgs,
    colored_output: bool,
    format: OutputFormat,
    action: F,
) -> Result<()>
where
    F: FnOnce(&mut SpellChecker, &mut Document) -> Result<Outcome>,
{
    let mut checker = build_checker(config)?;
    let cursor = Position::new(
        args.target.line.saturating_sub(1),
        args.column.saturating_sub(1),
    );
    let mut doc = open_document(&args.target.file, cursor)?;
    let before = doc.text();

    let outcome = action(&mut checker, &mut doc)?;
    checker.dispose();

    let after = doc.text();
    if args.write && after != before {
        fs::write(&args.target.file, &after)
            .with_context(|| format!("Failed to write file: {}", args.target.file.display()))?;
    }

    let cursor = doc.cursor();
    output::print_outcome(
        &args.target.file,
        &outcome,
        &doc.line_text(cursor.line),
        cursor,
        colored_output,
        format,
    )
}

fn pick_from_menu(
    checker: &mut SpellChecker,
    doc: &mut Document,
    next: usize,
    colored_output: bool,
) -> Result<Outcome> {
    let mut surface = TerminalMenu;
    let mut outcome = checker.open_spelling_menu(doc, &mut surface);
    for _ in 0..next {
        if !matches!(outcome, Outcome::MenuOpened { .. } | Outcome::NoSuggestions { .. }) {
            break;
        }
        outcome = checker.open_spelling_menu(doc, &mut surface);
    }

    let Some(menu) = checker.open_menu() else {
        return Ok(outcome);
    };

    match output::prompt_menu_choice(menu, colored_output)? {
        Some(action) => Ok(checker.select_menu_item(doc, action)),
        None => {
            checker.dismiss_menu();
            Ok(Outcome::MenuDismissed)
        }
    }
}

fn add_words(config: &Config, words: &[String], colored_output: bool) -> Result<()> {
    let path = config
        .custom_dictionary
        .as_deref()
        .context("No custom dictionary path configured")?;
    let mut custom = CustomWordList::load(path)?;

    for word in words {
        let added = custom.insert(word)?;
        match (added, colored_output) {
            (true, true) => println!("{} Added \"{}\"", "✓".green().bold(), word.cyan()),
            (true, false) => println!("✓ Added \"{}\"", word),
            (false, true) => println!("{} \"{}\" is already present", "•".yellow(), word),
            (false, false) => println!("• \"{}\" is already present", word),
        }
    }
    Ok(())
}

fn handle_dict(config: &Config, action: DictCommands) -> Result<()> {
    let dir = config
        .resolved_dictionary_dir()
        .context("Could not determine the dictionary directory; pass --dictionary-dir")?;

    match action {
        DictCommands::List => dict::manager::list_dictionaries(&dir)?,
        DictCommands::Available => dict::manager::list_available(&dir),
        DictCommands::Download { code } => dict::manager::download_dictionary(&dir, &code)?,
        DictCommands::Delete { code } => dict::manager::delete_dictionary(&dir, &code)?,
    }
    Ok(())
}
