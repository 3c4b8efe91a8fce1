//! bookshelf CLI
//!
//! Command-line front end for the personal library catalog. Each invocation
//! opens the store, performs one operation and renders the result.

mod config;
mod error;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bookshelf_core::{Book, Genre, LibraryStore, SearchField};
use clap::{Parser, Subcommand};
use log::warn;

use crate::config::Config;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "bookshelf", version)]
#[command(about = "Manage a personal library catalog", long_about = None)]
struct Cli {
    /// Library database file
    #[arg(long, global = true, env = "BOOKSHELF_DB")]
    db: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, env = "BOOKSHELF_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "BOOKSHELF_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a book to the library
    Add {
        title: String,
        author: String,
        /// Publication year (must be after 800)
        #[arg(allow_negative_numbers = true)]
        year: i64,
        /// One of the labels printed by `bookshelf genres`
        genre: String,
        /// Mark the book as already read
        #[arg(long)]
        read: bool,
    },

    /// Remove a book by exact title
    Remove { title: String },

    /// Search books by title or author substring (case-sensitive)
    Search {
        /// Text to look for; an empty string matches every book
        query: String,
        #[arg(long, default_value = "title")]
        by: SearchField,
        #[arg(long)]
        json: bool,
    },

    /// List every book in insertion order
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show collection statistics
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// List recognized genres
    Genres,
}

/// Result of a command that completed without a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    Rejected,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.db.clone(), cli.log_dir.clone(), cli.log_level.clone())
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Err(err) = bookshelf_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let mut stdout = std::io::stdout().lock();
    match execute(&config, cli.command, &mut stdout) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(1),
        Err(err) => {
            warn!("event=cli_command module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::from(2)
        }
    }
}

fn execute(config: &Config, command: Commands, out: &mut impl Write) -> Result<Outcome, CliError> {
    // Listing genres needs no database file.
    if let Commands::Genres = command {
        print_genres(out)?;
        return Ok(Outcome::Done);
    }

    config.ensure_db_parent()?;
    let store = LibraryStore::open(&config.db_path)?;
    let outcome = run(&store, command, out)?;
    store.close()?;
    Ok(outcome)
}

fn run(store: &LibraryStore, command: Commands, out: &mut impl Write) -> Result<Outcome, CliError> {
    match command {
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            if store.add_book(&title, &author, year, &genre, read)? {
                writeln!(out, "Book added.")?;
                Ok(Outcome::Done)
            } else {
                writeln!(out, "Book already exists or fields are incorrect.")?;
                Ok(Outcome::Rejected)
            }
        }
        Commands::Remove { title } => {
            if store.remove_book(&title)? {
                writeln!(out, "Book removed.")?;
                Ok(Outcome::Done)
            } else {
                writeln!(out, "Book not found.")?;
                Ok(Outcome::Rejected)
            }
        }
        Commands::Search { query, by, json } => {
            let books = store.search_books(&query, by)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&books)?)?;
            } else if books.is_empty() {
                writeln!(out, "No matching books found.")?;
            } else {
                for book in &books {
                    writeln!(out, "{book}")?;
                }
            }
            Ok(Outcome::Done)
        }
        Commands::List { json } => {
            let books = store.list_all_books()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&books)?)?;
            } else {
                print_numbered(&books, out)?;
            }
            Ok(Outcome::Done)
        }
        Commands::Stats { json } => {
            let stats = store.get_statistics()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                writeln!(out, "Total books: {}", stats.total)?;
                writeln!(out, "Percentage read: {}%", stats.percent_read_display())?;
            }
            Ok(Outcome::Done)
        }
        Commands::Genres => {
            print_genres(out)?;
            Ok(Outcome::Done)
        }
    }
}

fn print_genres(out: &mut impl Write) -> Result<(), CliError> {
    for genre in Genre::ALL {
        writeln!(out, "{genre}")?;
    }
    Ok(())
}

fn print_numbered(books: &[Book], out: &mut impl Write) -> Result<(), CliError> {
    if books.is_empty() {
        writeln!(out, "Your library is empty.")?;
        return Ok(());
    }
    for (index, book) in books.iter().enumerate() {
        writeln!(out, "{}. {book}", index + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Commands, Outcome};
    use crate::config::Config;
    use clap::Parser;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config::resolve(
            Some(dir.path().join("data").join("library.db")),
            Some(dir.path().join("logs")),
            None,
        )
        .unwrap()
    }

    fn run_args(config: &Config, args: &[&str]) -> (Outcome, String) {
        let cli = Cli::try_parse_from(std::iter::once("bookshelf").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let outcome = execute(config, cli.command, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_list_remove_flow() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let (outcome, text) = run_args(
            &config,
            &["add", "Dune", "Frank Herbert", "1965", "Science fiction", "--read"],
        );
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(text, "Book added.\n");

        let (outcome, text) = run_args(
            &config,
            &["add", "Dune", "Someone", "1990", "Fantasy"],
        );
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(text, "Book already exists or fields are incorrect.\n");

        let (_, text) = run_args(&config, &["list"]);
        assert_eq!(
            text,
            "1. Dune by Frank Herbert (1965) - Science fiction - Read\n"
        );

        let (outcome, text) = run_args(&config, &["remove", "Dune"]);
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(text, "Book removed.\n");

        let (outcome, text) = run_args(&config, &["remove", "Dune"]);
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(text, "Book not found.\n");

        let (_, text) = run_args(&config, &["list"]);
        assert_eq!(text, "Your library is empty.\n");
    }

    #[test]
    fn search_and_stats_render_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        run_args(&config, &["add", "Carrie", "Stephen King", "1974", "Horror", "--read"]);
        run_args(&config, &["add", "It", "Stephen King", "1986", "Horror"]);

        let (_, text) = run_args(&config, &["search", "King", "--by", "author"]);
        assert_eq!(text.lines().count(), 2);

        let (_, text) = run_args(&config, &["search", "Misery"]);
        assert_eq!(text, "No matching books found.\n");

        let (_, text) = run_args(&config, &["stats"]);
        assert_eq!(text, "Total books: 2\nPercentage read: 50.00%\n");
    }

    #[test]
    fn json_listing_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        run_args(&config, &["add", "Emma", "Jane Austen", "1815", "Romance novel"]);

        let (_, text) = run_args(&config, &["list", "--json"]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["title"], "Emma");
        assert_eq!(value[0]["genre"], "Romance novel");
    }

    #[test]
    fn genres_command_lists_every_label() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let (_, text) = run_args(&config, &["genres"]);
        assert_eq!(text.lines().count(), 23);
        assert!(text.lines().any(|line| line == "Autobiography and memoir"));
        assert!(!config.db_path.exists());
    }

    #[test]
    fn negative_year_parses_and_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let (outcome, _) = run_args(&config, &["add", "Old", "Anon", "-50", "Fiction"]);
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn unknown_search_field_is_a_parse_error() {
        assert!(Cli::try_parse_from(["bookshelf", "search", "x", "--by", "genre"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["bookshelf", "genres"]).unwrap().command,
            Commands::Genres
        ));
    }
}
