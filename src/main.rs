//! Weighted Trie - command-line entrypoint.
//!
//! Loads configuration, initializes logging and runs one trie command. Query
//! results are written to stdout as JSON; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weighted_trie_lib::config::{self, AppConfig, ConfigLoader, LogConfig, ENV_PREFIX};
use weighted_trie_lib::data_structures::{WeightedTrie, WeightedTrieConfig};
use weighted_trie_lib::error::{
    report_error, set_error_reporter, AppError, AppResult, ErrorContext, TracingErrorReporter,
};
use weighted_trie_lib::wordlist::{read_word_list, WordEntry};

/// Command line arguments for the Weighted Trie tool.
#[derive(Parser, Debug)]
#[clap(name = "weighted_trie", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Load a small sample vocabulary and run every operation on it
    Demo,

    /// Look up one word exactly
    Search {
        /// Word list to load (`word [weight]` per line)
        #[clap(short, long, value_parser)]
        words: PathBuf,

        /// Word to look up
        word: String,
    },

    /// List stored words starting with a prefix, heaviest first
    Prefix {
        /// Word list to load (`word [weight]` per line)
        #[clap(short, long, value_parser)]
        words: PathBuf,

        /// Prefix to match (may be empty)
        #[clap(default_value = "")]
        prefix: String,
    },

    /// List every stored word, heaviest first
    List {
        /// Word list to load (`word [weight]` per line)
        #[clap(short, long, value_parser)]
        words: PathBuf,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Vocabulary used by the `demo` command.
const DEMO_WORDS: [(&str, f64); 5] = [
    ("apple", 5.0),
    ("app", 3.0),
    ("application", 7.0),
    ("banana", 4.0),
    ("band", 2.0),
];

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| AppError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Writes `value` to stdout as JSON.
fn emit<T: Serialize>(value: &T, pretty: bool) -> AppResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Builds a trie from the global configuration.
fn build_trie() -> WeightedTrie {
    let trie_config = config::get_global_config()
        .map(|global| WeightedTrieConfig::from(&global.get().trie))
        .unwrap_or_default();
    WeightedTrie::with_config(trie_config)
}

/// Builds a trie and loads a word list into it.
fn load_trie(path: &Path) -> AppResult<WeightedTrie> {
    let entries = read_word_list(path)?;
    let trie = build_trie();
    let added = trie.add_words(entries.into_iter().map(WordEntry::into_pair))?;
    info!(path = %path.display(), added, "word list loaded");
    Ok(trie)
}

/// Runs the sample session.
fn run_demo(pretty: bool) -> AppResult<()> {
    let trie = build_trie();
    for (word, weight) in DEMO_WORDS {
        trie.add_word(word, weight)?;
    }

    for word in ["apple", "app", "nonexistent"] {
        emit(&serde_json::json!({ "search": word, "hits": trie.search_word(word)? }), pretty)?;
    }
    for prefix in ["app", "ban"] {
        emit(&serde_json::json!({ "prefix": prefix, "hits": trie.starts_with(prefix)? }), pretty)?;
    }
    emit(&serde_json::json!({ "all": trie.get_all_words()? }), pretty)?;

    let removed = trie.delete_word("app")?;
    emit(
        &serde_json::json!({ "delete": "app", "removed": removed, "hits": trie.search_word("app")? }),
        pretty,
    )?;
    Ok(())
}

/// Executes a command that needs a loaded configuration.
fn run(command: Command, config: AppConfig, pretty: bool) -> AppResult<()> {
    config::init_global_config(config);

    match command {
        Command::Demo => run_demo(pretty),
        Command::Search { words, word } => emit(&load_trie(&words)?.search_word(&word)?, pretty),
        Command::Prefix { words, prefix } => emit(&load_trie(&words)?.starts_with(&prefix)?, pretty),
        Command::List { words } => emit(&load_trie(&words)?.get_all_words()?, pretty),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| AppError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

/// Main entry point for the application.
fn main() -> AppResult<()> {
    let args = Args::parse();

    let loaded = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX).load();
    let log_config = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    init_logging(&log_config)?;
    set_error_reporter(Arc::new(TracingErrorReporter));

    let config = match (loaded, &args.command) {
        (Ok(config), _) => config,
        // A broken file must not stop us from writing a fresh one
        (Err(e), Command::GenConfig { .. }) => {
            tracing::warn!("Ignoring configuration error: {}", e);
            AppConfig::default()
        }
        (Err(e), _) => {
            report_error(ErrorContext::new(e.into(), "config"));
            process::exit(1);
        }
    };

    if let Err(e) = run(args.command, config, args.pretty) {
        report_error(ErrorContext::new(e, "command"));
        process::exit(1);
    }
    Ok(())
}
