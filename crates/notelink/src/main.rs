//! notelink: wiki-style link tools for a JSON note corpus.
//!
//! Every command is a thin wrapper over a named tool (see `notelink tools`),
//! so `notelink links "Plan"` and `notelink call get_links '{"title":"Plan"}'`
//! do the same thing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use notelink::config::Config;
use notelink::corpus::Corpus;
use notelink::tools;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notelink")]
#[command(author, version, about = "Backlinks, link checks and rename propagation for a note corpus")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: ./notelink.toml when present)
    #[arg(long, global = true, env = "NOTELINK_CONFIG")]
    config: Option<PathBuf>,

    /// Corpus JSON file, overrides the config file
    #[arg(long, global = true, env = "NOTELINK_CORPUS")]
    corpus: Option<PathBuf>,

    /// Log filter directive, overrides the config file (RUST_LOG wins over both)
    #[arg(long, global = true, env = "NOTELINK_LOG")]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backlinks and forward links of a note
    Links {
        /// Note title (case-insensitive)
        title: String,
    },

    /// Rename a note and rewrite every link to it
    Rename {
        old_title: String,
        new_title: String,

        /// Print diffs instead of saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Show a note split into text and link segments
    Render {
        title: String,
    },

    /// Detect an unterminated [[ link at a cursor position
    Detect {
        /// Text being edited
        content: String,

        /// Byte offset of the cursor (default: end of text)
        #[arg(long)]
        cursor: Option<usize>,
    },

    /// Report broken links, orphan notes and duplicate titles
    Check,

    /// Print the tool descriptors as JSON
    Tools,

    /// Call a tool by name with JSON arguments
    Call {
        tool: String,

        #[arg(default_value = "{}")]
        arguments: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    // Logs go to stderr; stdout carries tool output only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.corpus, cli.log_filter);
    init_logging(&config.log_filter);

    let (tool, arguments): (String, Value) = match cli.command {
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&tools::list_tools())?);
            return Ok(());
        }
        Commands::Links { title } => ("get_links".into(), json!({ "title": title })),
        Commands::Rename {
            old_title,
            new_title,
            dry_run,
        } => (
            "rename_note".into(),
            json!({ "old_title": old_title, "new_title": new_title, "dry_run": dry_run }),
        ),
        Commands::Render { title } => ("render_note".into(), json!({ "title": title })),
        Commands::Detect { content, cursor } => {
            ("detect_link".into(), json!({ "content": content, "cursor": cursor }))
        }
        Commands::Check => ("check_links".into(), json!({})),
        Commands::Call { tool, arguments } => {
            let arguments: Value = serde_json::from_str(&arguments)
                .context("tool arguments must be a JSON object")?;
            (tool, arguments)
        }
    };

    let mut corpus = Corpus::load(&config.corpus)?;
    let output = tools::call_tool(&mut corpus, &tool, &arguments).map_err(anyhow::Error::msg)?;
    print!("{}", output);

    if corpus.save(config.backup)? {
        eprintln!("{}", format!("Saved {}", config.corpus.display()).green());
    }
    Ok(())
}
