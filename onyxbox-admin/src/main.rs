use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use onyx_filter::assets::{matches_embedded, write_default_lexicon, LEXICON_TOML_NAME};
use onyx_filter::{strip_separators, Category, Entry, Lexicon};
use onyxbox_core::{data_root, ensure_initialized, Commands, Draft};

#[derive(Parser)]
#[command(
    name = "onyxbox-admin",
    about = "Operator helpers for the OnyxBox message filter"
)]
struct Cli {
    /// Data root holding config.toml, lexicon/ and logbook/ (default: $ONYXBOX_ROOT or .onyxbox)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Create the data root with default config and lexicon
    Init,
    /// Screen text; exits 1 when it would be blocked
    Check {
        /// Text to screen (reads stdin when omitted)
        text: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print text with flagged words masked
    Clean { text: Option<String> },
    /// Print text with bypass separators removed
    Normalize { text: Option<String> },
    /// Run the composer's submission gate and log the decision
    Submit {
        text: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        mood: Option<String>,
        #[arg(long)]
        uid: Option<String>,
        /// Last accepted send for this sender, ms since Unix epoch
        #[arg(long)]
        last_sent_ms: Option<u64>,
    },
    /// Inspect or seed lexicon files
    Lexicon {
        #[command(subcommand)]
        cmd: LexiconCmd,
    },
}

#[derive(Subcommand)]
enum LexiconCmd {
    /// List the active lexicon's entries
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write the embedded lexicon into a directory if missing
    Seed {
        #[arg(long)]
        dir: PathBuf,
    },
    /// Parse a lexicon file and compare it with the embedded copy
    Verify {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct EntryRow<'a> {
    term: &'a str,
    category: Category,
    len: usize,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let root = cli.root.unwrap_or_else(data_root);
    tracing::debug!(root = %root.display(), "using data root");
    match cli.cmd {
        Cmd::Init => init(&root),
        Cmd::Check { text, json } => check(&root, &read_text(text)?, json),
        Cmd::Clean { text } => {
            let cmds = Commands::open(&root)?;
            println!("{}", cmds.clean(&read_text(text)?));
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Normalize { text } => {
            println!("{}", strip_separators(&read_text(text)?));
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Submit {
            text,
            name,
            mood,
            uid,
            last_sent_ms,
        } => {
            let draft = Draft {
                content: read_text(text)?,
                sender_name: name,
                mood,
                sender_uid: uid,
                last_sent_ms,
            };
            submit(&root, &draft)
        }
        Cmd::Lexicon { cmd } => match cmd {
            LexiconCmd::List { category, json } => lexicon_list(&root, category.as_deref(), json),
            LexiconCmd::Seed { dir } => lexicon_seed(&dir),
            LexiconCmd::Verify { file } => lexicon_verify(&file),
        },
    }
}

/// Use the argument, or read all of stdin. A trailing newline from stdin is dropped.
fn read_text(arg: Option<String>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read text from stdin")?;
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(buf)
}

fn init(root: &Path) -> Result<ExitCode> {
    let report = ensure_initialized(root)?;
    for c in &report.created {
        println!("created {c}");
    }
    println!("initialized {}", report.root.display());
    Ok(ExitCode::SUCCESS)
}

fn check(root: &Path, text: &str, json: bool) -> Result<ExitCode> {
    let cmds = Commands::open(root)?;
    let report = cmds.check(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.toxic {
        println!(
            "blocked: {} ({}, {})",
            report.term.as_deref().unwrap_or("?"),
            report.category.map(|c| c.as_str()).unwrap_or("?"),
            report
                .kind
                .map(|k| format!("{k:?}").to_lowercase())
                .unwrap_or_default()
        );
    } else {
        println!("ok");
    }
    Ok(if report.toxic { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

fn submit(root: &Path, draft: &Draft) -> Result<ExitCode> {
    let cmds = Commands::open(root)?;
    let verdict = cmds.submit(draft);
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(if verdict.accepted() { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

fn lexicon_list(root: &Path, category: Option<&str>, json: bool) -> Result<ExitCode> {
    let filter = match category {
        Some(name) => Some(
            Category::parse(name).with_context(|| format!("unknown category {name:?}"))?,
        ),
        None => None,
    };
    let cmds = Commands::open(root)?;
    let lexicon = cmds.screener().lexicon();
    let entries: Box<dyn Iterator<Item = &Entry> + '_> = match filter {
        Some(c) => Box::new(lexicon.by_category(c)),
        None => Box::new(lexicon.entries().iter()),
    };
    let rows: Vec<EntryRow<'_>> = entries
        .map(|e| EntryRow {
            term: e.term(),
            category: e.category(),
            len: e.char_len(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for r in &rows {
            println!("{}\t{}\t{}", r.category, r.len, r.term);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn lexicon_seed(dir: &Path) -> Result<ExitCode> {
    let path = dir.join(LEXICON_TOML_NAME);
    if write_default_lexicon(dir)? {
        println!("wrote {}", path.display());
    } else {
        println!("nothing to do; {} already present", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn lexicon_verify(file: &Path) -> Result<ExitCode> {
    let bytes = fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let text = String::from_utf8(bytes).context("lexicon is not UTF-8")?;
    let lexicon = Lexicon::from_toml_str(&text)
        .with_context(|| format!("parse {}", file.display()))?;
    println!(
        "{} v{}: {} entries",
        lexicon.name(),
        lexicon.version(),
        lexicon.len()
    );
    if let Some(desc) = lexicon.description() {
        println!("  {desc}");
    }
    if matches_embedded(text.as_bytes()) {
        println!("matches embedded {}", LEXICON_TOML_NAME);
    } else {
        println!("differs from embedded {}", LEXICON_TOML_NAME);
    }
    Ok(ExitCode::SUCCESS)
}
