mod report;
mod script;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;
use pagekit::map::RecordingSurface;
use pagekit::{Page, PageConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use webdom::{Document, DocumentConfig, Element};

/// Run the landing page behaviors against a headless document.
#[derive(Debug, Parser)]
#[command(name = "pagesim", version)]
struct Args {
    /// Page fixture (JSON element tree).
    #[arg(long)]
    page: PathBuf,

    /// Page configuration (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event script (JSON list of steps) replayed after initialization.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Apply every style change instantly.
    #[arg(long)]
    reduced_motion: bool,
}

fn init_logging(args: &Args) -> anyhow::Result<()> {
    match &args.log_file {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(args.log_level, Config::default(), log_file)?;
        }
        None => TermLogger::init(
            args.log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => PageConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PageConfig::default(),
    };

    let fixture = std::fs::read_to_string(&args.page)
        .with_context(|| format!("failed to read page {}", args.page.display()))?;
    let root: Element = serde_json::from_str(&fixture)
        .with_context(|| format!("failed to parse page {}", args.page.display()))?;

    let document = Document::with_config(DocumentConfig {
        reduced_motion: args.reduced_motion,
        ..Default::default()
    });
    document.mount(&root);

    let surface = Arc::new(RecordingSurface::new());
    let page = Page::init(&document, &config, surface.clone())?;
    document.flush();
    info!(
        "{} disclosure groups, {} hover items",
        page.disclosures.len(),
        page.hover.len()
    );

    if let Some(path) = &args.script {
        let steps = script::load(path)?;
        script::run(&document, &steps)?;
    }

    let report = report::build(&document, &surface.state());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
