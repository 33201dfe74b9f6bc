//! # fontpatch CLI
//!
//! Usage:
//!   fontpatch ko path/to/host.nro
//!   fontpatch ja host.nro --font-dir fonts/ --config my.txt

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use fontpatch::bundle::{self, TABLE_SIZE, ZSTD_MAGIC};
use fontpatch::config::{Config, DEFAULT_CONFIG_PATH};
use fontpatch::font::{load_font, DEFAULT_FONT_DIR};
use fontpatch::{lang, patch, PatchError};

#[derive(Parser)]
#[command(name = "fontpatch", about = "Repaint the embedded glyph table of a host binary", version)]
struct Cli {
    /// Language tag selecting the codepoint ranges (ko, ja, en, fr, pl, ru, ...)
    lang: String,

    /// Host binary to patch in place
    binary: PathBuf,

    /// key=value settings file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory searched for a .ttf/.otf font
    #[arg(long, default_value = DEFAULT_FONT_DIR)]
    font_dir: PathBuf,

    /// Show per-candidate and per-stage details
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if !e.is_fatal() => {
            info!("{e}; skipping");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PatchError> {
    let cfg = Config::load_or_default(&cli.config);

    let ranges = lang::ranges_for(&cli.lang, cfg.font_num)?;
    let codepoints: usize = ranges.iter().map(lang::CodepointRange::len).sum();
    info!(lang = %cli.lang, ranges = ranges.len(), codepoints, "using font ranges");
    if cfg.font_num {
        info!("font_num=true, adding digits");
    }

    let mut raw = std::fs::read(&cli.binary)?;
    let location = bundle::locate(&raw, &ZSTD_MAGIC, TABLE_SIZE)?;
    info!(file = %cli.binary.display(), offset = location.offset, budget = location.budget, "patching");

    let font = load_font(&cli.font_dir)?;
    let face = font.face()?;

    let report = patch::patch_located(&mut raw, location, &ranges, &face)?;

    // Nothing touches the file until every stage has succeeded.
    std::fs::write(&cli.binary, &raw)?;
    info!(
        glyphs = report.glyphs,
        compressed = report.compressed_len,
        budget = report.budget,
        "font patch complete"
    );
    Ok(())
}
