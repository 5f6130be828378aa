//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use md2hwpx_core::{Converter, Settings, PRESET_NAMES};

/// Log filter used under `--verbose` when `RUST_LOG` is not set
const VERBOSE_FILTER: &str = "warn,md2hwpx_core=debug,md2hwpx_hwpx=debug,md2hwpx_cli=debug";

#[derive(Parser, Debug)]
#[command(name = "md2hwpx")]
#[command(author, version, about = "Convert Markdown files to HWPX (한글) format", long_about = None)]
pub struct Cli {
    /// Markdown file to convert
    #[arg(required_unless_present = "list_styles")]
    pub input: Option<PathBuf>,

    /// Output HWPX file (defaults to the input with a .hwpx extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Style preset
    #[arg(short, long, value_parser = PRESET_NAMES)]
    pub style: Option<String>,

    /// Input file encoding (defaults to utf-8)
    #[arg(short, long)]
    pub encoding: Option<String>,

    /// Settings file (defaults to md2hwpx.toml next to the input)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// List available style presets and exit
    #[arg(long)]
    pub list_styles: bool,

    /// Print progress information
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options of one conversion, after command-line parsing
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions<'a> {
    pub output: Option<&'a Path>,
    pub style: Option<&'a str>,
    pub encoding: Option<&'a str>,
    pub config: Option<&'a Path>,
    pub verbose: bool,
}

/// What a successful conversion did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub output: PathBuf,
    pub style: String,
    pub encoding: String,
    pub bytes: u64,
}

/// Main CLI entry point
pub fn run_cli() -> Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line
pub fn run(cli: Cli) -> Result<()> {
    if cli.list_styles {
        print!("{}", list_styles_text());
        return Ok(());
    }
    let Some(input) = cli.input.as_deref() else {
        bail!("no input file given");
    };

    init_tracing(cli.verbose);
    let options = ConvertOptions {
        output: cli.output.as_deref(),
        style: cli.style.as_deref(),
        encoding: cli.encoding.as_deref(),
        config: cli.config.as_deref(),
        verbose: cli.verbose,
    };
    convert_command(input, &options)?;
    Ok(())
}

/// Text printed by `--list-styles`
pub fn list_styles_text() -> String {
    let mut text = String::from("Available style presets:\n");
    for name in PRESET_NAMES {
        text.push_str("  - ");
        text.push_str(name);
        text.push('\n');
    }
    text
}

/// Output path used when none is given
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("hwpx")
}

/// Execute a conversion
///
/// Style and encoding come from the command line first, then the settings
/// file, then the built-in defaults.
pub fn convert_command(input: &Path, options: &ConvertOptions<'_>) -> Result<ConvertSummary> {
    if !input.is_file() {
        bail!("file not found: {}", input.display());
    }

    let settings = match options.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::discover(input)
            .context("Failed to load settings next to the input")?
            .unwrap_or_default(),
    };
    let style = options
        .style
        .map_or_else(|| settings.style().to_string(), str::to_string);
    let encoding = options
        .encoding
        .unwrap_or_else(|| settings.encoding())
        .to_string();
    let output = options
        .output
        .map_or_else(|| default_output_path(input), Path::to_path_buf);
    debug!(style = %style, encoding = %encoding, "resolved conversion options");

    if options.verbose {
        println!("Input:  {}", input.display());
        println!("Output: {}", output.display());
        println!("Style:  {style}");
    }

    let converter = Converter::new(&style)?;
    let bytes = converter
        .convert_file(input, &output, &encoding)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if options.verbose {
        println!("Done. {bytes} bytes written.");
    } else {
        println!("Converted: {}", output.display());
    }

    Ok(ConvertSummary {
        output,
        style,
        encoding,
        bytes,
    })
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
