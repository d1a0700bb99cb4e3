//! CLI binary for causelist-pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ReportConfig`, runs extraction and rendering, and prints the outcome.

use anyhow::{bail, Context, Result};
use causelist_pdf::{
    extract_records, generate_report, rows_from_html, CauseListError, Orientation, PageSize,
    RawRow, ReportConfig, ReportTheme, DEFAULT_TABLE_SELECTOR,
};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers ──────────────────────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r##"EXAMPLES:
  # Saved listing page to the default Cause_List.pdf
  causelist cause_list.html

  # Rows scraped elsewhere, as a JSON array of arrays of strings
  causelist rows.json -o reports/today.pdf

  # Portrait letter paper with a custom title
  causelist cause_list.html --page-size letter --portrait --title "Sessions Court"

  # Inspect what would be rendered
  causelist cause_list.html --dump-json | jq '.rows | length'

ROW JSON:
  Each row is an array of cells; a cell is a string or
  {"text": "...", "is_spanned": true}.
  [["1", "Suit No 12\nView", "A vs B", "Adv. X"], [{"text": "Civil", "is_spanned": true}]]

THEME JSON:
  Any subset of ReportTheme fields; the rest keep their defaults.
  {"title": "Sessions Court", "font_size": 8, "band_colors": ["#FFFFFF", "#EEF3FA"]}

ENVIRONMENT VARIABLES:
  CAUSELIST_OUTPUT, CAUSELIST_TITLE, CAUSELIST_SELECTOR, CAUSELIST_THEME,
  CAUSELIST_PAGE_SIZE   Defaults for the matching flags
  RUST_LOG              Override log filter (e.g. causelist_pdf=debug)
"##;

/// Render a court cause-list table as a printable PDF.
#[derive(Parser, Debug)]
#[command(
    name = "causelist",
    version,
    about = "Render a court cause-list table as a printable PDF",
    long_about = "Extract the case rows from a saved cause-list page (or a JSON dump of its \
table rows), clean them up, and render a paginated, banded PDF report.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Saved HTML page or JSON file of table rows.
    input: PathBuf,

    /// Where to write the PDF.
    #[arg(short, long, env = "CAUSELIST_OUTPUT", default_value = "Cause_List.pdf")]
    output: PathBuf,

    /// Input format. Default: inferred from the file extension.
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// CSS selector of the cause-list table in an HTML page.
    #[arg(long, env = "CAUSELIST_SELECTOR", default_value = DEFAULT_TABLE_SELECTOR)]
    selector: String,

    /// Report title drawn above the table.
    #[arg(long, env = "CAUSELIST_TITLE")]
    title: Option<String>,

    /// JSON file with theme overrides.
    #[arg(long, env = "CAUSELIST_THEME")]
    theme: Option<PathBuf>,

    /// Paper size.
    #[arg(long, env = "CAUSELIST_PAGE_SIZE", value_enum)]
    page_size: Option<PageSizeArg>,

    /// Portrait pages; columns are rescaled to the narrower frame.
    #[arg(long)]
    portrait: bool,

    /// Draw the header row on the first page only.
    #[arg(long)]
    no_repeat_header: bool,

    /// Print the extracted records as JSON instead of rendering.
    #[arg(long)]
    dump_json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CAUSELIST_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CAUSELIST_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum InputFormat {
    Html,
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PageSizeArg {
    A4,
    Letter,
    Legal,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let rows = read_rows(&cli)?;

    // ── Dump mode ────────────────────────────────────────────────────────
    if cli.dump_json {
        let records = match extract_records(&rows, &config) {
            Ok(records) => records,
            Err(e) => return Err(report_failure(e)),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("Failed to serialise records")?
        );
        return Ok(());
    }

    // ── Render ───────────────────────────────────────────────────────────
    let summary = match generate_report(&rows, &config, &cli.output) {
        Ok(summary) => summary,
        Err(e) => return Err(report_failure(e)),
    };

    if !cli.quiet {
        eprintln!(
            "{}  {} rows on {} pages  →  {}",
            green("✔"),
            summary.data_rows,
            summary.pages,
            bold(&cli.output.display().to_string()),
        );
    }
    Ok(())
}

/// Print the retry hint for no-data failures, then hand the error back.
fn report_failure(e: CauseListError) -> anyhow::Error {
    if e.is_no_data() {
        eprintln!(
            "{} No cause-list data found. Reload the listing page, wait for the table to \
finish loading, and save or scrape it again.",
            red("✘")
        );
    }
    anyhow::Error::new(e).context("Cause list generation failed")
}

/// Map CLI args to `ReportConfig`.
fn build_config(cli: &Cli) -> Result<ReportConfig> {
    let base = match cli.theme {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read theme from {:?}", path))?;
            serde_json::from_str::<ReportTheme>(&text)
                .with_context(|| format!("Invalid theme JSON in {:?}", path))?
        }
        None => ReportTheme::default(),
    };

    let mut builder = base.clone().into_builder();
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(size) = cli.page_size {
        builder = builder.page_size(size.into());
    }
    if cli.portrait {
        // Keep the theme's proportions, fitted to the portrait frame.
        builder = builder
            .orientation(Orientation::Portrait)
            .column_ratios(base.column_widths);
    }
    if cli.no_repeat_header {
        builder = builder.repeat_header(false);
    }
    let theme = builder.build().context("Invalid report theme")?;

    Ok(ReportConfig {
        theme,
        table_selector: cli.selector.clone(),
        ..ReportConfig::default()
    })
}

fn read_rows(cli: &Cli) -> Result<Vec<RawRow>> {
    let format = match cli.format {
        Some(format) => format,
        None => infer_format(&cli.input)?,
    };
    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {:?}", cli.input))?;

    match format {
        InputFormat::Json => serde_json::from_str(&text)
            .with_context(|| format!("Expected a JSON array of rows in {:?}", cli.input)),
        InputFormat::Html => match rows_from_html(&text, &cli.selector) {
            Ok(rows) => Ok(rows),
            Err(e) => Err(report_failure(e.into())),
        },
    }
}

fn infer_format(path: &Path) -> Result<InputFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(InputFormat::Json),
        Some("html") | Some("htm") => Ok(InputFormat::Html),
        _ => bail!(
            "Cannot infer input format of {:?}; pass --format html or --format json",
            path
        ),
    }
}
