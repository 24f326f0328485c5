mod reports;
mod source;
mod util;

use anyhow::{Context, Result};
use checkmark_core::{Catalog, CategoryKey, CategoryReport, ChecklistTracker, InventorySource};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use reports::ListingOptions;
use source::FileInventory;
use util::split_csv;

/// Exit status when `--require-checkmark` is set and a category is incomplete.
const INCOMPLETE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored summary for terminals
    Console,
    /// Machine-readable summary with every reconciled item
    Json,
    /// Table plus optional checklists
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "ultimate-checkmark", version)]
#[command(about = "Progress toward the Ultimate Checkmark from saved inventory responses")]
struct Args {
    /// Directory of saved inventory page responses, one `<tab>.json` per tab
    #[arg(long)]
    inventory_dir: Option<PathBuf>,

    /// Categories to report (comma-separated keys, or `all`)
    #[arg(long, default_value = "all")]
    categories: String,

    /// List all available categories and exit
    #[arg(long)]
    list_categories: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List every item under each category
    #[arg(short, long)]
    verbose: bool,

    /// List only checklist items that are not owned yet
    #[arg(long)]
    missing_only: bool,

    /// Exit with status 2 unless every selected category is complete
    #[arg(long)]
    require_checkmark: bool,
}

impl Args {
    const fn listing(&self) -> ListingOptions {
        ListingOptions {
            verbose: self.verbose,
            missing_only: self.missing_only,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tracker = ChecklistTracker::new(FileInventory::new(args.inventory_dir.clone()));
    if maybe_list_categories(&args, tracker.catalog())? {
        return Ok(());
    }

    match tracker.source().dir() {
        Some(dir) => log::info!("reading saved inventory from {}", dir.display()),
        None => log::info!("no inventory directory given; every item counts as unowned"),
    }

    let keys = select_categories(&args.categories);
    let reports = run_categories(&tracker, &keys);
    write_reports(&args, &reports)?;

    if args.require_checkmark && reports.iter().any(|r| !r.is_complete()) {
        std::process::exit(INCOMPLETE_EXIT_CODE);
    }

    Ok(())
}

fn maybe_list_categories(args: &Args, catalog: &Catalog) -> Result<bool> {
    if !args.list_categories {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available categories:")?;
    for checklist in catalog.iter() {
        writeln!(
            output_target.writer(),
            "  {:10} - {} ({} items)",
            checklist.key.as_str(),
            checklist.name,
            checklist.len()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn select_categories(raw: &str) -> Vec<CategoryKey> {
    let mut keys = Vec::new();
    for token in split_csv(raw) {
        if token.eq_ignore_ascii_case("all") {
            keys.extend(CategoryKey::ALL);
            continue;
        }
        match token.parse::<CategoryKey>() {
            Ok(key) => keys.push(key),
            Err(_) => eprintln!("⚠️  Unknown category: {}", token.yellow()),
        }
    }

    let mut seen = Vec::with_capacity(keys.len());
    keys.retain(|key| {
        if seen.contains(key) {
            false
        } else {
            seen.push(*key);
            true
        }
    });
    keys
}

fn run_categories<S: InventorySource>(
    tracker: &ChecklistTracker<'_, S>,
    keys: &[CategoryKey],
) -> Vec<CategoryReport> {
    keys.iter()
        .filter_map(|&key| match tracker.load_category(key) {
            Ok(report) => Some(report),
            Err(err) => {
                eprintln!("⚠️  {err}");
                None
            }
        })
        .collect()
}

fn write_reports(args: &Args, reports: &[CategoryReport]) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let listing = args.listing();

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, reports, listing)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(&mut output_target, reports, listing)?;
        }
        ReportFormat::Console => {
            reports::generate_console_report(&mut output_target, reports, listing)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

/// Report sink: buffered stdout, or the file named by `--output`.
enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
