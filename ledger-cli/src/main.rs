use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ledger_ingest::{load_pages, CleanOutput, CleanReport, Cleaner};
use ledger_report::{default_output_dir, publish, render_preview, OutputFormat, Sheet};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "ledger-clean",
    version,
    about = "Clean extracted bank-statement tables into a ledger with debit/credit sheets"
)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean extracted pages and write the Cleaned/Debit/Credit sheets
    Clean {
        /// Extracted tables: one CSV file per table, or JSON files holding many
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Name of the source PDF; the output is named `<name>_clean`
        /// (default: the first page file)
        #[arg(long)]
        source: Option<String>,

        /// Output directory (default: config, then the system temp dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format (default: config, then xlsx)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Print the cleaning report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Ledger rows to preview after cleaning (default: config, then 10)
        #[arg(long)]
        preview: Option<usize>,
    },

    /// Clean extracted pages and print a preview without writing files
    Preview {
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Number of ledger rows to show
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },

    /// Manage ~/.ledger-clean/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        cfg.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Clean {
            pages,
            source,
            out_dir,
            format,
            json,
            preview,
        } => {
            let source = source.unwrap_or_else(|| default_source(&pages[0]));
            let out = clean_pages(&pages, &source, &cfg)?;

            let dir = out_dir
                .or_else(|| cfg.output.dir.clone())
                .unwrap_or_else(default_output_dir);
            let format = format.map(OutputFormat::from).unwrap_or(cfg.output.format);
            let written = publish(&dir, &source, format, &out.ledger, &out.debit, &out.credit)
                .with_context(|| format!("writing output to {}", dir.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&out.report)?);
            } else {
                print_report(&out.report);
                let rows = preview.unwrap_or(cfg.output.preview_rows);
                if rows > 0 {
                    println!("\n{}", render_preview(&Sheet::from_ledger(&out.ledger), rows));
                }
            }

            for path in &written {
                println!("Wrote {}", path.display());
            }
        }

        Command::Preview { pages, rows } => {
            let source = default_source(&pages[0]);
            let out = clean_pages(&pages, &source, &cfg)?;
            print_report(&out.report);
            println!("\n{}", render_preview(&Sheet::from_ledger(&out.ledger), rows));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}

fn clean_pages(paths: &[PathBuf], source: &str, cfg: &config::Config) -> Result<CleanOutput> {
    for p in paths {
        if !p.exists() {
            bail!("page file not found: {}", p.display());
        }
    }

    let pages = load_pages(paths).context("loading extracted pages")?;
    let cleaner = Cleaner::new(&cfg.clean).context("invalid [clean] phrases in config")?;
    cleaner
        .clean(&pages, source)
        .with_context(|| format!("cleaning {source}"))
}

/// File name of the first page, used to name output when no `--source` is given.
fn default_source(first_page: &Path) -> String {
    first_page
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string())
}

fn print_report(r: &CleanReport) {
    println!("Cleaned {} ({} pages, {} raw rows)", r.source, r.pages, r.input_rows);
    println!(
        "  removed: {} page markers | {} blank | {} header fragments | {} continuations merged | {} unreadable",
        r.page_markers, r.blank_rows, r.header_rows, r.continuations_merged, r.unreadable_rows
    );
    println!("  ledger rows: {}", r.ledger_rows);
    if r.coercion.total() > 0 {
        println!(
            "  unparseable cells left empty: {} numeric, {} dates",
            r.coercion.numeric_failures, r.coercion.date_failures
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_clean_command() {
        let cli = Cli::parse_from([
            "ledger-clean",
            "clean",
            "p1.csv",
            "p2.csv",
            "--source",
            "march.pdf",
            "--format",
            "csv",
        ]);
        match cli.command {
            Command::Clean { pages, source, format, .. } => {
                assert_eq!(pages.len(), 2);
                assert_eq!(source.as_deref(), Some("march.pdf"));
                assert_eq!(format.map(OutputFormat::from), Some(OutputFormat::Csv));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_version_is_package_version() {
        let err = Cli::try_parse_from(["ledger-clean", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_clean_requires_pages() {
        assert!(Cli::try_parse_from(["ledger-clean", "clean"]).is_err());
    }

    #[test]
    fn test_default_source_is_first_page_name() {
        assert_eq!(default_source(Path::new("/tmp/x/march.csv")), "march.csv");
    }

    #[test]
    fn test_missing_page_file_is_reported() {
        let err = clean_pages(&[PathBuf::from("/nope/p1.csv")], "s.pdf", &config::Config::default())
            .unwrap_err();
        assert!(err.to_string().contains("/nope/p1.csv"));
    }

    #[test]
    fn test_narrow_pages_surface_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("p1.csv");
        std::fs::write(&p, "a,b,c\n").unwrap();
        let err = clean_pages(&[p], "s.pdf", &config::Config::default()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("cleaning s.pdf"), "got: {msg}");
        assert!(msg.contains("3 columns"), "got: {msg}");
    }
}
