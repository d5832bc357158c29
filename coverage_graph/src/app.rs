use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    extract::{extract_records, ExtractOptions, SUMMARY_ROWS},
    group::build_groups,
    render::{render, OutputMode, RenderOptions},
    sort::{sort_records, SortKey, SortOrder, SortSpec},
    table::load_table,
};

pub const DEFAULT_IN_FILE: &str = "coverage_table.txt";
pub const DEFAULT_HTML_OUT_FILE: &str = "coverage_graph.html";
pub const DEFAULT_IMAGE_OUT_FILE: &str = "coverage_graph.png";

/// Two-letter short flags and their long spelling
const SHORT_ALIASES: &[(&str, &str)] = &[
    ("-ns", "--no_sort"),
    ("-cl", "--centered_labels"),
    ("-ni", "--non_interactive"),
    ("-nc", "--no_complete"),
    ("-sr", "--skip_rows"),
];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "coverage_graph",
    author,
    version,
    about = "Plot per-file coverage ratios from a pipe-delimited coverage table",
    long_about = None
)]
pub struct Args {
    /// Coverage table to read
    #[arg(
        short = 'f',
        long = "in_file",
        alias = "in-file",
        value_name = "PATH",
        default_value = DEFAULT_IN_FILE
    )]
    pub in_file: PathBuf,

    /// Output file [default: coverage_graph.html, or coverage_graph.png with --non_interactive]
    #[arg(short = 'o', long = "out_file", alias = "out-file", value_name = "PATH")]
    pub out_file: Option<PathBuf>,

    /// Sort by coverage ratio instead of file label
    #[arg(short = 'r', long)]
    pub ratio: bool,

    /// Sort in descending order
    #[arg(short = 'd', long)]
    pub descending: bool,

    /// Keep table order (-ns); overrides --ratio and --descending
    #[arg(long = "no_sort", alias = "no-sort")]
    pub no_sort: bool,

    /// Keep surrounding whitespace in file labels (-cl)
    #[arg(long = "centered_labels", alias = "centered-labels")]
    pub centered_labels: bool,

    /// Write a static image instead of an interactive HTML page (-ni)
    #[arg(long = "non_interactive", alias = "non-interactive")]
    pub non_interactive: bool,

    /// Comma-separated package filters, each drawn as its own chart
    #[arg(
        short = 'p',
        long = "plot_package",
        alias = "plot-package",
        value_name = "PACKAGES"
    )]
    pub plot_package: Option<String>,

    /// Leave out the chart of all files when package filters are given (-nc)
    #[arg(long = "no_complete", alias = "no-complete")]
    pub no_complete: bool,

    /// Column separator
    #[arg(short = 's', long, default_value_t = '|')]
    pub separator: char,

    /// Leading lines to skip before the header (-sr)
    #[arg(long = "skip_rows", alias = "skip-rows", default_value_t = 1)]
    pub skip_rows: usize,

    /// Data rows holding summary totals, skipped before file rows
    #[arg(long = "summary_rows", alias = "summary-rows", default_value_t = SUMMARY_ROWS)]
    pub summary_rows: usize,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    pub separator: char,
    pub skip_rows: usize,
    pub extract: ExtractOptions,
    pub sort: SortSpec,
    pub include_complete: bool,
    pub mode: OutputMode,
}

impl From<Args> for AppConfig {
    fn from(value: Args) -> Self {
        let mode = if value.non_interactive {
            OutputMode::Static
        } else {
            OutputMode::Interactive
        };

        let out_file = value.out_file.unwrap_or_else(|| match mode {
            OutputMode::Interactive => PathBuf::from(DEFAULT_HTML_OUT_FILE),
            OutputMode::Static => PathBuf::from(DEFAULT_IMAGE_OUT_FILE),
        });

        let packages = value
            .plot_package
            .as_deref()
            .map(parse_packages)
            .unwrap_or_default();

        let sort = SortSpec {
            key: if value.ratio {
                SortKey::Ratio
            } else {
                SortKey::Path
            },
            order: if value.descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            },
            enabled: !value.no_sort,
        };

        Self {
            in_file: value.in_file,
            out_file,
            separator: value.separator,
            skip_rows: value.skip_rows,
            include_complete: !value.no_complete || packages.is_empty(),
            extract: ExtractOptions {
                summary_rows: value.summary_rows,
                packages,
                centered_labels: value.centered_labels,
            },
            sort,
            mode,
        }
    }
}

impl AppConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mode: self.mode,
            out_file: self.out_file.clone(),
        }
    }
}

/// Split `a, b,,c` into `["a", "b", "c"]`
pub fn parse_packages(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Rewrite `-ns`, `-cl`, `-ni`, `-nc` and `-sr` to their long flags
pub fn expand_short_aliases<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut expanded = Vec::new();
    let mut passthrough = false;

    for arg in args.into_iter().map(Into::into) {
        if passthrough {
            expanded.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|text| {
            if text == "--" {
                return None;
            }
            SHORT_ALIASES.iter().find_map(|(short, long)| {
                if text == *short {
                    Some(OsString::from(*long))
                } else {
                    text.strip_prefix(short)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| OsString::from(format!("{long}={value}")))
                }
            })
        });

        if arg == "--" {
            passthrough = true;
        }
        expanded.push(rewritten.unwrap_or(arg));
    }

    expanded
}

pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load, extract, group, sort and render
pub fn run(config: &AppConfig) -> Result<()> {
    info!(
        in_file = %config.in_file.display(),
        out_file = %config.out_file.display(),
        mode = ?config.mode,
        packages = ?config.extract.packages,
        "Plotting coverage table",
    );

    let table = load_table(&config.in_file, config.separator, config.skip_rows)
        .with_context(|| format!("failed to load coverage table {}", config.in_file.display()))?;

    let records = extract_records(&table, &config.extract).with_context(|| {
        format!(
            "failed to read coverage ratios from {}",
            config.in_file.display()
        )
    })?;

    let mut groups = build_groups(&records, &config.extract.packages, config.include_complete);
    for group in &mut groups {
        sort_records(&mut group.records, config.sort);
    }

    render(&groups, &config.render_options())
        .with_context(|| format!("failed to write chart to {}", config.out_file.display()))?;

    Ok(())
}
