use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use aglmatch::compare::{self, ComparisonMatrix};
use aglmatch::htmltables::{html_table, write_html};
use aglmatch::stringdata::{read_stringdata, StringData};

/// Pairwise analysis of a token-string data set.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML string data file
    data: PathBuf,

    /// Analysis to run over every string pair
    #[arg(value_enum)]
    analysis: AnalysisKind,

    /// Named comparison from the data file
    #[arg(long, default_value = "full")]
    comparison: String,

    /// Substring token length for the length-n analyses
    #[arg(short = 'n', long = "length")]
    n: Option<usize>,

    /// Optional output path for an HTML table
    #[arg(long)]
    html: Option<PathBuf>,

    /// Optional output path for the matrix as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Swap matrix rows and columns
    #[arg(long)]
    transpose: bool,

    /// Print the labeled strings of the comparison and exit
    #[arg(long)]
    list_strings: bool,

    /// Enable threaded pairwise analysis (default: off)
    #[arg(long, default_value_t = false)]
    threads: bool,

    /// Number of worker threads (default: max available - 1)
    #[arg(long, default_value_t = num_cpus::get().saturating_sub(1).max(1))]
    max_workers: usize,

    /// Verbose/info output (default: quiet)
    #[arg(long, short = 'v', alias = "info")]
    verbose: bool,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Trace output
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AnalysisKind {
    CrosscorrelationMax,
    SharedLengthNSubstringCount,
    LongestSharedSubstringLength,
    LongestSharedSubstringDuration,
    NovelLengthNSubstringCount,
    CommonStartDuration,
    CommonStartLength,
    IsSubstring,
    IsSame,
    SameStart,
    Levenshtein,
}

fn main() {
    let args = Args::parse();
    let log_level = if args.trace {
        log::LevelFilter::Trace
    } else if args.debug {
        log::LevelFilter::Debug
    } else if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::new().filter_level(log_level).init();

    if let Err(error) = run(&args) {
        eprintln!("Analysis failed: {error:?}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    if args.threads {
        #[cfg(feature = "parallel")]
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.max_workers)
            .build_global()
            .context("Failed to build worker pool")?;
        #[cfg(not(feature = "parallel"))]
        log::warn!(
            "Threaded analysis requested, but the 'parallel' feature is not enabled; \
             falling back to sequential mode"
        );
    }

    let data = read_stringdata(&args.data)
        .with_context(|| format!("Failed to load string data from {}", args.data.display()))?;
    info!(
        "loaded {} strings with reading frame {}",
        data.labels().len(),
        data.reading_frame()
    );

    if args.list_strings {
        print!("{}", data.format_strings(&args.comparison)?);
        return Ok(());
    }

    let comparison = args.comparison.as_str();
    match args.analysis {
        AnalysisKind::CrosscorrelationMax => {
            emit(compare::cross_correlation_max(&data, comparison)?, &data, args)
        }
        AnalysisKind::SharedLengthNSubstringCount => {
            let n = require_n(args)?;
            emit(
                compare::shared_length_n_substring_count(&data, n, comparison)?,
                &data,
                args,
            )
        }
        AnalysisKind::LongestSharedSubstringLength => emit(
            compare::longest_shared_substring_length(&data, comparison)?,
            &data,
            args,
        ),
        AnalysisKind::LongestSharedSubstringDuration => emit(
            compare::longest_shared_substring_duration(&data, comparison)?,
            &data,
            args,
        ),
        AnalysisKind::NovelLengthNSubstringCount => {
            let n = require_n(args)?;
            emit(
                compare::novel_length_n_substring_count(&data, n, comparison)?,
                &data,
                args,
            )
        }
        AnalysisKind::CommonStartDuration => {
            emit(compare::common_start_duration(&data, comparison)?, &data, args)
        }
        AnalysisKind::CommonStartLength => {
            emit(compare::common_start_length(&data, comparison)?, &data, args)
        }
        AnalysisKind::IsSubstring => emit(compare::is_substring(&data, comparison)?, &data, args),
        AnalysisKind::IsSame => emit(compare::is_same(&data, comparison)?, &data, args),
        AnalysisKind::SameStart => {
            let n = require_n(args)?;
            emit(compare::same_start(&data, n, comparison)?, &data, args)
        }
        AnalysisKind::Levenshtein => emit(compare::levenshtein(&data, comparison)?, &data, args),
    }
}

fn require_n(args: &Args) -> Result<usize> {
    args.n
        .ok_or_else(|| anyhow!("--length is required for the {:?} analysis", args.analysis))
}

fn emit<T>(matrix: ComparisonMatrix<T>, data: &StringData, args: &Args) -> Result<()>
where
    T: std::fmt::Display + Serialize + Clone,
{
    let matrix = if args.transpose {
        matrix.transposed()
    } else {
        matrix
    };
    print!("{matrix}");

    if let Some(path) = &args.html {
        let html = html_table(&matrix, data, false);
        write_html(&html, path, true)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("HTML table written to {}", path.display());
    }
    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&matrix)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("JSON matrix written to {}", path.display());
    }
    Ok(())
}
