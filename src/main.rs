use clap::Parser;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use wavefront_align::io::{open_input, read_pairs, SeqPair};
use wavefront_align::{defaults, AdaptiveReduction, Aligner, Options, Penalties};

#[derive(Parser)]
#[command(name = "wavefront-align")]
#[command(about = "Gap-affine pairwise sequence alignment with the wavefront algorithm", long_about = None)]
#[command(version)]
struct Cli {
    /// Query sequence
    #[arg(value_name = "QUERY", conflicts_with = "input")]
    query: Option<String>,

    /// Target sequence
    #[arg(value_name = "TARGET", requires = "query", conflicts_with = "input")]
    target: Option<String>,

    /// File of '>query' / '<target' line pairs ('-' for stdin, '.gz' supported)
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Penalty for a mismatch
    #[arg(short = 'x', long, value_name = "INT", default_value_t = defaults::MISMATCH_PENALTY)]
    mismatch: u32,

    /// Penalty for opening a gap
    #[arg(short = 'o', long, value_name = "INT", default_value_t = defaults::GAP_OPEN_PENALTY)]
    gap_open: u32,

    /// Penalty for extending a gap
    #[arg(short = 'e', long, value_name = "INT", default_value_t = defaults::GAP_EXTEND_PENALTY)]
    gap_extend: u32,

    /// Disable the adaptive wavefront reduction heuristic (exact mode)
    #[arg(long)]
    no_adaptive: bool,

    /// Semi-global alignment: free leading/trailing gaps on either sequence
    #[arg(long)]
    semi_global: bool,

    /// Only print the score per pair, for benchmarking
    #[arg(short = 'N', long)]
    no_output: bool,

    /// Number of threads for file input (default: all available cores)
    #[arg(short = 't', long, value_name = "INT")]
    threads: Option<usize>,

    /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY)]
    verbosity: i32,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let penalties = Penalties {
        mismatch: cli.mismatch,
        gap_open: cli.gap_open,
        gap_ext: cli.gap_extend,
    };
    let options = Options {
        global_alignment: !cli.semi_global,
    };
    let adaptive = if cli.no_adaptive {
        None
    } else {
        Some(AdaptiveReduction::default())
    };

    let pairs = match gather_pairs(&cli) {
        Ok(pairs) => pairs,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    if pairs.is_empty() {
        log::error!("no sequence pairs to align");
        std::process::exit(1);
    }

    let num_threads = cli.threads.unwrap_or_else(num_cpus::get).max(1);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        log::warn!("failed to configure thread pool: {} (may already be initialized)", e);
    }
    log::info!(
        "aligning {} pair(s) with {} thread(s)",
        pairs.len(),
        num_threads
    );

    let make_aligner = || {
        let mut aligner = Aligner::new(penalties, options);
        if let Some(ad) = adaptive {
            // the default parameters always pass validation
            let _ = aligner.set_adaptive(ad);
        }
        aligner
    };

    use rayon::prelude::*;
    let reports: Result<Vec<String>, String> = pairs
        .par_iter()
        .map_init(make_aligner, |aligner, pair| {
            let result = aligner
                .align(&pair.query, &pair.target)
                .map_err(|e| e.to_string())?;
            Ok(format_report(&result, pair, cli.no_output))
        })
        .collect();

    match reports {
        Ok(reports) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for report in &reports {
                if let Err(e) = out.write_all(report.as_bytes()) {
                    log::error!("failed to write output: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Collect the pairs to align from the positionals or the input file.
fn gather_pairs(cli: &Cli) -> std::io::Result<Vec<SeqPair>> {
    if let Some(path) = &cli.input {
        let reader = open_input(path)?;
        return read_pairs(reader);
    }

    match (&cli.query, &cli.target) {
        (Some(query), Some(target)) => {
            let mut query = query.as_bytes().to_vec();
            let mut target = target.as_bytes().to_vec();
            query.make_ascii_uppercase();
            target.make_ascii_uppercase();
            Ok(vec![SeqPair { query, target }])
        }
        _ => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "expected QUERY and TARGET sequences, or --input FILE",
        )),
    }
}

/// Format one alignment the way it is printed to stdout.
fn format_report(
    result: &wavefront_align::AlignmentResult,
    pair: &SeqPair,
    score_only: bool,
) -> String {
    let mut out = String::new();
    if score_only {
        writeln!(out, "align-score: {}", result.score).unwrap();
        return out;
    }

    let (q_row, a_row, t_row) = result.alignment_text(&pair.query, &pair.target);
    writeln!(out, "CIGAR:  {}", result.cigar()).unwrap();
    writeln!(out, "query   {}", String::from_utf8_lossy(&q_row)).unwrap();
    writeln!(out, "        {}", String::from_utf8_lossy(&a_row)).unwrap();
    writeln!(out, "target  {}", String::from_utf8_lossy(&t_row)).unwrap();
    writeln!(out, "align-score:  {}", result.score).unwrap();
    writeln!(
        out,
        "align-region: q[{}, {}] vs t[{}, {}]",
        result.q_begin, result.q_end, result.t_begin, result.t_end
    )
    .unwrap();
    let match_pct = if result.align_len > 0 {
        result.matches as f64 / result.align_len as f64 * 100.0
    } else {
        0.0
    };
    writeln!(
        out,
        "align-length: {}, matches: {} ({:.2}%), gaps: {}, gap-regions: {}",
        result.align_len, result.matches, match_pct, result.gaps, result.gap_regions
    )
    .unwrap();
    writeln!(out).unwrap();
    out
}
