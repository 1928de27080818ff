//! heredity CLI: posterior gene and trait probabilities for a pedigree.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use hd_common::{OutputFormat, Result};
use hd_config::{resolve_config, ConfigPaths};
use hd_core::inference::{infer, EngineConfig, DEFAULT_MAX_PEOPLE};
use hd_core::logging::init_logging;
use hd_core::output::render;
use hd_core::{load_csv, ExitCode};
use tracing::{error, info, warn};

/// Exact inference of gene-copy and trait posteriors over a family tree.
#[derive(Parser, Debug)]
#[command(name = "heredity", version, about)]
struct Cli {
    /// Pedigree CSV with columns name,mother,father,trait
    data: PathBuf,

    /// Probability model JSON (falls back to HEREDITY_MODEL, then the XDG config dir)
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Score trait hypotheses on all cores
    #[arg(long)]
    parallel: bool,

    /// Stop enumerating after this many milliseconds and report partial posteriors
    #[arg(long, value_name = "MS")]
    deadline_ms: Option<u64>,

    /// Refuse pedigrees larger than this
    #[arg(long, env = "HEREDITY_MAX_PEOPLE", default_value_t = DEFAULT_MAX_PEOPLE)]
    max_people: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let resolved = resolve_config(&ConfigPaths::from_environment(cli.model.clone()))?;
    info!(source = %resolved.source, "probability model loaded");

    let pedigree = load_csv(&cli.data)?;

    let config = EngineConfig {
        max_people: cli.max_people,
        parallel: cli.parallel,
        deadline: cli.deadline_ms.map(Duration::from_millis),
    };
    let outcome = infer(&pedigree, &resolved.model, &config)?;

    let source = resolved.source.to_string();
    let rendered = render(&outcome, cli.format, Some(&source))?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if outcome.stats.complete {
        Ok(ExitCode::Clean)
    } else {
        warn!(
            scored = outcome.stats.hypotheses_scored,
            expected = outcome.stats.hypotheses_expected,
            "results are incomplete"
        );
        Ok(ExitCode::Incomplete)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!(code = e.code(), error = %e, "heredity failed");
            eprintln!("heredity: {e}");
            ExitCode::from_error(&e)
        }
    };
    std::process::exit(code.as_i32());
}
