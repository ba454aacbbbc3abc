//! Command-line driver for prover flag sweeps.

mod config;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lantern_domain::{parse_flag_space, FlagSpace};
use lantern_prover::{
    detect_prover, discover_lemmas, DetectionError, LemmaError, ProverConfig, ProverOracle,
};
use lantern_report::{
    render_decided_table, render_table, rows_for_model, write_model_csv, ReportError,
    ReportRow,
};
use lantern_search::{run_search, PropagationPolicy, SearchError, SearchReport};

use config::{ModelPlan, SweepFile};

/// How to report assignments resolved by propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PropagatedMode {
    /// Keep a marked row for every propagated assignment.
    Record,
    /// Report queried assignments only.
    Omit,
}

impl From<PropagatedMode> for PropagationPolicy {
    fn from(mode: PropagatedMode) -> Self {
        match mode {
            PropagatedMode::Record => PropagationPolicy::Record,
            PropagatedMode::Omit => PropagationPolicy::Omit,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "lantern",
    about = "Sweep prover preprocessor flags, pruning queries through declared flag orderings"
)]
struct Cli {
    /// Theory file to analyze.
    #[arg(value_name = "MODEL", required_unless_present = "file", conflicts_with = "file")]
    model: Option<PathBuf>,

    /// Sweep configuration file describing several models.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Prover executable name or path.
    #[arg(short = 'n', long, default_value = "tamarin-prover")]
    name: PathBuf,

    /// Timeout in seconds per prover execution.
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Runtime heap cap in GiB.
    #[arg(short, long)]
    ram: Option<u64>,

    /// Runtime worker threads.
    #[arg(short, long)]
    cores: Option<u32>,

    /// Comma-separated lemmas to prove; discovered from the model when
    /// omitted.
    #[arg(short, long)]
    lemmas: Option<String>,

    /// Comma-separated flags activated on every invocation.
    #[arg(long)]
    fixed_flags: Option<String>,

    /// Flag space description file (dimensions, orders, priority).
    #[arg(long)]
    flags: Option<PathBuf>,

    /// Extra prover arguments, passed through verbatim.
    #[arg(long, value_name = "ARG", num_args = 1.., allow_hyphen_values = true)]
    passthrough: Vec<String>,

    /// How to report assignments resolved by propagation.
    #[arg(long, value_enum, default_value = "record")]
    propagated: PropagatedMode,

    /// Directory for CSV results.
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid sweep file '{path}': {source}")]
    Sweep {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid flag space '{path}': {source}")]
    FlagSpace {
        path: String,
        #[source]
        source: lantern_domain::ParseError,
    },

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Lemmas(#[from] LemmaError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn read_file(path: &std::path::Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn comma_list(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

fn plan_from_args(cli: &Cli) -> ModelPlan {
    let base = ProverConfig::default();
    ModelPlan {
        path: cli.model.clone().unwrap_or_default(),
        lemmas: comma_list(&cli.lemmas),
        prover: ProverConfig {
            executable: cli.name.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
            cores: cli.cores.unwrap_or(base.cores),
            ram_gib: cli.ram,
            fixed_flags: comma_list(&cli.fixed_flags).unwrap_or_default(),
            passthrough: cli.passthrough.clone(),
        },
        flag_space: cli.flags.clone(),
    }
}

fn load_plans(cli: &Cli) -> Result<Vec<ModelPlan>, CliError> {
    match &cli.file {
        Some(path) => {
            let sweep = SweepFile::parse(&read_file(path)?).map_err(|source| {
                CliError::Sweep {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            Ok(sweep.resolve())
        }
        None => Ok(vec![plan_from_args(cli)]),
    }
}

fn load_flag_space(plan: &ModelPlan) -> Result<FlagSpace, CliError> {
    match &plan.flag_space {
        Some(path) => parse_flag_space(&read_file(path)?).map_err(|source| {
            CliError::FlagSpace {
                path: path.display().to_string(),
                source,
            }
        }),
        // No flag space: a single unflagged query per lemma, expressed as
        // the zero-dimensional space whose universe is one empty assignment.
        None => Ok(FlagSpace::empty()),
    }
}

fn sweep_model(plan: &ModelPlan, policy: PropagationPolicy) -> Result<Vec<ReportRow>, CliError> {
    detect_prover(&plan.prover)?;
    let lemmas = match &plan.lemmas {
        Some(lemmas) => lemmas.clone(),
        None => discover_lemmas(&plan.prover, &plan.path)?,
    };
    let space = load_flag_space(plan)?;

    let mut reports: Vec<SearchReport> = Vec::new();
    for lemma in &lemmas {
        let mut oracle =
            ProverOracle::new(plan.prover.clone(), plan.path.clone(), lemma.as_str());
        let report = run_search(&space, &mut oracle, lemma, policy)?;
        info!(
            model = %plan.path.display(),
            lemma = %lemma,
            queries = report.queries,
            universe = report.universe_size,
            "lemma swept"
        );
        reports.push(report);
    }
    Ok(rows_for_model(&plan.path.display().to_string(), &reports))
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let plans = load_plans(cli)?;
    let policy = PropagationPolicy::from(cli.propagated);

    let mut all_rows: Vec<ReportRow> = Vec::new();
    for plan in &plans {
        let rows = sweep_model(plan, policy)?;

        println!("{}", render_decided_table(&rows));
        let model_name = plan.path.display().to_string();
        let csv_path = write_model_csv(&cli.results_dir, &model_name, &rows)?;
        info!(path = %csv_path.display(), "results written");

        all_rows.extend(rows);
    }

    if plans.len() > 1 {
        println!("{}", render_table(&all_rows));
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
