//! Punch statistics CLI.
//!
//! Summarizes fights, compares fighters and fights across metrics, and
//! generates sample fight files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Context, Result};
use log::{info, warn};
use rand::Rng;

use boxstats::analysis::{
    self, ComparisonReport, ComparisonScope, FightReport, FightSummary,
};
use boxstats::config::AnalysisConfig;
use boxstats::config_loader;
use boxstats::generate::{boxer_from_name, generate_seeded};
use boxstats::loader::{self, FightFormat};
use boxstats::registry::MetricRegistry;

#[derive(Parser, Debug)]
#[command(name = "boxstats")]
#[command(about = "Round-by-round punch statistics and fight comparisons")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the analysis configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for reports
    #[arg(short, long, default_value = "boxstats_output")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Number of parallel workers (0 = auto-detect)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize one fight: totals, round trend and predicted winner
    Fight {
        /// Fight file (.yaml, .yml or .json)
        file: PathBuf,

        /// Print the full JSON report instead of the short summary
        #[arg(long)]
        json: bool,
    },

    /// Rank fighters or fights across one or more metrics
    Compare {
        /// Fight files to compare
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Metric to rank by; repeat to break ties (defaults to the config)
        #[arg(short, long = "metric")]
        metrics: Vec<String>,

        /// Compare every boxer or every fight
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// List the metric catalog
    Metrics,

    /// Generate a sample fight file
    Generate {
        /// Red corner boxer name
        #[arg(long)]
        red: String,

        /// Blue corner boxer name
        #[arg(long)]
        blue: String,

        /// Number of rounds
        #[arg(long, default_value = "12")]
        rounds: u32,

        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Output fight file (.yaml, .yml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    Fighters,
    Fights,
}

impl From<ScopeArg> for ComparisonScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Fighters => ComparisonScope::Fighters,
            ScopeArg::Fights => ComparisonScope::Fights,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // The config may set the log level, so it is parsed before logging starts
    let config = config_loader::parse_config_or_default(cli.config.as_deref())?;

    // Initialize logging
    let level = log_level(&cli, &config);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&level)).init();
    config_loader::log_config(cli.config.as_deref(), &config);

    // Set thread pool size
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let registry = config.registry().context("Invalid metric catalog")?;

    match cli.command {
        Commands::Fight { file, json } => {
            run_fight(&config, &registry, &cli.output, &file, json)?;
        }
        Commands::Compare {
            files,
            metrics,
            scope,
        } => {
            run_compare(&config, &registry, &cli.output, &files, &metrics, scope)?;
        }
        Commands::Metrics => {
            println!("\n=== METRICS ===\n");
            for metric in registry.iter() {
                let direction = if metric.higher_is_better() {
                    "higher is better"
                } else {
                    "lower is better"
                };
                println!(
                    "  {:<24} {:<32} {:<18} {}",
                    metric.name,
                    metric.label,
                    metric.unit.to_string(),
                    direction
                );
            }
            println!();
        }
        Commands::Generate {
            red,
            blue,
            rounds,
            seed,
            output,
        } => {
            run_generate(&red, &blue, rounds, seed, &output)?;
        }
    }

    Ok(())
}

/// `--log-level`, then the config's `general.log_level`, then `info`
fn log_level(cli: &Cli, config: &AnalysisConfig) -> String {
    cli.log_level
        .clone()
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

fn run_fight(
    config: &AnalysisConfig,
    registry: &MetricRegistry,
    output_dir: &Path,
    file: &Path,
    json: bool,
) -> Result<()> {
    let fight = loader::load_fight(file)?;
    let summary = analysis::summarize_fight(&fight, &config.summary_settings())
        .with_context(|| format!("Failed to summarize fight '{}'", fight.id))?;

    let series = registry
        .resolve(config.compare.metrics.as_slice())?
        .into_iter()
        .flat_map(|metric| analysis::round_series(&summary, metric))
        .collect();

    let report = FightReport {
        metadata: analysis::report::create_metadata(1),
        prediction: analysis::predict_winner(&summary),
        summary,
        series,
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    let json_path = output_dir.join(format!("{}_report.json", fight.id));
    let text_path = output_dir.join(format!("{}_report.txt", fight.id));
    analysis::generate_json_report(&report, &json_path)?;
    analysis::generate_fight_text_report(&report, &text_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        analysis::report::print_fight_summary(&report);
    }

    Ok(())
}

fn run_compare(
    config: &AnalysisConfig,
    registry: &MetricRegistry,
    output_dir: &Path,
    files: &[PathBuf],
    metrics: &[String],
    scope: Option<ScopeArg>,
) -> Result<()> {
    let fights = loader::load_fights(files)?;

    let mut summaries: Vec<FightSummary> = Vec::with_capacity(fights.len());
    let mut skipped = Vec::new();
    let results = analysis::summarize_all(&fights, &config.summary_settings());
    for (fight, result) in fights.iter().zip(results) {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                warn!("Skipping fight '{}': {}", fight.id, e);
                skipped.push((fight.id.clone(), e.to_string()));
            }
        }
    }

    if summaries.is_empty() {
        return Err(eyre!("None of the {} fights could be summarized", fights.len()));
    }

    let names = if metrics.is_empty() {
        config.compare.metrics.as_slice()
    } else {
        metrics
    };
    let chain = registry.resolve(names)?;

    let mut engine = config.comparison_engine();
    if let Some(scope) = scope {
        engine = engine.with_scope(scope.into());
    }

    info!(
        "Comparing {} fights by {} ({:?} scope)",
        summaries.len(),
        names.join(" > "),
        engine.scope()
    );
    let result = engine.compare_by(&summaries, &chain)?;

    let report = ComparisonReport {
        metadata: analysis::report::create_metadata(fights.len()),
        result,
        skipped,
    };

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;
    analysis::generate_json_report(&report, &output_dir.join("comparison_report.json"))?;
    analysis::generate_comparison_text_report(
        &report,
        registry,
        &output_dir.join("comparison_report.txt"),
    )?;
    analysis::report::print_comparison(&report);

    info!("Comparison complete. Reports written to {}", output_dir.display());
    Ok(())
}

fn run_generate(
    red: &str,
    blue: &str,
    rounds: u32,
    seed: Option<u64>,
    output: &Path,
) -> Result<()> {
    if rounds == 0 {
        return Err(eyre!("--rounds must be at least 1"));
    }

    let format = FightFormat::from_path(output)?;
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Generating {} rounds with seed {}", rounds, seed);

    let fight = generate_seeded(seed, boxer_from_name(red), boxer_from_name(blue), rounds);

    let content = match format {
        FightFormat::Yaml => {
            serde_yaml::to_string(&fight).context("Failed to serialize fight to YAML")?
        }
        FightFormat::Json => {
            serde_json::to_string_pretty(&fight).context("Failed to serialize fight to JSON")?
        }
    };
    fs::write(output, content)
        .with_context(|| format!("Failed to write fight file '{}'", output.display()))?;

    info!("Sample fight written to {}", output.display());
    Ok(())
}
