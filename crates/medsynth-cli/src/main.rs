mod config;
mod registry;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigOverrides, load_config, write_default_config};
use medsynth_generate::{
    DEFAULT_ARCHIVE_NAME, DirectorySink, ExportSummary, GenerationEngine, GenerationError,
    TarGzSink, export_dataset,
};
use registry::{RunContext, init_run_logging, start_run, write_report};

const DEFAULT_OUTPUT_DIR: &str = "medical_data";

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Parser, Debug)]
#[command(name = "medsynth", version, about = "Synthetic hospital dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every table and write the archive.
    Generate(GenerateArgs),
    /// Write the default configuration as TOML.
    InitConfig(InitConfigArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One gzip-compressed tar archive.
    Tar,
    /// Plain CSV files in a directory.
    Dir,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::Dir => "dir",
        }
    }

    fn default_out(self) -> PathBuf {
        match self {
            Self::Tar => PathBuf::from(DEFAULT_ARCHIVE_NAME),
            Self::Dir => PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output archive path (or directory with `--format dir`).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Tar)]
    format: OutputFormat,
    /// Directory holding per-run logs, config and report.
    #[arg(long, default_value = "runs")]
    runs_dir: PathBuf,
    #[arg(long)]
    patients: Option<u32>,
    #[arg(long)]
    doctors: Option<u32>,
    /// Target allergy count before per-bucket rounding.
    #[arg(long)]
    allergies: Option<u32>,
    #[arg(long)]
    meds: Option<u32>,
    /// Inclusive window start (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Exclusive window end (YYYY-MM-DD).
    #[arg(long)]
    end_date: Option<NaiveDate>,
    #[arg(long)]
    seed: Option<u64>,
    /// Date treated as today for ages and policy ranges (YYYY-MM-DD).
    #[arg(long)]
    reference_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    #[arg(default_value = "medsynth.toml")]
    path: PathBuf,
    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        config,
        out,
        format,
        runs_dir,
        patients,
        doctors,
        allergies,
        meds,
        start_date,
        end_date,
        seed,
        reference_date,
    } = args;

    let mut generation = load_config(config.as_deref())?;
    ConfigOverrides {
        num_patients: patients,
        num_doctors: doctors,
        num_allergies: allergies,
        num_meds: meds,
        start_date,
        end_date,
        seed,
        reference_date,
    }
    .apply(&mut generation);
    let generation = generation.resolved();
    generation.validate()?;

    let out = out.unwrap_or_else(|| format.default_out());
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        runs_dir,
        out: out.clone(),
        format: format.as_str().to_string(),
        config: generation.clone(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        run_dir = %run_paths.run_root.display()
    );

    let mut result = GenerationEngine::new(generation)
        .with_run_id(run_id.clone())
        .run()?;

    let summary = export(&result.dataset, format, &out)?;
    result.report.bytes_written = summary.bytes_written;
    write_report(&run_paths, &result.report)?;

    for table in &summary.tables {
        println!("Generated {} records in {}", table.rows, table.file_name);
    }
    println!(
        "Dataset generation complete: {} (seed {})",
        summary.artifact.display(),
        result.report.seed
    );

    tracing::info!(
        event = "run_finished",
        status = "success",
        run_id = %run_id,
        duration_ms = result.report.duration_ms
    );

    Ok(())
}

fn export(
    dataset: &medsynth_core::Dataset,
    format: OutputFormat,
    out: &Path,
) -> Result<ExportSummary, GenerationError> {
    match format {
        OutputFormat::Tar => export_dataset(dataset, TarGzSink::new(out)),
        OutputFormat::Dir => export_dataset(dataset, DirectorySink::new(out)),
    }
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    write_default_config(&args.path, args.force)?;
    println!("Wrote default configuration to {}", args.path.display());
    Ok(())
}
