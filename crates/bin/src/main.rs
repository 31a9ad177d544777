//! Storecast CLI binary.
//!
//! Runs the ingestion and transformation stages from the command line.

use clap::{ArgAction, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use storecast::data::schema::files::{TEST_MERGED, TRAIN_MERGED};
use storecast::features::{FeatureGroup, available_features, features_by_group};
use storecast::output::ExportFormat;
use storecast::{
    PipelineConfig, TransformationOutput, export_arrays, run_ingestion, run_pipeline,
    run_transformation,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storecast")]
#[command(
    about = "Storecast: weekly retail sales ingestion and preprocessing",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IngestArgs {
    /// Directory holding features.csv, train.csv, stores.csv and test.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the merged tables
    #[arg(long)]
    artifact_dir: Option<PathBuf>,
}

#[derive(Args)]
struct TransformArgs {
    /// Where the fitted scaler is written
    #[arg(long)]
    scaler_path: Option<PathBuf>,

    /// Also write train_array and test_array next to the scaler
    #[arg(long)]
    export_arrays: bool,

    /// Format of the exported arrays (csv, json or pretty-json)
    #[arg(long, default_value = "csv")]
    array_format: ExportFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the raw tables into train_merged.csv and test_merged.csv
    Ingest(IngestArgs),

    /// Derive features, impute, scale and persist the scaler
    Transform {
        /// Directory holding the merged tables
        #[arg(long)]
        artifact_dir: Option<PathBuf>,

        /// Merged training table (defaults to <artifact-dir>/train_merged.csv)
        #[arg(long)]
        train: Option<PathBuf>,

        /// Merged test table (defaults to <artifact-dir>/test_merged.csv)
        #[arg(long)]
        test: Option<PathBuf>,

        #[command(flatten)]
        args: TransformArgs,
    },

    /// Run ingestion then transformation
    Run {
        #[command(flatten)]
        ingest: IngestArgs,

        #[command(flatten)]
        transform: TransformArgs,
    },

    /// List the engineered features
    Features {
        /// Only list one group (calendar, holiday, promotion, encoding)
        #[arg(long)]
        group: Option<String>,

        /// Output format (json or text)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Ingest(args) => {
            apply_ingest_args(&mut config, args);
            ingest(&config)?;
        }
        Commands::Transform {
            artifact_dir,
            train,
            test,
            args,
        } => {
            if let Some(dir) = artifact_dir {
                config.ingestion.artifact_dir = dir;
            }
            let export = apply_transform_args(&mut config, args);
            let artifact_dir = &config.ingestion.artifact_dir;
            let train = train.unwrap_or_else(|| artifact_dir.join(TRAIN_MERGED));
            let test = test.unwrap_or_else(|| artifact_dir.join(TEST_MERGED));
            transform(&config, &train, &test, export)?;
        }
        Commands::Run { ingest, transform } => {
            apply_ingest_args(&mut config, ingest);
            let export = apply_transform_args(&mut config, transform);
            run_all(&config, export)?;
        }
        Commands::Features { group, format } => {
            list_features(group.as_deref(), &format)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_ingest_args(config: &mut PipelineConfig, args: IngestArgs) {
    if let Some(dir) = args.data_dir {
        config.ingestion.raw_data_dir = dir;
    }
    if let Some(dir) = args.artifact_dir {
        config.ingestion.artifact_dir = dir;
    }
}

fn apply_transform_args(config: &mut PipelineConfig, args: TransformArgs) -> Option<ExportFormat> {
    if let Some(path) = args.scaler_path {
        config.transformation.scaler_path = path;
    }
    args.export_arrays.then_some(args.array_format)
}

fn spinner(message: &'static str) -> Result<ProgressBar, Box<dyn Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    Ok(pb)
}

fn ingest(config: &PipelineConfig) -> Result<(), Box<dyn Error>> {
    let pb = spinner("Merging raw tables...")?;
    let merged = match run_ingestion(&config.ingestion) {
        Ok(merged) => {
            pb.finish_with_message("Ingestion complete");
            merged
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    println!("Train: {}", merged.train.display());
    println!("Test:  {}", merged.test.display());
    Ok(())
}

fn transform(
    config: &PipelineConfig,
    train: &Path,
    test: &Path,
    export: Option<ExportFormat>,
) -> Result<(), Box<dyn Error>> {
    let pb = spinner("Deriving features and fitting scaler...")?;
    let output = match run_transformation(train, test, &config.transformation) {
        Ok(output) => {
            pb.finish_with_message("Transformation complete");
            output
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    print_summary(&output, export)
}

fn run_all(config: &PipelineConfig, export: Option<ExportFormat>) -> Result<(), Box<dyn Error>> {
    let pb = spinner("Running pipeline...")?;
    let output = match run_pipeline(config) {
        Ok(output) => {
            pb.finish_with_message("Pipeline complete");
            output
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    println!("Train: {}", output.merged.train.display());
    println!("Test:  {}", output.merged.test.display());
    print_summary(&output.transformed, export)
}

fn print_summary(
    output: &TransformationOutput,
    export: Option<ExportFormat>,
) -> Result<(), Box<dyn Error>> {
    println!("\nTraining rows:  {}", output.train.nrows());
    println!("Test rows:      {}", output.test.nrows());
    println!("Features:       {}", output.feature_names.len());
    println!("Scaler:         {}", output.scaler_path.display());

    if let Some(format) = export {
        let dir = output
            .scaler_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let paths = export_arrays(output, &dir, format)?;
        println!("Train array:    {}", paths.train.display());
        println!("Test array:     {}", paths.test.display());
    }

    Ok(())
}

fn parse_group(name: &str) -> Result<FeatureGroup, Box<dyn Error>> {
    match name.to_lowercase().as_str() {
        "calendar" => Ok(FeatureGroup::Calendar),
        "holiday" => Ok(FeatureGroup::Holiday),
        "promotion" => Ok(FeatureGroup::Promotion),
        "encoding" => Ok(FeatureGroup::Encoding),
        other => Err(format!("Unknown feature group: {}", other).into()),
    }
}

fn list_features(group: Option<&str>, format: &str) -> Result<(), Box<dyn Error>> {
    let features = match group {
        Some(name) => features_by_group(parse_group(name)?),
        None => available_features(),
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&features)?),
        "text" => {
            println!("{:<22} {:<10} {}", "Feature", "Group", "Description");
            println!("{}", "─".repeat(72));
            for feature in &features {
                println!(
                    "{:<22} {:<10} {}",
                    feature.name,
                    format!("{:?}", feature.group).to_lowercase(),
                    feature.description
                );
            }
        }
        other => return Err(format!("Unknown format: {} (use json or text)", other).into()),
    }

    Ok(())
}
