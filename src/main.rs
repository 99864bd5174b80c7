//! ingredient-groups: find ingredients that belong together.
//!
//! Mine a one-hot recipe CSV for over-represented ingredient groups, save
//! them, and search the saved groups interactively.

use clap::{Parser, Subcommand};
use ingredient_groups::config::MiningConfig;
use ingredient_groups::data::{write_column_index, RecipeLoader};
use ingredient_groups::error::{GroupsError, Result};
use ingredient_groups::mining::MiningResult;
use ingredient_groups::query::{run_search_loop, GroupIndex};
use ingredient_groups::store::IngredientGroups;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ingredient-groups")]
#[command(about = "Find groups of ingredients that appear together more than chance")]
#[command(version)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine a one-hot recipe CSV and save the groups
    Mine {
        /// Recipe CSV file
        #[arg(short, long)]
        data: PathBuf,

        /// Output groups file
        #[arg(short, long, default_value = "ingredient_groups.igrp")]
        output: PathBuf,

        /// TOML config with thresholds and exclusions
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File of column names to exclude, one per line
        #[arg(short = 'x', long)]
        exclude_file: Option<PathBuf>,

        /// Minimum record count (overrides config)
        #[arg(long)]
        min_support: Option<usize>,

        /// Minimum co-occurrence ratio (overrides config)
        #[arg(long)]
        min_score: Option<f64>,

        /// Largest group size (overrides config)
        #[arg(long)]
        max_size: Option<usize>,
    },

    /// Search saved groups for an ingredient
    Search {
        /// Groups file written by `mine`
        #[arg(short, long, default_value = "ingredient_groups.igrp")]
        groups: PathBuf,

        /// Answer one query and exit instead of prompting
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List the one-hot columns of a CSV with their indices
    Columns {
        /// Recipe CSV file
        #[arg(short, long)]
        data: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Mine {
            data,
            output,
            config,
            exclude_file,
            min_support,
            min_score,
            max_size,
        } => {
            let overrides = Overrides {
                exclude_file,
                min_support,
                min_score,
                max_size,
            };
            run_mine(&data, &output, config.as_deref(), overrides)
        }
        Commands::Search { groups, query } => run_search(&groups, query.as_deref()),
        Commands::Columns { data, output } => run_columns(&data, output.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            exit_code(&e)
        }
    }
}

/// Exit code per error class.
fn exit_code(err: &GroupsError) -> ExitCode {
    match err {
        GroupsError::Io(_) => ExitCode::from(7),
        GroupsError::Csv { .. }
        | GroupsError::NonBinaryColumn { .. }
        | GroupsError::DuplicateColumn(_)
        | GroupsError::DimensionMismatch { .. }
        | GroupsError::EmptyInput(_) => ExitCode::from(3),
        GroupsError::Format { .. }
        | GroupsError::UnsupportedVersion { .. }
        | GroupsError::ChecksumMismatch { .. }
        | GroupsError::Serialization(_) => ExitCode::from(4),
        GroupsError::Config(_) | GroupsError::InvalidHyperparameter { .. } => ExitCode::from(2),
        GroupsError::NumericDomain { .. } | GroupsError::InvalidItemSet { .. } => {
            ExitCode::from(1)
        }
    }
}

/// Command-line values that win over the config file.
struct Overrides {
    exclude_file: Option<PathBuf>,
    min_support: Option<usize>,
    min_score: Option<f64>,
    max_size: Option<usize>,
}

impl Overrides {
    fn apply(self, config: &mut MiningConfig) {
        if let Some(v) = self.min_support {
            config.min_support = v;
        }
        if let Some(v) = self.min_score {
            config.min_score = v;
        }
        if let Some(v) = self.max_size {
            config.max_size = v;
        }
        if self.exclude_file.is_some() {
            config.exclude_file = self.exclude_file;
        }
    }
}

fn run_mine(
    data_path: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overrides: Overrides,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => MiningConfig::from_file(path)?,
        None => MiningConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    let exclusions = config.exclusions()?;
    let data = RecipeLoader::new()
        .with_exclusions(exclusions)
        .load(data_path)?;

    let result = config.miner().fit(&data)?;
    print_summary(&result);

    let groups = IngredientGroups::from_result(&result, &data)?;
    groups.save(output)?;
    println!("Saved {} groups to {}", groups.len(), output.display());
    Ok(())
}

fn print_summary(result: &MiningResult) {
    println!("|F_1| = {}", result.singletons().len());
    for level in result.levels() {
        println!(
            "|F_{}| = {} ({} candidates)",
            level.level, level.frequent, level.candidates
        );
    }
}

fn run_search(groups_path: &Path, query: Option<&str>) -> Result<()> {
    let groups = IngredientGroups::load(groups_path)?;
    let index = GroupIndex::new(&groups);

    match query {
        Some(term) => println!("{}", index.lookup(term)),
        None => {
            let stdin = io::stdin();
            run_search_loop(&index, stdin.lock(), io::stdout().lock())?;
        }
    }
    Ok(())
}

fn run_columns(data_path: &Path, output: Option<&Path>) -> Result<()> {
    let data = RecipeLoader::new().load(data_path)?;
    match output {
        Some(path) => write_column_index(&data, BufWriter::new(File::create(path)?)),
        None => write_column_index(&data, io::stdout().lock()),
    }
}
