use clap::Parser;
use copter::simulation::params::Params;
use copter::simulation::stats;
use copter::simulation::trainer::{Trainer, run_baseline};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "train")]
#[command(about = "Headless neuroevolution of cave-flying copters")]
struct Cli {
    /// Number of generations to train
    #[arg(long, default_value_t = 50)]
    generations: u32,
    /// Seed for the cave, weight initialization and genetic operators
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// JSON parameter file, defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the population size from the parameters
    #[arg(long)]
    population: Option<usize>,
    /// Writes the per-generation fitness history as JSON
    #[arg(long)]
    report: Option<PathBuf>,
    /// Flies this many random pilots once instead of training
    #[arg(long)]
    baseline: Option<usize>,
    /// Writes the effective parameters as JSON
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => Params::load_from_file(&path.to_string_lossy())?,
        None => Params::default(),
    };
    if let Some(size) = cli.population {
        params.genetic.population_size = size;
    }
    params.validate()?;

    if let Some(path) = &cli.save_config {
        params.save_to_file(&path.to_string_lossy())?;
        info!(path = %path.display(), "saved parameters");
    }

    if let Some(count) = cli.baseline {
        let distances = run_baseline(&params, count, cli.seed)?;
        info!(
            pilots = count,
            best = stats::max(&distances)?,
            average = stats::mean(&distances)?,
            std_dev = stats::std_dev(&distances)?,
            "random baseline finished"
        );
        return Ok(());
    }

    let mut trainer = Trainer::new(params, cli.seed)?;
    info!(
        seed = cli.seed,
        layers = ?trainer.layer_sizes(),
        population = trainer.population().len(),
        "training started"
    );
    trainer.run(cli.generations)?;

    if let Some(best) = trainer.history().all_time_best() {
        info!(best, generations = cli.generations, "training finished");
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(trainer.history())?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "wrote fitness report");
    }

    Ok(())
}
