use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glob::glob;

use landcover_ca_core::accuracy::AccuracyEvaluator;
use landcover_ca_core::config::SimulationConfig;
use landcover_ca_core::growth::{ConsoleProgress, GrowthEngine};
use landcover_ca_core::model::GrowthFactorSet;
use landcover_ca_core::raster;
use landcover_ca_core::transition::TransitionMatrix;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Land cover raster at the start of the period (.npy)
    #[arg(long)]
    start: PathBuf,

    /// Land cover raster at the end of the period (.npy)
    #[arg(long)]
    end: PathBuf,

    /// Glob pattern for growth factor rasters, registered in sorted path order
    #[arg(long)]
    factors: String,

    /// JSON run configuration
    #[arg(short, long)]
    config: PathBuf,

    /// Output path for the predicted land cover (.npy)
    #[arg(short, long)]
    output: PathBuf,
}

fn load_factors(pattern: &str) -> Result<GrowthFactorSet> {
    let mut paths: Vec<PathBuf> = glob(pattern)
        .context("invalid growth factor glob pattern")?
        .collect::<std::result::Result<_, _>>()?;
    paths.sort();
    if paths.is_empty() {
        bail!("no growth factor rasters match {}", pattern);
    }

    let mut factors = GrowthFactorSet::new();
    for path in paths {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("Registering growth factor {} from {}", name, path.display());
        factors = factors.with_factor(name, raster::read_factor_grid(&path)?);
    }
    Ok(factors)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = SimulationConfig::from_file(&args.config)?;

    let source = raster::read_snapshot(&args.start)?;
    let target = raster::read_snapshot(&args.end)?;
    let factors = load_factors(&args.factors)?;

    let transitions = TransitionMatrix::between(&source, &target)?;
    println!(
        "Transition matrix over {} classes:\n{:?}",
        transitions.n_classes(),
        transitions.normalized
    );
    for class in &transitions.undefined_rows {
        println!(
            "Class {} does not occur at the start, its row is undefined",
            class
        );
    }

    let engine = GrowthEngine::new(
        config.builtup_class,
        config.builtup_neighbor_threshold,
        config.rules()?,
    )
    .with_kernel_size(config.kernel_size);
    let predicted = engine.predict_with_progress(&source, &factors, &ConsoleProgress::default())?;

    let report = AccuracyEvaluator::new(config.builtup_class, config.cell_size)
        .evaluate(&source, &target, &predicted)?;
    println!(
        "Actual growth: {:.4} km2, Predicted growth: {:.4} km2",
        report.actual_growth_km2, report.predicted_growth_km2
    );
    println!("Spatial accuracy: {:.3}%", report.spatial_accuracy);

    raster::write_predicted(&args.output, &predicted, source.georef())?;
    println!("Predicted land cover written to {}", args.output.display());
    Ok(())
}
