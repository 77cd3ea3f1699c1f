//! `crest`: run density-peak clustering on a labeled CSV dataset.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use crest::cluster::{assign, ClusterAssignment, Thresholds};
use crest::io;
use crest::{evaluate, DensityPeaks, DistanceModel};

#[derive(Parser)]
#[command(version, about = "Density-peak clustering with precision/recall against labels")]
struct Opts {
    /// Comma-separated dataset; the last column is the label.
    data: PathBuf,

    /// Use plain Euclidean distance instead of the Gaussian kernel.
    #[arg(long)]
    euclidean: bool,

    /// Fixed cutoff radius; searched automatically when omitted.
    #[arg(long)]
    dc: Option<f64>,

    /// Minimum density for a center.
    #[arg(long, default_value_t = 1)]
    min_density: usize,

    /// Minimum delta for a center.
    #[arg(long, default_value_t = 0.38)]
    min_delta: f64,

    /// Write the ordered candidate list here (for threshold tuning).
    #[arg(long)]
    candidates_out: Option<PathBuf>,

    /// Assign from a previously dumped candidate list instead of recomputing.
    #[arg(long, conflicts_with_all = ["candidates_out", "dc", "euclidean"])]
    candidates_in: Option<PathBuf>,

    /// Write the per-record cluster report here.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opts = Opts::parse();

    let dataset = io::load_dataset(&opts.data)
        .with_context(|| format!("reading dataset {}", opts.data.display()))?;
    if dataset.len() < 2 {
        bail!("dataset {} has fewer than 2 usable records", opts.data.display());
    }

    let thresholds = Thresholds::new(opts.min_density, opts.min_delta);

    let (assignment, confidence): (ClusterAssignment, Vec<Option<f64>>) =
        if let Some(path) = &opts.candidates_in {
            let candidates = io::load_candidates(path)
                .with_context(|| format!("reading candidates {}", path.display()))?;
            if candidates.len() != dataset.len() {
                bail!(
                    "candidate file has {} records, dataset has {}",
                    candidates.len(),
                    dataset.len()
                );
            }
            let assignment = assign(&candidates, &thresholds)?;
            let confidence = vec![None; dataset.len()];
            (assignment, confidence)
        } else {
            let model = if opts.euclidean {
                DistanceModel::Euclidean
            } else {
                DistanceModel::Gaussian
            };
            let mut peaks = DensityPeaks::new()
                .with_model(model)
                .with_thresholds(thresholds);
            if let Some(dc) = opts.dc {
                peaks = peaks.with_cutoff(dc);
            }

            let fit = peaks.fit(&dataset.features)?;
            println!(
                "Max distance: {:.4} Min distance: {:.4} DC: {:.4}",
                fit.max_distance, fit.min_distance, fit.cutoff.dc
            );
            if !fit.cutoff.in_band {
                println!(
                    "warning: neighbor fraction {:.4} is outside the target band",
                    fit.cutoff.mean
                );
            }

            if let Some(path) = &opts.candidates_out {
                io::dump_candidates(path, &fit.candidates)
                    .with_context(|| format!("writing candidates {}", path.display()))?;
            }
            (fit.assignment, fit.confidence)
        };

    println!("CENTER: {:?}", assignment.centers);

    let evaluation = evaluate(&assignment.labels, &dataset.labels)?;

    if let Some(path) = &opts.report {
        io::dump_report(
            path,
            &evaluation,
            &assignment.labels,
            &dataset.labels,
            &confidence,
        )
        .with_context(|| format!("writing report {}", path.display()))?;
    }

    let ratio = |r: Option<f64>| r.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v));
    println!("allcount: {}", evaluation.total);
    println!("correct: {}", evaluation.correct);
    println!("precision: {}", ratio(evaluation.precision()));
    println!("recall: {}", ratio(evaluation.recall()));

    Ok(())
}
