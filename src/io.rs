//! Text file surfaces: datasets, candidate files, and cluster reports.
//!
//! All readers are lenient: malformed lines are skipped (and logged at debug
//! level) rather than failing the whole file.
//!
//! ## Formats
//!
//! - **Dataset**: one record per line, comma-separated; every token but the
//!   last is a feature, the last is the label.
//! - **Candidate file**: `id \t density \t delta \t nearest`, one line per
//!   record in descending-density order, `nearest = -1` for the peak.
//! - **Report**: `tag \t id \t center label \t own label \t confidence`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cluster::{Candidate, CandidateList};
use crate::error::{Error, Result};
use crate::metrics::Evaluation;

/// Feature vectors with their ground-truth labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// One feature vector per record.
    pub features: Vec<Vec<f64>>,
    /// One label per record.
    pub labels: Vec<String>,
}

impl Dataset {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Parse a comma-separated dataset.
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut dataset = Dataset::default();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() < 2 {
            log::debug!("dataset line {}: too few fields, skipped", lineno + 1);
            continue;
        }

        let (label, raw) = match tokens.split_last() {
            Some(split) => split,
            None => continue,
        };
        let features: Option<Vec<f64>> = raw
            .iter()
            .map(|t| t.trim().parse::<f64>().ok().filter(|x| x.is_finite()))
            .collect();

        match features {
            Some(features) => {
                dataset.features.push(features);
                dataset.labels.push(label.trim().to_string());
            }
            None => log::debug!("dataset line {}: non-numeric feature, skipped", lineno + 1),
        }
    }

    log::info!("loaded {} records", dataset.len());
    Ok(dataset)
}

/// Load a comma-separated dataset from `path`.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    read_dataset(BufReader::new(File::open(path)?))
}

/// Write candidates, one tab-separated line each, in list order.
///
/// Deltas use the shortest representation that parses back to the same value.
pub fn write_candidates<W: Write>(mut writer: W, candidates: &CandidateList) -> Result<()> {
    for c in candidates {
        let nearest = c.nearest_higher.map_or(-1, |nh| nh as i64);
        writeln!(writer, "{}\t{}\t{}\t{}", c.id, c.density, c.delta, nearest)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write candidates to `path`.
pub fn dump_candidates(path: impl AsRef<Path>, candidates: &CandidateList) -> Result<()> {
    write_candidates(BufWriter::new(File::create(path)?), candidates)
}

/// Read a candidate file back into an ordered list.
///
/// # Errors
///
/// Fails on I/O errors, or if the surviving lines do not form a valid
/// descending-density list (see [`CandidateList::from_ordered`]).
pub fn read_candidates<R: BufRead>(reader: R) -> Result<CandidateList> {
    let mut items = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_candidate(line) {
            Some(c) => items.push(c),
            None => log::debug!("candidate line {}: malformed, skipped", lineno + 1),
        }
    }

    CandidateList::from_ordered(items)
}

/// Read a candidate file from `path`.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<CandidateList> {
    read_candidates(BufReader::new(File::open(path)?))
}

fn parse_candidate(line: &str) -> Option<Candidate> {
    let tokens: Vec<&str> = line.split('\t').collect();
    if tokens.len() < 4 {
        return None;
    }

    let id = tokens[0].trim().parse::<usize>().ok()?;
    let density = parse_density(tokens[1].trim())?;
    let delta = tokens[2]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)?;
    let nearest = tokens[3].trim().parse::<i64>().ok()?;
    let nearest_higher = if nearest < 0 {
        None
    } else {
        Some(usize::try_from(nearest).ok()?)
    };

    Some(Candidate {
        id,
        density,
        delta,
        nearest_higher,
    })
}

/// Integer density; `3.0000`-style values from older dumps are accepted.
fn parse_density(token: &str) -> Option<usize> {
    if let Ok(d) = token.parse::<usize>() {
        return Some(d);
    }
    let d = token.parse::<f64>().ok()?;
    (d.is_finite() && d >= 0.0 && d.fract() == 0.0).then_some(d as usize)
}

/// Write one report line per record.
///
/// `labels` holds the center id per record, `truth` the ground-truth labels, and
/// `confidence` the per-record score (`-` is written when it is `None`).
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `labels`, `truth`, or `confidence`
/// does not have one entry per evaluated record.
pub fn write_report<W: Write, L: AsRef<str>>(
    mut writer: W,
    evaluation: &Evaluation,
    labels: &[Option<usize>],
    truth: &[L],
    confidence: &[Option<f64>],
) -> Result<()> {
    let lens = [evaluation.outcomes.len(), labels.len(), truth.len(), confidence.len()];
    for found in lens {
        if found != evaluation.total {
            return Err(Error::DimensionMismatch {
                expected: evaluation.total,
                found,
            });
        }
    }

    for (id, outcome) in evaluation.outcomes.iter().enumerate() {
        let own = truth[id].as_ref();
        let center = labels[id]
            .and_then(|c| truth.get(c))
            .map_or(own, |l| l.as_ref());
        let score = match confidence[id] {
            Some(s) => format!("{:.4}", s),
            None => "-".to_string(),
        };
        writeln!(writer, "{}\t{}\t{}\t{}\t{}", outcome.tag(), id, center, own, score)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report to `path`.
pub fn dump_report<L: AsRef<str>>(
    path: impl AsRef<Path>,
    evaluation: &Evaluation,
    labels: &[Option<usize>],
    truth: &[L],
    confidence: &[Option<f64>],
) -> Result<()> {
    write_report(
        BufWriter::new(File::create(path)?),
        evaluation,
        labels,
        truth,
        confidence,
    )
}
