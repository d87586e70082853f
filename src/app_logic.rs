//! A module for the main application logic of the rainflow counting tool
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};

use crate::config::load_config;
use crate::error::RainflowError;
use crate::histogram::RangeHistogram;
use crate::output::CycleReport;
use crate::quantize::quantize;
use crate::rainflow::{count_cycles, extract_peaks, Sample};

/// Loads the configuration at `config_path`, counts the cycles of the configured signal
/// and writes the report. `output_path` overrides the configured output file.
pub fn run(config_path: &str, output_path: Option<&str>) -> anyhow::Result<()> {
    info!(config = config_path, "running");
    let conf = load_config(config_path)
        .with_context(|| format!("failed to load configuration {}", config_path))?;
    conf.validate().context("invalid configuration")?;

    let signal = conf
        .signal
        .read_signal()
        .with_context(|| format!("failed to read signal {}", conf.signal.path))?;
    let bins = conf.histogram.as_ref().map(|h| h.bins);
    let target = output_path
        .map(str::to_owned)
        .or_else(|| conf.output.path.clone());

    match &conf.quantize {
        Some(q) => {
            let samples = quantize(&signal, q.scale)?;
            let report = build_report(&samples, bins)?;
            write_report(&report, &conf.output.format, target.as_deref())
        }
        None => {
            let report = build_report(&signal, bins)?;
            write_report(&report, &conf.output.format, target.as_deref())
        }
    }
}

/// Extracts peaks, counts cycles and, when `bins` is set, bins them by range.
pub fn build_report<T: Sample>(
    signal: &[T],
    bins: Option<usize>,
) -> Result<CycleReport<T::Wide>, RainflowError> {
    let peaks = extract_peaks(signal);
    if peaks.is_empty() {
        warn!(samples = signal.len(), "signal has no peaks, reporting zero cycles");
    }
    let cycles = count_cycles(&peaks);
    let histogram = bins
        .map(|bins| RangeHistogram::from_cycles(&cycles, bins))
        .transpose()?;
    info!(
        samples = signal.len(),
        peaks = peaks.len(),
        cycles = cycles.len(),
        "rainflow counting done"
    );
    Ok(CycleReport {
        peaks: peaks.len(),
        cycles,
        histogram,
    })
}

fn write_report<T: Serialize>(
    report: &CycleReport<T>,
    format: &str,
    path: Option<&str>,
) -> anyhow::Result<()> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            info!(path, format, "writing report");
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    match format {
        "CSV" => report.write_csv(writer),
        _ => report.write_json(writer),
    }
}
