use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::config::{Config, Sample};
use crate::iop::{QaaResult, compute};
use crate::sat_bands::{SatBandError, SatBands};

pub mod statistics;
pub use statistics::ChlaStatistics;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("sample '{id}': {source}")]
    Bands { id: String, source: SatBandError },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// QAA output for one configured sample
#[derive(Debug, Clone, Serialize)]
pub struct SampleResult {
    pub id: String,
    pub date: NaiveDate,
    pub lon: f64,
    pub lat: f64,
    pub result: QaaResult,
}

pub struct BatchProcessor {
    config: Config,
    bands: SatBands,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Self {
        let bands = SatBands::new(config.sensor());
        debug!("{}", bands);
        BatchProcessor { config, bands }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Samples inside the date window and bbox, in configuration order
    pub fn selected_samples(&self) -> impl Iterator<Item = &Sample> {
        self.config.samples().iter().filter(|sample| {
            let selected = self.config.selects(sample);
            if !selected {
                debug!(
                    "skipping sample {} ({}, {}, {})",
                    sample.id, sample.date, sample.lon, sample.lat
                );
            }
            selected
        })
    }

    fn process_sample(&self, sample: &Sample) -> Result<SampleResult, BatchError> {
        let spectrum = self
            .bands
            .spectrum(&sample.rrs)
            .map_err(|source| BatchError::Bands {
                id: sample.id.clone(),
                source,
            })?;

        let result = compute(spectrum);
        if !result.flags().is_empty() {
            warn!(
                "sample {}: QAA flags {} ({})",
                sample.id,
                result.flags(),
                result.get_messages().join("; ")
            );
        }

        Ok(SampleResult {
            id: sample.id.clone(),
            date: sample.date,
            lon: sample.lon,
            lat: sample.lat,
            result,
        })
    }

    pub fn process(&self) -> Result<Vec<SampleResult>, BatchError> {
        let results = self
            .selected_samples()
            .map(|sample| self.process_sample(sample))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Processed {} of {} samples with {} bands",
            results.len(),
            self.config.samples().len(),
            self.bands.sensor()
        );

        Ok(results)
    }
}

/// Writes results as a pretty-printed JSON array
pub fn write_results<P: AsRef<Path>>(results: &[SampleResult], path: P) -> Result<(), BatchError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush()?;

    info!(
        "Wrote {} results to {}",
        results.len(),
        path.as_ref().display()
    );
    Ok(())
}
