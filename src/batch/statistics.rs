use std::fmt;

use super::SampleResult;
use crate::iop::QaaFlag;

/// Summary of the chlorophyll-a values of a batch.
///
/// `min`, `max` and `mean` are `None` when no sample has a valid chla.
#[derive(Debug, Clone, PartialEq)]
pub struct ChlaStatistics {
    pub count: usize,
    pub valid: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ChlaStatistics {
    /// Only finite chla from runs without [`QaaFlag::ChlaUndefined`] count as valid
    pub fn from_results(results: &[SampleResult]) -> Self {
        let valid_values: Vec<f64> = results
            .iter()
            .filter(|r| !r.result.flags().contains(QaaFlag::ChlaUndefined))
            .map(|r| r.result.chla())
            .filter(|chla| chla.is_finite())
            .collect();

        let (min, max, mean) = if valid_values.is_empty() {
            (None, None, None)
        } else {
            let min = valid_values.iter().copied().fold(f64::MAX, f64::min);
            let max = valid_values.iter().copied().fold(f64::MIN, f64::max);
            let mean = valid_values.iter().sum::<f64>() / valid_values.len() as f64;
            (Some(min), Some(max), Some(mean))
        };

        Self {
            count: results.len(),
            valid: valid_values.len(),
            min,
            max,
            mean,
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, label: &str, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, "  {}: {:.4} mg m-3", label, v),
        None => writeln!(f, "  {}: n/a", label),
    }
}

impl fmt::Display for ChlaStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let share = if self.count == 0 {
            0.0
        } else {
            100.0 * self.valid as f64 / self.count as f64
        };

        writeln!(f, "Chlorophyll-a - Samples: {}", self.count)?;
        write_value(f, "Min", self.min)?;
        write_value(f, "Max", self.max)?;
        write_value(f, "Mean", self.mean)?;
        write!(
            f,
            "  Valid samples: {} / {} ({:.1}%)",
            self.valid, self.count, share
        )
    }
}
