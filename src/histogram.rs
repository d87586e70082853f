//! Aggregation of counted cycles by range.
use num_traits::AsPrimitive;
use serde::Serialize;

use crate::error::{RainflowError, Result};
use crate::rainflow::Cycle;

/// Cycle counts in equal-width range bins spanning `[0, max_range]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeHistogram {
    pub bin_width: f64,
    pub max_range: f64,
    pub counts: Vec<usize>,
}

impl RangeHistogram {
    /// Bins `cycles` by range into `bins` equal-width bins.
    ///
    /// The upper edge of the last bin is the largest range, and a cycle sitting exactly on
    /// it is counted in the last bin. Without cycles every count is zero and the bin width
    /// is zero.
    pub fn from_cycles<R: AsPrimitive<f64>>(cycles: &[Cycle<R>], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(RainflowError::InvalidBinCount(bins));
        }
        let max_range = cycles
            .iter()
            .map(|c| c.range.as_())
            .fold(0.0_f64, f64::max);
        let bin_width = max_range / bins as f64;

        let mut counts = vec![0; bins];
        for cycle in cycles {
            let range: f64 = cycle.range.as_();
            let bin = if bin_width > 0.0 {
                ((range / bin_width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[bin] += 1;
        }

        Ok(RangeHistogram {
            bin_width,
            max_range,
            counts,
        })
    }

    /// Number of cycles across all bins.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn bin_edges(&self) -> Vec<f64> {
        (0..=self.counts.len())
            .map(|i| i as f64 * self.bin_width)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rainflow::{count_cycles, extract_peaks};
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_reference_history() {
        let cycles = count_cycles(&extract_peaks(&[
            -5.0, -5.0, -3.0, -9.0, -9.0, 5.0, -3.0, 9.0, 3.0, 7.0,
        ]));
        // ranges 8, 4, 2, 18 over three bins of width 6
        let hist = RangeHistogram::from_cycles(&cycles, 3).unwrap();
        assert_relative_eq!(hist.bin_width, 6.0);
        assert_relative_eq!(hist.max_range, 18.0);
        assert_eq!(hist.counts, vec![2, 1, 1]);
        assert_eq!(hist.total(), cycles.len());
        assert_eq!(hist.bin_edges(), vec![0.0, 6.0, 12.0, 18.0]);
    }

    #[test]
    fn test_histogram_integer_cycles() {
        let cycles = count_cycles(&[-9i32, 5, -3, 9, 3, 7, -5, -3, -9]);
        let hist = RangeHistogram::from_cycles(&cycles, 9).unwrap();
        assert_eq!(hist.counts, vec![0, 1, 1, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_histogram_without_cycles() {
        let hist = RangeHistogram::from_cycles::<f64>(&[], 4).unwrap();
        assert_eq!(hist.counts, vec![0; 4]);
        assert_eq!(hist.total(), 0);
        assert_relative_eq!(hist.bin_width, 0.0);
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        let cycles = vec![Cycle { range: 1.0, mean: 0.0 }];
        assert!(matches!(
            RangeHistogram::from_cycles(&cycles, 0),
            Err(RainflowError::InvalidBinCount(0))
        ));
    }
}
