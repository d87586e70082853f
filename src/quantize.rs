//! Scaling of raw floating point signals to fixed-point integers.
use tracing::debug;

use crate::error::{RainflowError, Result};

/// Returns `sample * scale` rounded to the nearest `i32` for every sample.
///
/// Halfway cases round to the even neighbour, so `0.5 -> 0` and `1.5 -> 2`. A product
/// that is not finite or does not fit in an `i32` is reported with its index; nothing is
/// wrapped or saturated.
pub fn quantize(signal: &[f64], scale: f64) -> Result<Vec<i32>> {
    let quantized = signal
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let scaled = (value * scale).round_ties_even();
            if !scaled.is_finite() {
                return Err(RainflowError::NonFinite { index, value, scale });
            }
            if scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
                return Err(RainflowError::QuantizeOverflow { index, value, scale });
            }
            Ok(scaled as i32)
        })
        .collect::<Result<Vec<i32>>>()?;
    debug!(samples = quantized.len(), scale, "quantized signal");
    Ok(quantized)
}
