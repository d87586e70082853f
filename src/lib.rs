//! Rainflow cycle counting of recorded load signals.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

pub mod app_logic;
pub mod config;
pub mod error;
pub mod histogram;
pub mod output;
pub mod quantize;
pub mod rainflow;
pub mod signal;

pub use error::RainflowError;
pub use quantize::quantize;
pub use rainflow::{count_cycles, count_many, extract_peaks, get_ranges_and_means, Cycle, Sample};

// When the "wasm" feature is enabled, use wasm_bindgen to expose the counter to the host environment.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn run_rainflow(signal: &[f64]) -> Vec<f64> {
    let (ranges, means) = rainflow::get_ranges_and_means(signal);
    // ranges first, then means, both of the same length
    ranges.into_iter().chain(means).collect()
}
