//! Rainflow cycle counting after Downing's Method 1 ("Simple rainflow counting
//! algorithms", Downing & Socie, International Journal of Fatigue, 1982).
//!
//! Method 1 works on stored, finite histories. The history is first reduced to its
//! reversals and rotated so it starts and finishes on the largest-magnitude reversal;
//! the counting pass then resolves cycles with the four-point rule.
use num_traits::{AsPrimitive, Signed};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

/// Numeric sample type the counter works over: signed integers and floats.
///
/// Ranges are taken in `Wide`, which holds the difference of any two samples, so
/// `i16::MIN` against `i16::MAX` cannot overflow.
pub trait Sample: PartialOrd + Copy + AsPrimitive<f64> + Send + Sync {
    type Wide: Signed + PartialOrd + Copy + AsPrimitive<f64> + Send + Sync + Serialize;

    fn widen(self) -> Self::Wide;
}

macro_rules! impl_sample {
    ($($sample:ty => $wide:ty),* $(,)?) => {
        $(
            impl Sample for $sample {
                type Wide = $wide;

                #[inline]
                fn widen(self) -> $wide {
                    self as $wide
                }
            }
        )*
    };
}

impl_sample!(
    i8 => i32,
    i16 => i32,
    i32 => i64,
    i64 => i128,
    isize => i128,
    f32 => f64,
    f64 => f64,
);

/// One closed rainflow cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cycle<R> {
    /// Absolute difference between the two paired reversals.
    pub range: R,
    /// Average of the two paired reversals, kept as `f64` so integer signals keep halves.
    pub mean: f64,
}

/// Reduces `signal` to its peaks and troughs, starting and finishing at the sample of
/// greatest absolute value.
///
/// Runs of equal samples collapse to one sample. The comparison with the predecessor is
/// cyclic, so a leading sample equal to the last sample is dropped as well and a constant
/// signal yields no peaks at all. Extremum detection is cyclic too: the first and last
/// samples of the rotated history are neighbours.
///
/// The returned sequence is empty or has at least two entries, with the first value
/// repeated at the end to close the history.
pub fn extract_peaks<T: Sample>(signal: &[T]) -> Vec<T> {
    let n = signal.len();
    let mut data: Vec<T> = (0..n)
        .filter(|&i| signal[i] != signal[(i + n - 1) % n])
        .map(|i| signal[i])
        .collect();

    if data.is_empty() {
        if n > 0 {
            warn!(samples = n, "signal is constant, no peaks to extract");
        }
        return Vec::new();
    }

    // magnitude is compared in f64 so the most negative integer cannot overflow abs()
    let mut anchor = 0;
    let mut largest = data[0].as_().abs();
    for (i, value) in data.iter().enumerate().skip(1) {
        let magnitude = value.as_().abs();
        if magnitude > largest {
            largest = magnitude;
            anchor = i;
        }
    }
    data.rotate_left(anchor);

    let len = data.len();
    let mut peaks: Vec<T> = (0..len)
        .filter(|&i| {
            let value = data[i];
            let prev = data[(i + len - 1) % len];
            let next = data[(i + 1) % len];
            (value > prev && value > next) || (value < prev && value < next)
        })
        .map(|i| data[i])
        .collect();
    peaks.push(data[0]);

    debug!(samples = n, collapsed = len, peaks = peaks.len(), "extracted peaks");
    peaks
}

/// Counts closed cycles in a peak sequence produced by [`extract_peaks`].
///
/// Each peak is pushed onto a stack. While the stack holds more than two values, the
/// newest range `X = |a - b|` is compared with the one before it, `Y = |b - c|`. When
/// `X >= Y` the range `Y` is a closed cycle: it is emitted and `b`, `c` are removed,
/// leaving `a` in place of `c`. Values still on the stack at the end are residual
/// half-cycles and are not reported.
///
/// The input is not validated beyond a debug assertion; a sequence that does not
/// alternate gives meaningless cycles.
pub fn count_cycles<T: Sample>(peaks: &[T]) -> Vec<Cycle<T::Wide>> {
    debug_assert!(
        peaks.windows(2).all(|w| w[0] != w[1]),
        "adjacent peaks must differ"
    );

    let mut stack: Vec<T> = Vec::with_capacity(peaks.len());
    let mut cycles = Vec::new();

    for &peak in peaks {
        stack.push(peak);
        while stack.len() > 2 {
            let top = stack.len() - 1;
            let (a, b, c) = (stack[top], stack[top - 1], stack[top - 2]);
            let x = (a.widen() - b.widen()).abs();
            let y = (b.widen() - c.widen()).abs();
            if x < y {
                break;
            }
            cycles.push(Cycle {
                range: y,
                mean: 0.5 * (b.as_() + c.as_()),
            });
            stack[top - 2] = a;
            stack.truncate(top - 1);
        }
    }

    debug!(
        peaks = peaks.len(),
        cycles = cycles.len(),
        residual = stack.len(),
        "counted rainflow cycles"
    );
    cycles
}

/// Ranges and means of every rainflow cycle in `signal`, in emission order.
pub fn get_ranges_and_means<T: Sample>(signal: &[T]) -> (Vec<T::Wide>, Vec<f64>) {
    let peaks = extract_peaks(signal);
    if peaks.is_empty() {
        return (Vec::new(), Vec::new());
    }
    count_cycles(&peaks)
        .into_iter()
        .map(|cycle| (cycle.range, cycle.mean))
        .unzip()
}

/// Runs [`get_ranges_and_means`] on every signal in parallel, one signal per task.
/// Results come back in input order.
pub fn count_many<T, S>(signals: &[S]) -> Vec<(Vec<T::Wide>, Vec<f64>)>
where
    T: Sample,
    S: AsRef<[T]> + Sync,
{
    signals
        .par_iter()
        .map(|signal| get_ranges_and_means(signal.as_ref()))
        .collect()
}
