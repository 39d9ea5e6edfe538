//! Plot-ready distributions over metric values

use serde::{Deserialize, Serialize};

/// One fixed-width histogram bin covering `[start, end)` (the last bin is closed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Bin `values` into `bins` equal-width bins over `[lo, hi]`.
///
/// Empty input or zero bins gives no bins. A degenerate range (`lo == hi`)
/// collapses into a single bin holding every value.
pub fn fixed_width_histogram(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    if hi <= lo {
        return vec![Bin {
            start: lo,
            end: hi,
            count: values.len(),
        }];
    }

    let width = (hi - lo) / bins as f64;
    let mut histogram: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &value in values {
        if value < lo || value > hi {
            continue;
        }
        let slot = (((value - lo) / width) as usize).min(bins - 1);
        histogram[slot].count += 1;
    }

    histogram
}

/// Bin values over their own observed range
pub fn auto_range_histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    fixed_width_histogram(values, lo, hi, bins)
}

/// Frequency of each distinct value, ascending
pub fn value_counts(values: impl IntoIterator<Item = usize>) -> Vec<(usize, usize)> {
    let mut sorted: Vec<usize> = values.into_iter().collect();
    sorted.sort_unstable();

    let mut counts: Vec<(usize, usize)> = Vec::new();
    for value in sorted {
        match counts.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => counts.push((value, 1)),
        }
    }
    counts
}
