//! Population statistics over 8-bit samples
//!
//! Everything is computed from a 256-bin histogram, so results do not depend
//! on the order the samples were collected in.

use crate::models::WhiteStats;

/// 256-bin histogram of 8-bit values
pub fn value_histogram(values: &[u8]) -> [u64; 256] {
    let mut histogram = [0u64; 256];
    for &v in values {
        histogram[v as usize] += 1;
    }
    histogram
}

/// Mean, population std-dev, min, max and ratio `n / total_pixels`
///
/// Returns `None` for an empty sample.
pub fn white_stats(histogram: &[u64; 256], total_pixels: usize) -> Option<WhiteStats> {
    let n: u64 = histogram.iter().sum();
    if n == 0 || total_pixels == 0 {
        return None;
    }

    let min = histogram.iter().position(|&c| c > 0)?;
    let max = histogram.iter().rposition(|&c| c > 0)?;

    let sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &c)| v as u64 * c)
        .sum();
    let mean = sum as f64 / n as f64;

    let squared_deviation: f64 = histogram
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > 0)
        .map(|(v, &c)| {
            let d = v as f64 - mean;
            c as f64 * d * d
        })
        .sum();
    let std_dev = (squared_deviation / n as f64).sqrt();

    Some(WhiteStats {
        mean,
        std_dev,
        min: min as f64,
        max: max as f64,
        white_ratio: n as f64 / total_pixels as f64,
    })
}

/// Shannon entropy in bits of the value distribution
///
/// Zero for an empty or single-valued sample.
pub fn shannon_entropy(histogram: &[u64; 256]) -> f64 {
    let n: u64 = histogram.iter().sum();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;

    histogram
        .iter()
        .filter(|&&c| c > 0)
        .fold(0.0, |acc, &c| {
            let p = c as f64 / n;
            acc - p * p.log2()
        })
}
