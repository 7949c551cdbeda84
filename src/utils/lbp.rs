//! Rotation-invariant uniform local binary patterns (P = 8, R = 1)
//!
//! Each pixel is compared with 8 neighbours sampled on a unit circle, starting
//! at the right-hand neighbour and turning counter-clockwise. Diagonal samples
//! are bilinearly interpolated; samples that fall outside the image read as 0.
//! A neighbour sets its bit when it is greater than or equal to the centre.
//!
//! The code is the number of set bits when the pattern has at most two 0/1
//! transitions between consecutive neighbours 0..7 (the last-to-first pair is
//! not counted), and `P + 1` otherwise. Codes are therefore in `0..=9`.

use crate::config::PARALLEL_MIN_PIXELS;
use crate::models::{BitMatrix, LBP_BINS};
use rayon::prelude::*;

/// Sampling points on the circle
pub const LBP_POINTS: usize = 8;

/// Code assigned to non-uniform patterns
pub const NON_UNIFORM_CODE: u8 = LBP_POINTS as u8 + 1;

/// (row, col) offsets: (-sin(2*pi*i/8), cos(2*pi*i/8)) rounded to 5 decimals
const OFFSETS: [(f64, f64); LBP_POINTS] = [
    (0.0, 1.0),
    (-0.70711, 0.70711),
    (-1.0, 0.0),
    (-0.70711, -0.70711),
    (0.0, -1.0),
    (0.70711, -0.70711),
    (1.0, 0.0),
    (0.70711, 0.70711),
];

#[inline]
fn pixel(gray: &[u8], width: usize, height: usize, row: isize, col: isize) -> f64 {
    if row < 0 || col < 0 || row as usize >= height || col as usize >= width {
        return 0.0;
    }
    gray[row as usize * width + col as usize] as f64
}

#[inline]
fn bilinear(gray: &[u8], width: usize, height: usize, r: f64, c: f64) -> f64 {
    let min_r = r.floor();
    let min_c = c.floor();
    let max_r = r.ceil();
    let max_c = c.ceil();
    let dr = r - min_r;
    let dc = c - min_c;

    let top_left = pixel(gray, width, height, min_r as isize, min_c as isize);
    let top_right = pixel(gray, width, height, min_r as isize, max_c as isize);
    let bottom_left = pixel(gray, width, height, max_r as isize, min_c as isize);
    let bottom_right = pixel(gray, width, height, max_r as isize, max_c as isize);

    let top = (1.0 - dc) * top_left + dc * top_right;
    let bottom = (1.0 - dc) * bottom_left + dc * bottom_right;
    (1.0 - dr) * top + dr * bottom
}

/// Uniform LBP code of the pixel at (x, y)
pub fn uniform_lbp_code(gray: &[u8], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let center = gray[y * width + x] as f64;
    let mut bits = [false; LBP_POINTS];
    for (bit, &(dr, dc)) in bits.iter_mut().zip(OFFSETS.iter()) {
        let sample = bilinear(gray, width, height, y as f64 + dr, x as f64 + dc);
        *bit = sample - center >= 0.0;
    }

    let transitions = bits.windows(2).filter(|w| w[0] != w[1]).count();
    if transitions <= 2 {
        bits.iter().filter(|&&b| b).count() as u8
    } else {
        NON_UNIFORM_CODE
    }
}

fn code_row(gray: &[u8], width: usize, height: usize, y: usize, out: &mut [u8]) {
    for (x, code) in out.iter_mut().enumerate() {
        *code = uniform_lbp_code(gray, width, height, x, y);
    }
}

/// Uniform LBP code for every pixel, row-major
pub fn uniform_lbp(gray: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut codes = vec![0u8; width * height];
    if width == 0 {
        return codes;
    }

    if width * height >= PARALLEL_MIN_PIXELS {
        codes
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| code_row(gray, width, height, y, row));
    } else {
        for (y, row) in codes.chunks_mut(width).enumerate() {
            code_row(gray, width, height, y, row);
        }
    }

    codes
}

/// Histogram of codes under `mask`, normalized to sum to 1
///
/// Bin k counts code k. An empty selection yields all zeros.
pub fn masked_histogram(codes: &[u8], mask: &BitMatrix) -> [f64; LBP_BINS] {
    let mut counts = [0u64; LBP_BINS];
    for idx in mask.iter_ones() {
        let code = codes[idx] as usize;
        if code < LBP_BINS {
            counts[code] += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    let denom = if total == 0 { 1e-6 } else { total as f64 };

    let mut hist = [0.0; LBP_BINS];
    for (h, &c) in hist.iter_mut().zip(counts.iter()) {
        *h = c as f64 / denom;
    }
    hist
}
