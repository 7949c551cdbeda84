//! Convert 3-channel images to 8-bit luminance
//! Y = 0.299*R + 0.587*G + 0.114*B (ITU-R BT.601)
//! Uses 14-bit fixed point with rounding: Y = (4899*R + 9617*G + 1868*B + 8192) >> 14
//!
//! This matches the usual 8-bit BGR/RGB-to-gray conversion bit for bit,
//! which the classifier's training features were computed with.

use crate::config::PARALLEL_MIN_PIXELS;
use crate::models::{ChannelOrder, ColorImage};
use rayon::prelude::*;

/// Coefficients for luminance conversion in 14-bit fixed point
const COEF_R: u32 = 4899;
const COEF_G: u32 = 9617;
const COEF_B: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    // Max is (16384 * 255 + 8192) >> 14 = 255
    ((COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> SHIFT) as u8
}

/// Indices of red and blue within a pixel for the given order
#[inline]
fn red_blue(order: ChannelOrder) -> (usize, usize) {
    match order {
        ChannelOrder::Rgb => (0, 2),
        ChannelOrder::Bgr => (2, 0),
    }
}

fn convert_row(pixels: &[u8], order: ChannelOrder, out: &mut [u8]) {
    let (ri, bi) = red_blue(order);
    for (px, y) in pixels.chunks_exact(3).zip(out.iter_mut()) {
        *y = luma(px[ri], px[1], px[bi]);
    }
}

/// Convert an interleaved 3-channel buffer to luminance
pub fn to_luminance(data: &[u8], width: usize, height: usize, order: ChannelOrder) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    to_luminance_with_buffer(data, width, height, order, &mut gray);
    gray
}

/// Convert to luminance using parallel processing
/// Processes rows in parallel for multi-core speedup
pub fn to_luminance_parallel(
    data: &[u8],
    width: usize,
    height: usize,
    order: ChannelOrder,
) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 {
        return gray;
    }

    gray.par_chunks_mut(width)
        .zip(data.par_chunks(width * 3))
        .for_each(|(row, pixels)| convert_row(pixels, order, row));

    gray
}

/// Luminance of a validated image, parallel for large inputs
pub fn image_luminance(image: &ColorImage) -> Vec<u8> {
    let (w, h) = (image.width(), image.height());
    if image.pixel_count() >= PARALLEL_MIN_PIXELS {
        to_luminance_parallel(image.as_bytes(), w, h, image.channel_order())
    } else {
        to_luminance(image.as_bytes(), w, h, image.channel_order())
    }
}

/// Convert to luminance using a pre-allocated buffer (no allocation)
///
/// # Arguments
/// * `data` - Interleaved 3-channel image data
/// * `width` - Image width
/// * `height` - Image height
/// * `order` - Channel order of `data`
/// * `output` - Pre-allocated output buffer (must have length >= width * height)
///
/// # Returns
/// Number of pixels written (width * height)
pub fn to_luminance_with_buffer(
    data: &[u8],
    width: usize,
    height: usize,
    order: ChannelOrder,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");
    convert_row(&data[..pixel_count * 3], order, &mut output[..pixel_count]);
    pixel_count
}
