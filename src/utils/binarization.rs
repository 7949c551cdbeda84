//! White-region masking

use crate::models::BitMatrix;

/// Global threshold mask: true where luminance is strictly above `threshold`
///
/// Fixed, not adaptive: a pixel at exactly `threshold` is not white.
pub fn white_mask(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut mask = BitMatrix::new(width, height);

    for (idx, &value) in gray.iter().take(width * height).enumerate() {
        if value > threshold {
            mask.set_index(idx, true);
        }
    }

    mask
}

/// Luminance values selected by `mask`, in row-major order
pub fn masked_values(gray: &[u8], mask: &BitMatrix) -> Vec<u8> {
    mask.iter_ones().map(|idx| gray[idx]).collect()
}
