//! Image-processing building blocks for feature extraction
//!
//! - Luminance conversion (RGB/BGR to 8-bit luma)
//! - White masking (fixed global threshold)
//! - Uniform local binary patterns
//! - Histogram statistics and entropy

pub mod binarization;
pub mod grayscale;
pub mod lbp;
pub mod statistics;
