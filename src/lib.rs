//! qr_recapture - tell original QR photographs from recaptured ones
//!
//! Recapturing (photographing a screen or print of a QR photo) degrades the
//! bright regions of the code. This crate summarizes those regions in a
//! fixed 16-entry feature vector and hands it to a trained classifier.
//!
//! ```
//! use qr_recapture::{ColorImage, FeatureExtractor};
//!
//! let image = ColorImage::filled(64, 64, [255, 255, 255]).unwrap();
//! let features = FeatureExtractor::with_white_threshold(200).extract(&image);
//! assert_eq!(features.white_ratio(), 1.0);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Classifier trait, label mapping and the JSON forest artifact
pub mod classifier;
/// Extraction settings and environment overrides
pub mod config;
/// Error types for every stage
pub mod error;
/// White-region feature extraction
pub mod features;
/// Tracing subscriber setup for binaries
pub mod logger;
/// Core data structures (ColorImage, FeatureVector, Classification, etc.)
pub mod models;
/// End-to-end decode, extract and classify
pub mod pipeline;
/// Image decoding and dataset helpers
pub mod tools;
/// Utility functions (luminance, masking, LBP, statistics)
pub mod utils;

pub use classifier::{ClassificationAdapter, Classifier, ForestModel};
pub use config::{DEFAULT_WHITE_THRESHOLD, ExtractorConfig};
pub use error::{
    ClassifierError, ClassifyError, DecodeError, InvalidImageError, ModelError, PipelineError,
};
pub use features::{FeatureExtractor, extract_features};
pub use models::{ChannelOrder, Classification, ColorImage, FEATURE_LEN, FeatureVector, Label};
pub use pipeline::{BatchItem, BatchSummary, Pipeline};

/// Extract features from a raw RGB buffer with the default configuration
///
/// # Arguments
/// * `rgb` - Raw RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// The feature vector, or an error if the buffer does not describe a
/// non-empty 3-channel image
pub fn extract(rgb: &[u8], width: usize, height: usize) -> Result<FeatureVector, InvalidImageError> {
    FeatureExtractor::default().extract_raw(rgb, width, height, ChannelOrder::Rgb)
}
