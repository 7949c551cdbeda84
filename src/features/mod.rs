//! White-region feature extraction
//!
//! Turns a color image into the 16-entry [`FeatureVector`]:
//!
//! 1. luminance conversion
//! 2. white mask (`Y > threshold`)
//! 3. empty mask short-circuits to the zero sentinel
//! 4. scalar statistics, LBP histogram and entropy over the masked pixels

use crate::config::ExtractorConfig;
use crate::error::InvalidImageError;
use crate::models::color_image::validate_dimensions;
use crate::models::{ChannelOrder, ColorImage, FeatureVector};
use crate::utils::binarization::{masked_values, white_mask};
use crate::utils::grayscale::image_luminance;
use crate::utils::lbp::{masked_histogram, uniform_lbp};
use crate::utils::statistics::{shannon_entropy, value_histogram, white_stats};
use tracing::{debug, trace};

/// Stateless feature extractor
///
/// Holds only its configuration, so one instance can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an extractor with a specific white threshold
    pub fn with_white_threshold(threshold: u8) -> Self {
        Self::new(ExtractorConfig::default().with_white_threshold(threshold))
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the feature vector of an image
    ///
    /// Returns [`FeatureVector::INSUFFICIENT_SIGNAL`] when no pixel is
    /// brighter than the threshold.
    pub fn extract(&self, image: &ColorImage) -> FeatureVector {
        let (width, height) = (image.width(), image.height());
        let gray = image_luminance(image);

        let mask = white_mask(&gray, width, height, self.config.white_threshold);
        if mask.is_empty() {
            debug!(
                width,
                height,
                threshold = self.config.white_threshold,
                "no white pixels, returning sentinel"
            );
            return FeatureVector::INSUFFICIENT_SIGNAL;
        }

        let histogram = value_histogram(&masked_values(&gray, &mask));
        let Some(stats) = white_stats(&histogram, image.pixel_count()) else {
            return FeatureVector::INSUFFICIENT_SIGNAL;
        };

        let codes = uniform_lbp(&gray, width, height);
        let lbp_histogram = masked_histogram(&codes, &mask);
        let entropy = shannon_entropy(&histogram);

        trace!(?lbp_histogram, "lbp histogram");
        debug!(
            width,
            height,
            white_ratio = stats.white_ratio,
            mean = stats.mean,
            entropy,
            "extracted features"
        );

        FeatureVector::from_parts(stats, lbp_histogram, entropy)
    }

    /// Extract from a raw interleaved buffer, validating it first
    pub fn extract_raw(
        &self,
        data: &[u8],
        width: usize,
        height: usize,
        order: ChannelOrder,
    ) -> Result<FeatureVector, InvalidImageError> {
        validate_dimensions(data.len(), width, height)?;
        let image = ColorImage::new(data.to_vec(), width, height, order)?;
        Ok(self.extract(&image))
    }
}

/// Extract features from an image with the default configuration
pub fn extract_features(image: &ColorImage) -> FeatureVector {
    FeatureExtractor::default().extract(image)
}
