//! The 16-entry feature vector handed to the classifier
//!
//! Entry order is fixed: mean, std, min, max and ratio of the white pixels,
//! ten uniform-LBP bins, then the entropy of the white values.

use serde::Serialize;

/// Number of entries in a feature vector
pub const FEATURE_LEN: usize = 16;

/// Number of LBP histogram bins (uniform codes 0..=9)
pub const LBP_BINS: usize = 10;

/// Index of the first LBP histogram bin
pub const LBP_OFFSET: usize = 5;

/// Fixed-order white-region descriptor consumed by the classifier
///
/// Layout (0-based): mean, std-dev, min, max, white ratio, ten LBP histogram
/// bins, entropy. Luminance values are on the 0-255 scale. The order must
/// match what the classifier artifact was trained on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_LEN]);

impl FeatureVector {
    /// The "no white region" sentinel
    pub const INSUFFICIENT_SIGNAL: FeatureVector = FeatureVector([0.0; FEATURE_LEN]);

    /// Wrap raw values in wire order
    pub fn from_array(values: [f64; FEATURE_LEN]) -> Self {
        Self(values)
    }

    /// Assemble from named parts
    pub fn from_parts(stats: WhiteStats, lbp_histogram: [f64; LBP_BINS], entropy: f64) -> Self {
        let mut values = [0.0; FEATURE_LEN];
        values[0] = stats.mean;
        values[1] = stats.std_dev;
        values[2] = stats.min;
        values[3] = stats.max;
        values[4] = stats.white_ratio;
        values[LBP_OFFSET..LBP_OFFSET + LBP_BINS].copy_from_slice(&lbp_histogram);
        values[FEATURE_LEN - 1] = entropy;
        Self(values)
    }

    /// True for the all-zero sentinel
    ///
    /// A real measurement always has a positive white ratio, so it can never
    /// be all zeros.
    pub fn is_insufficient_signal(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Values in wire order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Values in wire order
    pub fn to_array(self) -> [f64; FEATURE_LEN] {
        self.0
    }

    /// Mean white luminance
    pub fn mean(&self) -> f64 {
        self.0[0]
    }

    /// Population std-dev of white luminance
    pub fn std_dev(&self) -> f64 {
        self.0[1]
    }

    /// Minimum white luminance
    pub fn min(&self) -> f64 {
        self.0[2]
    }

    /// Maximum white luminance
    pub fn max(&self) -> f64 {
        self.0[3]
    }

    /// Fraction of pixels in the white mask
    pub fn white_ratio(&self) -> f64 {
        self.0[4]
    }

    /// The ten normalized LBP bins
    pub fn lbp_histogram(&self) -> &[f64] {
        &self.0[LBP_OFFSET..LBP_OFFSET + LBP_BINS]
    }

    /// Shannon entropy (bits) of white luminance
    pub fn entropy(&self) -> f64 {
        self.0[FEATURE_LEN - 1]
    }

    /// Named view for reporting
    pub fn summary(&self) -> FeatureSummary {
        let mut lbp_histogram = [0.0; LBP_BINS];
        lbp_histogram.copy_from_slice(self.lbp_histogram());
        FeatureSummary {
            mean: self.mean(),
            std_dev: self.std_dev(),
            min: self.min(),
            max: self.max(),
            white_ratio: self.white_ratio(),
            lbp_histogram,
            entropy: self.entropy(),
        }
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Scalar statistics over white-masked luminance
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct WhiteStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub white_ratio: f64,
}

/// Serializable, named form of a [`FeatureVector`]
#[derive(Debug, Clone, Serialize)]
#[allow(missing_docs)]
pub struct FeatureSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub white_ratio: f64,
    pub lbp_histogram: [f64; LBP_BINS],
    pub entropy: f64,
}
