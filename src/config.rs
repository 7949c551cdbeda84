//! Extraction settings
//!
//! The brightness threshold is the only tunable. It defaults to
//! [`DEFAULT_WHITE_THRESHOLD`] and can be overridden once per process via
//! `RECAPTURE_WHITE_THRESHOLD`, or per extractor via
//! [`ExtractorConfig::with_white_threshold`].

use std::sync::OnceLock;

/// Luminance (0-255) a pixel must strictly exceed to count as white
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;

/// Images with at least this many pixels use the row-parallel paths
pub const PARALLEL_MIN_PIXELS: usize = 512 * 512;

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

static WHITE_THRESHOLD: OnceLock<u8> = OnceLock::new();

pub(crate) fn white_threshold_from_env() -> u8 {
    *WHITE_THRESHOLD
        .get_or_init(|| parse_env_u8("RECAPTURE_WHITE_THRESHOLD", DEFAULT_WHITE_THRESHOLD))
}

/// Feature extractor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Strict lower bound on luminance for the white mask
    pub white_threshold: u8,
}

impl ExtractorConfig {
    /// Override the white threshold
    pub fn with_white_threshold(mut self, threshold: u8) -> Self {
        self.white_threshold = threshold;
        self
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            white_threshold: white_threshold_from_env(),
        }
    }
}
