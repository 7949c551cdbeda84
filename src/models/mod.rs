pub mod classification;
pub mod color_image;
pub mod feature_vector;
pub mod matrix;

pub use classification::{Classification, Label};
pub use feature_vector::{FEATURE_LEN, FeatureSummary, FeatureVector, LBP_BINS, WhiteStats};
pub use color_image::{ChannelOrder, ColorImage};
pub use matrix::BitMatrix;
