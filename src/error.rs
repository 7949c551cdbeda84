use thiserror::Error;

/// Image buffer that violates the extractor's input contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidImageError {
    /// Width or height is zero
    #[error("Invalid image dimensions: width={0}, height={1}")]
    EmptyDimensions(usize, usize),

    /// Buffer length does not match `width * height * 3`
    #[error("Image buffer has {actual} bytes, expected {expected} for 3-channel {width}x{height}")]
    BufferLength {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
        /// Required buffer length
        expected: usize,
        /// Supplied buffer length
        actual: usize,
    },
}

/// Failure turning user-supplied bytes into a color image.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Upload or file was empty
    #[error("Image data is empty")]
    Empty,

    /// Underlying codec rejected the data
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    /// Decoded image does not satisfy the extractor contract
    #[error(transparent)]
    Invalid(#[from] InvalidImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Missing or corrupt classifier artifact. Fatal at load time.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Model file could not be read
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    /// Model file is not valid JSON for the forest schema
    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    /// Model parsed but is structurally unusable
    #[error("Invalid model: {0}")]
    Invalid(String),
}

/// Classifier artifact output that breaks the adapter contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// Raw class id with no domain label
    #[error("Classifier produced unknown class id {0}; expected 0 (original) or 1 (recaptured)")]
    UnknownClass(i64),

    /// Probability vector does not line up with the class list
    #[error("Classifier returned {actual} probabilities for {expected} classes")]
    OutputShape {
        /// Number of classes the classifier declares
        expected: usize,
        /// Number of probabilities it returned
        actual: usize,
    },

    /// Probability that is NaN, infinite or outside [0, 1]
    #[error("Classifier returned invalid probability {value} for class index {index}")]
    InvalidProbability {
        /// Position in the probability vector
        index: usize,
        /// Offending value
        value: f64,
    },
}

/// Per-request classification failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// Feature vector is the all-zero sentinel: no white region was found
    #[error("Insufficient signal: no white region brighter than the threshold")]
    InsufficientSignal,

    /// Artifact misbehaved
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Any failure along decode -> extract -> classify.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Classification was refused or failed
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl PipelineError {
    /// True when the image was fine but had no usable white region.
    pub fn is_insufficient_signal(&self) -> bool {
        matches!(self, PipelineError::Classify(ClassifyError::InsufficientSignal))
    }
}
