//! Domain labels and classification results

use crate::error::ClassifierError;
use serde::Serialize;
use std::fmt;

/// Domain label for a QR photograph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    /// First-generation capture of a screen or print
    Original,
    /// Photograph of a photograph
    Recaptured,
}

impl Label {
    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Original => "Original",
            Label::Recaptured => "Recaptured",
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = ClassifierError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Label::Original),
            1 => Ok(Label::Recaptured),
            other => Err(ClassifierError::UnknownClass(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    /// Predicted label
    #[serde(rename = "result")]
    pub label: Label,
    /// Probability of `label`, as a percentage in [0, 100]
    pub confidence: f64,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.label, self.confidence)
    }
}
