//! Classification adapter
//!
//! The trained model is an external artifact behind the [`Classifier`]
//! trait. [`ClassificationAdapter`] owns one injected instance and turns its
//! raw output into a [`Classification`].
//!
//! Sentinel policy: an all-zero feature vector (no white region) is always
//! rejected with [`ClassifyError::InsufficientSignal`]; it is never passed to
//! the model.

pub mod forest;

use crate::error::{ClassifierError, ClassifyError};
use crate::models::{Classification, FeatureVector, Label};
use tracing::{debug, warn};

pub use forest::ForestModel;

/// A trained binary classifier over feature vectors
///
/// Inference must be a pure read of immutable parameters.
pub trait Classifier: Send + Sync {
    /// Raw class ids, in the order `predict_probabilities` reports them
    fn classes(&self) -> &[i64];

    /// Per-class probabilities aligned with [`Classifier::classes`]
    fn predict_probabilities(&self, features: &FeatureVector) -> Vec<f64>;

    /// Most probable raw class id
    fn predict(&self, features: &FeatureVector) -> Result<i64, ClassifierError> {
        let probabilities = self.predict_probabilities(features);
        let (index, _) = arg_max(self.classes(), &probabilities)?;
        Ok(self.classes()[index])
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn classes(&self) -> &[i64] {
        (**self).classes()
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        (**self).predict_probabilities(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for std::sync::Arc<C> {
    fn classes(&self) -> &[i64] {
        (**self).classes()
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        (**self).predict_probabilities(features)
    }
}

/// Index and value of the largest probability; ties go to the lowest index
///
/// Every probability must be finite and within [0, 1].
fn arg_max(classes: &[i64], probabilities: &[f64]) -> Result<(usize, f64), ClassifierError> {
    if probabilities.len() != classes.len() || classes.is_empty() {
        return Err(ClassifierError::OutputShape {
            expected: classes.len(),
            actual: probabilities.len(),
        });
    }
    if let Some((index, &value)) = probabilities
        .iter()
        .enumerate()
        .find(|&(_, &p)| !(0.0..=1.0).contains(&p))
    {
        return Err(ClassifierError::InvalidProbability { index, value });
    }

    let mut best = (0usize, probabilities[0]);
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > best.1 {
            best = (i, p);
        }
    }
    Ok(best)
}

/// Maps classifier output to domain labels
#[derive(Debug, Clone)]
pub struct ClassificationAdapter<C> {
    classifier: C,
}

impl<C: Classifier> ClassificationAdapter<C> {
    /// Wrap a classifier, checking that every class id has a label
    ///
    /// Fails at construction so a mismatched artifact is caught at startup
    /// rather than on the first request.
    pub fn new(classifier: C) -> Result<Self, ClassifierError> {
        if classifier.classes().is_empty() {
            return Err(ClassifierError::OutputShape {
                expected: 2,
                actual: 0,
            });
        }
        for &id in classifier.classes() {
            Label::try_from(id)?;
        }
        Ok(Self { classifier })
    }

    /// Classify a feature vector
    ///
    /// Confidence is the winning probability as a percentage in [0, 100].
    pub fn classify(&self, features: &FeatureVector) -> Result<Classification, ClassifyError> {
        if features.is_insufficient_signal() {
            warn!("refusing to classify: insufficient signal");
            return Err(ClassifyError::InsufficientSignal);
        }

        let classes = self.classifier.classes();
        let probabilities = self.classifier.predict_probabilities(features);
        let (index, probability) = arg_max(classes, &probabilities)?;
        let label = Label::try_from(classes[index])?;
        let confidence = probability * 100.0;

        debug!(%label, confidence, "classified");
        Ok(Classification { label, confidence })
    }
}
