//! Random-forest classifier artifact stored as JSON
//!
//! ```json
//! { "n_features": 16, "classes": [0, 1],
//!   "trees": [ { "nodes": [
//!       { "feature": 4, "threshold": 0.5, "left": 1, "right": 2 },
//!       { "value": [10.0, 2.0] },
//!       { "value": [1.0, 7.0] } ] } ] }
//! ```
//!
//! A split sends `x[feature] <= threshold` left. Each tree votes with its
//! leaf's class distribution normalized to 1; the forest averages the votes.

use super::Classifier;
use crate::error::ModelError;
use crate::models::{FEATURE_LEN, FeatureVector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One node of a decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Internal node
    Split {
        /// Feature index compared at this node
        feature: usize,
        /// Values `<=` this go left
        threshold: f64,
        /// Index of the left child
        left: usize,
        /// Index of the right child
        right: usize,
    },
    /// Terminal node with per-class weights (counts or fractions)
    Leaf {
        /// Class weights aligned with the model's class list
        value: Vec<f64>,
    },
}

/// Decision tree with the root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Nodes in parent-before-child order
    pub nodes: Vec<Node>,
}

impl Tree {
    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        // Validation guarantees children are in range and strictly after
        // their parent, so this terminates.
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

/// Ensemble of decision trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<Tree>,
}

impl ForestModel {
    /// Build and validate a model from parts
    pub fn new(n_features: usize, classes: Vec<i64>, trees: Vec<Tree>) -> Result<Self, ModelError> {
        let model = Self {
            n_features,
            classes,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a JSON model
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: ForestModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a JSON model file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            trees = model.tree_count(),
            classes = ?model.classes,
            "loaded forest model"
        );
        Ok(model)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Number of trees
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features != FEATURE_LEN {
            return Err(ModelError::Invalid(format!(
                "model expects {} features, extractor produces {}",
                self.n_features, FEATURE_LEN
            )));
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("model has no classes".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("model has no trees".into()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Invalid(format!("tree {t} has no nodes")));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= self.n_features {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: feature {feature} out of range"
                            )));
                        }
                        if threshold.is_nan() {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: threshold is NaN"
                            )));
                        }
                        for &child in [left, right] {
                            if child <= i || child >= tree.nodes.len() {
                                return Err(ModelError::Invalid(format!(
                                    "tree {t} node {i}: invalid child index {child}"
                                )));
                            }
                        }
                    }
                    Node::Leaf { value } => {
                        if value.len() != self.classes.len() {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: leaf has {} weights for {} classes",
                                value.len(),
                                self.classes.len()
                            )));
                        }
                        let total: f64 = value.iter().sum();
                        if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0 {
                            return Err(ModelError::Invalid(format!(
                                "tree {t} node {i}: leaf weights must be non-negative with a positive sum"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Classifier for ForestModel {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        let mut probabilities = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(features.as_slice());
            let total: f64 = leaf.iter().sum();
            for (p, &w) in probabilities.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }

        let n = self.trees.len() as f64;
        for p in &mut probabilities {
            *p /= n;
        }
        probabilities
    }
}
