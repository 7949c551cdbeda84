use crate::classifier::{ClassificationAdapter, Classifier};
use crate::error::{ClassifierError, PipelineError};
use crate::features::FeatureExtractor;
use crate::models::{Classification, ColorImage, FeatureVector};
use crate::tools::{decode_color_image, load_color_image};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decode -> extract -> classify, one image at a time
///
/// Holds no per-request state; a single pipeline can serve concurrent
/// callers by shared reference.
#[derive(Debug, Clone)]
pub struct Pipeline<C> {
    extractor: FeatureExtractor,
    adapter: ClassificationAdapter<C>,
}

/// Result for one entry of a batch
#[derive(Debug)]
pub struct BatchItem {
    /// Source image
    pub path: PathBuf,
    /// Features, when the image could be decoded
    pub features: Option<FeatureVector>,
    /// Classification or the reason there is none
    pub outcome: Result<Classification, PipelineError>,
}

impl<C: Classifier> Pipeline<C> {
    /// Build a pipeline around a loaded classifier
    pub fn new(extractor: FeatureExtractor, classifier: C) -> Result<Self, ClassifierError> {
        Ok(Self {
            extractor,
            adapter: ClassificationAdapter::new(classifier)?,
        })
    }

    /// Extract and classify a decoded image
    pub fn classify_image(&self, image: &ColorImage) -> Result<Classification, PipelineError> {
        let features = self.extractor.extract(image);
        Ok(self.adapter.classify(&features)?)
    }

    /// Decode uploaded bytes, then classify
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<Classification, PipelineError> {
        let image = decode_color_image(bytes)?;
        self.classify_image(&image)
    }

    /// Load an image file, then classify
    pub fn classify_path<P: AsRef<Path>>(&self, path: P) -> Result<Classification, PipelineError> {
        let image = load_color_image(path)?;
        self.classify_image(&image)
    }

    fn run_item(&self, path: PathBuf) -> BatchItem {
        let image = match load_color_image(&path) {
            Ok(image) => image,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable image");
                return BatchItem {
                    path,
                    features: None,
                    outcome: Err(err.into()),
                };
            }
        };

        let features = self.extractor.extract(&image);
        let outcome = self.adapter.classify(&features).map_err(PipelineError::from);
        debug!(path = %path.display(), ok = outcome.is_ok(), "batch item done");

        BatchItem {
            path,
            features: Some(features),
            outcome,
        }
    }

    /// Classify many files in parallel
    ///
    /// Output order matches input order. A failing item never aborts the
    /// batch; its error is reported in place.
    pub fn classify_batch<I>(&self, paths: I) -> Vec<BatchItem>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().collect();
        paths
            .into_par_iter()
            .map(|path| self.run_item(path))
            .collect()
    }
}

/// Tally of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images processed
    pub total: usize,
    /// Classified as original
    pub original: usize,
    /// Classified as recaptured
    pub recaptured: usize,
    /// Rejected for lack of white region
    pub insufficient_signal: usize,
    /// Decode or classifier failures
    pub failed: usize,
}

impl BatchSummary {
    /// Count outcomes
    pub fn from_items(items: &[BatchItem]) -> Self {
        use crate::models::Label;

        let mut summary = BatchSummary {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            match &item.outcome {
                Ok(c) if c.label == Label::Original => summary.original += 1,
                Ok(_) => summary.recaptured += 1,
                Err(e) if e.is_insufficient_signal() => summary.insufficient_signal += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}
