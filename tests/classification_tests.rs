//! End-to-end classification: synthetic images through the extractor,
//! the adapter and a forest model loaded from disk.

use qr_recapture::{
    ClassificationAdapter, Classifier, ClassifierError, ClassifyError, ColorImage,
    FeatureExtractor, FeatureVector, ForestModel, Label, ModelError, Pipeline,
};
use std::io::{Cursor, Write};

/// Always predicts class 0 with probability 0.9
struct MockClassifier;

impl Classifier for MockClassifier {
    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn predict_probabilities(&self, _features: &FeatureVector) -> Vec<f64> {
        vec![0.9, 0.1]
    }
}

const MODEL: &str = r#"{
    "n_features": 16,
    "classes": [0, 1],
    "trees": [
        { "nodes": [
            { "feature": 1, "threshold": 5.0, "left": 1, "right": 2 },
            { "value": [30.0, 10.0] },
            { "value": [5.0, 15.0] }
        ] },
        { "nodes": [
            { "feature": 15, "threshold": 2.0, "left": 1, "right": 2 },
            { "value": [0.8, 0.2] },
            { "value": [0.1, 0.9] }
        ] }
    ]
}"#;

fn model_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(MODEL.as_bytes()).expect("write model");
    file
}

fn png(image: image::RgbImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .expect("encode png");
    out.into_inner()
}

#[test]
fn test_uniform_gray_is_insufficient_signal() {
    let image = ColorImage::filled(100, 100, [128, 128, 128]).unwrap();
    let features = FeatureExtractor::with_white_threshold(200).extract(&image);
    assert!(features.is_insufficient_signal());

    let adapter = ClassificationAdapter::new(MockClassifier).unwrap();
    assert_eq!(
        adapter.classify(&features),
        Err(ClassifyError::InsufficientSignal)
    );
}

#[test]
fn test_pure_white_is_classified() {
    let image = ColorImage::filled(100, 100, [255, 255, 255]).unwrap();
    let features = FeatureExtractor::with_white_threshold(200).extract(&image);
    assert_eq!(features.white_ratio(), 1.0);
    assert_eq!(features.mean(), 255.0);
    assert_eq!(features.std_dev(), 0.0);
    assert_eq!(features.min(), 255.0);
    assert_eq!(features.max(), 255.0);
    assert_eq!(features.entropy(), 0.0);

    let model = ForestModel::load(model_file().path()).unwrap();
    let adapter = ClassificationAdapter::new(model).unwrap();
    let result = adapter.classify(&features).unwrap();
    assert!((0.0..=100.0).contains(&result.confidence));
    // std-dev 0 and entropy 0 both vote original: (0.75 + 0.8) / 2
    assert_eq!(result.label, Label::Original);
    assert!((result.confidence - 77.5).abs() < 1e-9);
}

#[test]
fn test_mock_classifier_mapping() {
    let adapter = ClassificationAdapter::new(MockClassifier).unwrap();
    let mut values = [0.0; 16];
    values[0] = 210.0;
    values[4] = 0.3;
    let result = adapter.classify(&FeatureVector::from_array(values)).unwrap();
    assert_eq!(result.label, Label::Original);
    assert_eq!(result.label.as_str(), "Original");
    assert!((result.confidence - 90.0).abs() < 1e-9);
}

#[test]
fn test_png_upload_end_to_end() {
    // Bright noisy region on the left, dark on the right
    let image = image::RgbImage::from_fn(80, 60, |x, y| {
        if x < 40 {
            let v = 205 + ((x * 7 + y * 13) % 50) as u8;
            image::Rgb([v, v, v])
        } else {
            image::Rgb([15, 15, 15])
        }
    });
    let pipeline = Pipeline::new(
        FeatureExtractor::with_white_threshold(200),
        ForestModel::load(model_file().path()).unwrap(),
    )
    .unwrap();

    let result = pipeline.classify_bytes(&png(image)).unwrap();
    // High spread and entropy both vote recaptured: (0.75 + 0.9) / 2
    assert_eq!(result.label, Label::Recaptured);
    assert!((result.confidence - 82.5).abs() < 1e-9);

    let json = serde_json::to_value(result).unwrap();
    assert_eq!(json["result"], "Recaptured");
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let white = dir.path().join("a_white.png");
    let gray = dir.path().join("b_gray.png");
    let broken = dir.path().join("c_broken.png");
    let solid = |v: u8| png(image::RgbImage::from_pixel(10, 10, image::Rgb([v, v, v])));
    std::fs::write(&white, solid(255)).unwrap();
    std::fs::write(&gray, solid(90)).unwrap();
    std::fs::write(&broken, b"not a png").unwrap();

    let pipeline = Pipeline::new(
        FeatureExtractor::with_white_threshold(200),
        ForestModel::from_json(MODEL).unwrap(),
    )
    .unwrap();
    let paths: Vec<_> = qr_recapture::tools::dataset_iter(dir.path(), None).collect();
    let items = pipeline.classify_batch(paths);

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].path, white);
    assert!(items[0].outcome.is_ok());
    assert_eq!(items[1].path, gray);
    assert!(items[1].outcome.as_ref().unwrap_err().is_insufficient_signal());
    assert_eq!(items[2].path, broken);
    assert!(items[2].features.is_none());

    let summary = qr_recapture::BatchSummary::from_items(&items);
    assert_eq!(summary.original, 1);
    assert_eq!(summary.insufficient_signal, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_model_errors_surface_at_load() {
    assert!(matches!(
        ForestModel::load("/definitely/missing/model.json"),
        Err(ModelError::Io(_))
    ));

    let bad_class = MODEL.replace("\"classes\": [0, 1]", "\"classes\": [0, 7]");
    let model = ForestModel::from_json(&bad_class).unwrap();
    assert_eq!(
        ClassificationAdapter::new(model).unwrap_err(),
        ClassifierError::UnknownClass(7)
    );
}

#[test]
fn test_adapter_is_shareable_across_threads() {
    let adapter = std::sync::Arc::new(ClassificationAdapter::new(MockClassifier).unwrap());
    let image = ColorImage::filled(16, 16, [250, 250, 250]).unwrap();
    let features = FeatureExtractor::with_white_threshold(200).extract(&image);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let adapter = adapter.clone();
            std::thread::spawn(move || adapter.classify(&features).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().label, Label::Original);
    }
}
