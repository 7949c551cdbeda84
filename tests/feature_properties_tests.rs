//! Properties of the white-region feature vector on synthetic images.

use qr_recapture::{ColorImage, FEATURE_LEN, FeatureExtractor, FeatureVector};

fn extractor() -> FeatureExtractor {
    FeatureExtractor::with_white_threshold(200)
}

/// Deterministic pseudo-random noise image (LCG), biased bright
fn noise_image(width: usize, height: usize, seed: u32) -> ColorImage {
    let mut state = seed;
    let mut data = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height * 3 {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        data.push(120 + (state >> 24) as u8 % 136);
    }
    ColorImage::from_rgb(data, width, height).expect("valid image")
}

/// QR-like pattern: 5px modules alternating bright and dark
fn qr_like(width: usize, height: usize) -> ColorImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 5 + y / 5) % 2 == 0 { 230 } else { 30 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    ColorImage::from_rgb(data, width, height).expect("valid image")
}

#[test]
fn test_extraction_is_deterministic() {
    let image = noise_image(64, 48, 7);
    let a = extractor().extract(&image);
    let b = extractor().extract(&image);
    assert_eq!(a.to_array(), b.to_array());
}

#[test]
fn test_fixed_length_regardless_of_size() {
    for (w, h) in [(1, 1), (3, 2), (100, 7), (33, 65)] {
        let v = extractor().extract(&noise_image(w, h, 3));
        assert_eq!(v.as_slice().len(), FEATURE_LEN);
    }
}

#[test]
fn test_all_black_is_zero_vector() {
    let image = ColorImage::filled(50, 50, [0, 0, 0]).unwrap();
    let v = extractor().extract(&image);
    assert_eq!(v.to_array(), [0.0; FEATURE_LEN]);
    assert_eq!(v, FeatureVector::INSUFFICIENT_SIGNAL);
}

#[test]
fn test_histogram_sums_to_one() {
    let images = [
        noise_image(40, 40, 1),
        noise_image(17, 91, 2),
        qr_like(60, 45),
        ColorImage::filled(9, 9, [255, 255, 255]).unwrap(),
    ];
    for image in &images {
        let v = extractor().extract(image);
        assert!(!v.is_insufficient_signal());
        let sum: f64 = v.lbp_histogram().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "histogram sum was {sum}");
        assert!(v.lbp_histogram().iter().all(|&b| (0.0..=1.0).contains(&b)));
    }
}

#[test]
fn test_white_ratio_bounds() {
    let white = ColorImage::filled(30, 30, [255, 255, 255]).unwrap();
    assert_eq!(extractor().extract(&white).white_ratio(), 1.0);

    let dark = ColorImage::filled(30, 30, [199, 199, 199]).unwrap();
    assert_eq!(extractor().extract(&dark).white_ratio(), 0.0);

    // 5px modules on a 60x45 grid: half of the modules are bright
    let v = extractor().extract(&qr_like(60, 45));
    assert!(v.white_ratio() > 0.4 && v.white_ratio() < 0.6);
}

#[test]
fn test_threshold_is_strict() {
    let at = ColorImage::filled(20, 20, [200, 200, 200]).unwrap();
    assert!(extractor().extract(&at).is_insufficient_signal());

    let above = ColorImage::filled(20, 20, [201, 201, 201]).unwrap();
    let v = extractor().extract(&above);
    assert_eq!(v.white_ratio(), 1.0);
    assert_eq!(v.min(), 201.0);
    assert_eq!(v.max(), 201.0);
}

#[test]
fn test_threshold_is_configurable() {
    let image = ColorImage::filled(20, 20, [150, 150, 150]).unwrap();
    assert!(extractor().extract(&image).is_insufficient_signal());
    let v = FeatureExtractor::with_white_threshold(100).extract(&image);
    assert_eq!(v.white_ratio(), 1.0);
    assert_eq!(v.mean(), 150.0);
}

#[test]
fn test_statistics_describe_only_white_pixels() {
    let v = extractor().extract(&qr_like(50, 50));
    assert_eq!(v.mean(), 230.0);
    assert_eq!(v.std_dev(), 0.0);
    assert_eq!(v.min(), 230.0);
    assert_eq!(v.max(), 230.0);
    assert_eq!(v.entropy(), 0.0);
}

#[test]
fn test_entropy_grows_with_spread() {
    let flat = extractor().extract(&ColorImage::filled(32, 32, [240, 240, 240]).unwrap());
    let noisy = extractor().extract(&noise_image(32, 32, 11));
    assert_eq!(flat.entropy(), 0.0);
    assert!(noisy.entropy() > 1.0);
    assert!(noisy.entropy() <= 8.0);
}

#[test]
fn test_large_image_uses_parallel_path_consistently() {
    // 600x500 is above the parallel cut-over
    let big = qr_like(600, 500);
    let v1 = extractor().extract(&big);
    let v2 = extractor().extract(&big);
    assert_eq!(v1, v2);
    assert_eq!(v1.mean(), 230.0);
    let sum: f64 = v1.lbp_histogram().iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
}
