use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_recapture::utils::lbp::uniform_lbp;
use qr_recapture::{ColorImage, FeatureExtractor};

/// Checkerboard of 8px modules, bright and dark, like a QR code
fn qr_like(width: usize, height: usize) -> ColorImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 8 + y / 8) % 2 == 0 { 235 } else { 25 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    ColorImage::from_rgb(data, width, height).expect("valid image")
}

fn bench_extract_medium(c: &mut Criterion) {
    let image = qr_like(640, 480);
    let extractor = FeatureExtractor::with_white_threshold(200);
    c.bench_function("extract_640x480", |b| b.iter(|| extractor.extract(black_box(&image))));
}

fn bench_extract_large(c: &mut Criterion) {
    let image = qr_like(1920, 1080);
    let extractor = FeatureExtractor::with_white_threshold(200);
    c.bench_function("extract_1920x1080", |b| b.iter(|| extractor.extract(black_box(&image))));
}

fn bench_extract_sentinel(c: &mut Criterion) {
    let image = ColorImage::filled(640, 480, [128, 128, 128]).expect("valid image");
    let extractor = FeatureExtractor::with_white_threshold(200);
    c.bench_function("extract_640x480_no_white", |b| {
        b.iter(|| extractor.extract(black_box(&image)))
    });
}

fn bench_lbp_medium(c: &mut Criterion) {
    let gray: Vec<u8> = (0..640 * 480).map(|i| (i % 251) as u8).collect();
    c.bench_function("uniform_lbp_640x480", |b| {
        b.iter(|| uniform_lbp(black_box(&gray), black_box(640), black_box(480)))
    });
}

criterion_group!(
    benches,
    bench_extract_medium,
    bench_extract_large,
    bench_extract_sentinel,
    bench_lbp_medium
);
criterion_main!(benches);
