//! Presentation-boundary helpers: decoding uploads and walking datasets

use crate::error::DecodeError;
use crate::models::ColorImage;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn into_color_image(img: image::DynamicImage) -> Result<ColorImage, DecodeError> {
    Ok(ColorImage::try_from(img.to_rgb8())?)
}

/// Decode uploaded bytes (JPEG, PNG, ...) into an RGB image
///
/// Alpha is dropped. The image keeps its decoded size; features are only
/// comparable with the training set at native resolution.
pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    into_color_image(image::load_from_memory(bytes)?)
}

/// Load an image file as RGB
pub fn load_color_image<P: AsRef<Path>>(path: P) -> Result<ColorImage, DecodeError> {
    let bytes = fs::read(path)?;
    decode_color_image(&bytes)
}

/// Default dataset root from environment variables.
pub fn dataset_root_from_env() -> PathBuf {
    env::var("RECAPTURE_DATASET_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Iterate image paths under `root`, sorted, with an optional limit.
pub fn dataset_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());

    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn is_image_path(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp")
        }
        None => false,
    }
}

fn collect_images(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return if is_image_path(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if is_image_path(&path) {
                images.push(path);
            }
        }
    }

    images
}
