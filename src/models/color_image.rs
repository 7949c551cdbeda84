//! Validated 3-channel input images

use crate::error::InvalidImageError;

/// Interleaved channel layout of a 3-channel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelOrder {
    /// Red, green, blue (what `image` decodes to)
    #[default]
    Rgb,
    /// Blue, green, red (OpenCV convention)
    Bgr,
}

/// Validated 8-bit, 3-channel image
///
/// Construction guarantees `width > 0`, `height > 0` and a buffer of exactly
/// `width * height * 3` bytes, so the extractor never sees a malformed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    width: usize,
    height: usize,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl ColorImage {
    /// Wrap an interleaved buffer with the given channel order
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        order: ChannelOrder,
    ) -> Result<Self, InvalidImageError> {
        validate_dimensions(data.len(), width, height)?;
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    /// Wrap an RGB buffer
    pub fn from_rgb(data: Vec<u8>, width: usize, height: usize) -> Result<Self, InvalidImageError> {
        Self::new(data, width, height, ChannelOrder::Rgb)
    }

    /// Wrap a BGR buffer
    pub fn from_bgr(data: Vec<u8>, width: usize, height: usize) -> Result<Self, InvalidImageError> {
        Self::new(data, width, height, ChannelOrder::Bgr)
    }

    /// Uniform image where every pixel is `pixel` (in RGB order)
    pub fn filled(width: usize, height: usize, pixel: [u8; 3]) -> Result<Self, InvalidImageError> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * 3)
            .collect();
        Self::from_rgb(data, width, height)
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Channel order of the raw buffer
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Raw interleaved bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<image::RgbImage> for ColorImage {
    type Error = InvalidImageError;

    fn try_from(rgb: image::RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = rgb.dimensions();
        Self::from_rgb(rgb.into_raw(), width as usize, height as usize)
    }
}

pub(crate) fn validate_dimensions(
    len: usize,
    width: usize,
    height: usize,
) -> Result<(), InvalidImageError> {
    if width == 0 || height == 0 {
        return Err(InvalidImageError::EmptyDimensions(width, height));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|p| p.checked_mul(3))
        .ok_or(InvalidImageError::EmptyDimensions(width, height))?;
    if len != expected {
        return Err(InvalidImageError::BufferLength {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}
