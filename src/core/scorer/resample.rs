//! SIMD-accelerated resampling onto the comparison grid.
//!
//! Each source is stretched independently to the grid size, ignoring its
//! aspect ratio. The filter is pinned to bilinear convolution so two runs over
//! the same pixels always produce the same grid.

use super::source::ImageSample;
use crate::error::ScoreError;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};

/// Resizes RGBA samples to a fixed grid
pub struct GridResampler {
    resizer: Resizer,
    width: u32,
    height: u32,
}

impl GridResampler {
    /// Create a resampler targeting a `width` x `height` grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resizer: Resizer::new(),
            width,
            height,
        }
    }

    /// Resample `sample` onto the grid, returning the raw RGBA buffer.
    pub fn resample(&mut self, sample: &ImageSample) -> Result<Vec<u8>, ScoreError> {
        let resize_error = |reason: String| ScoreError::Decode {
            source_id: sample.source_id().to_string(),
            reason,
        };

        if sample.is_empty() {
            return Err(ScoreError::EmptyInput {
                source_id: sample.source_id().to_string(),
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(ScoreError::InvalidConfig(
                "comparison grid must be at least 1x1".to_string(),
            ));
        }

        if sample.width() == self.width && sample.height() == self.height {
            return Ok(sample.rgba().to_vec());
        }

        let src_image = Image::from_vec_u8(
            sample.width(),
            sample.height(),
            sample.rgba().to_vec(),
            PixelType::U8x4,
        )
        .map_err(|e| resize_error(format!("Failed to create source image: {}", e)))?;

        let mut dst_image = Image::new(self.width, self.height, PixelType::U8x4);

        // Alpha is ignored by the comparison, so it must not weight the colour channels
        let options = ResizeOptions::new()
            .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear))
            .use_alpha(false);

        self.resizer
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| resize_error(format!("Resize failed: {}", e)))?;

        Ok(dst_image.into_vec())
    }
}
