//! Image decoding with format-specific fast paths.
//!
//! JPEG uploads go through zune-jpeg (1.5-2x faster than the image crate);
//! everything else falls back to `image::load_from_memory`.

use crate::error::ScoreError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// JPEG start-of-image marker followed by the first segment's marker byte
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_MAGIC)
}

/// Decoder that picks the fastest path for the detected format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode encoded image bytes. `source_id` only labels errors.
    pub fn decode(source_id: &str, bytes: &[u8]) -> Result<DynamicImage, ScoreError> {
        if bytes.is_empty() {
            return Err(ScoreError::Decode {
                source_id: source_id.to_string(),
                reason: "no data".to_string(),
            });
        }

        if is_jpeg(bytes) {
            Self::decode_jpeg(source_id, bytes).or_else(|_| Self::decode_fallback(source_id, bytes))
        } else {
            Self::decode_fallback(source_id, bytes)
        }
    }

    fn decode_jpeg(source_id: &str, bytes: &[u8]) -> Result<DynamicImage, ScoreError> {
        let decode_error = |reason: String| ScoreError::Decode {
            source_id: source_id.to_string(),
            reason,
        };

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGBA);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder
            .decode()
            .map_err(|e| decode_error(format!("zune-jpeg decode failed: {:?}", e)))?;

        let info = decoder
            .info()
            .ok_or_else(|| decode_error("Failed to get image info".to_string()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGBA);

        let image = match out_colorspace {
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create RGBA buffer".to_string()))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create RGB buffer".to_string()))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| decode_error("Failed to create Luma buffer".to_string()))?;
                DynamicImage::ImageLuma8(buffer)
            }
            other => {
                return Err(decode_error(format!("unsupported colorspace {:?}", other)));
            }
        };

        Ok(image)
    }

    fn decode_fallback(source_id: &str, bytes: &[u8]) -> Result<DynamicImage, ScoreError> {
        image::load_from_memory(bytes).map_err(|e| ScoreError::Decode {
            source_id: source_id.to_string(),
            reason: e.to_string(),
        })
    }
}
