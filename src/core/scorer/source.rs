//! Image sources and decoded samples.

use super::encoded::EncodedImage;
use crate::error::ScoreError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an image's encoded bytes come from.
///
/// The scorer only needs "bytes -> raster"; uploads and remote fetches hand
/// their payloads over as `Bytes`.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// An image file on disk
    Path(PathBuf),
    /// An encoded image already in memory
    Bytes { id: String, data: Arc<[u8]> },
}

impl ImageSource {
    /// Source backed by a file
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Source backed by an in-memory buffer
    pub fn bytes(id: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Identifier used in errors and reports
    pub fn id(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { id, .. } => id.clone(),
        }
    }

    /// Decode the source into an RGBA sample
    pub fn load(&self) -> Result<ImageSample, ScoreError> {
        match self {
            Self::Path(path) => EncodedImage::open(path)?.decode(),
            Self::Bytes { id, data } => EncodedImage::in_memory(id, data).decode(),
        }
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// A decoded raster: dimensions plus a tightly packed RGBA buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSample {
    source_id: String,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl ImageSample {
    /// Build a sample from a decoded image, rejecting zero-pixel rasters
    pub fn from_image(source_id: impl Into<String>, image: &DynamicImage) -> Result<Self, ScoreError> {
        let source_id = source_id.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(ScoreError::EmptyInput { source_id });
        }

        Ok(Self {
            source_id,
            width: image.width(),
            height: image.height(),
            rgba: image.to_rgba8().into_raw(),
        })
    }

    /// Build a sample from raw RGBA bytes
    pub fn from_rgba(
        source_id: impl Into<String>,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> Result<Self, ScoreError> {
        let source_id = source_id.into();
        if width == 0 || height == 0 {
            return Err(ScoreError::EmptyInput { source_id });
        }

        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ScoreError::Decode {
                source_id,
                reason: format!(
                    "RGBA buffer has {} bytes, expected {} for {}x{}",
                    rgba.len(),
                    expected,
                    width,
                    height
                ),
            });
        }

        Ok(Self {
            source_id,
            width,
            height,
            rgba,
        })
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }
}
