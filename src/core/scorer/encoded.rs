//! Encoded image bytes on their way to the decoder.
//!
//! Catalog targets are often full-resolution print masters, so files larger
//! than [`MAP_ABOVE_BYTES`] are mapped rather than copied onto the heap.
//! Uploads already in memory are borrowed as-is.

use super::fast_decode::FastDecoder;
use super::source::ImageSample;
use crate::error::ScoreError;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Files strictly larger than this are memory-mapped
pub(crate) const MAP_ABOVE_BYTES: u64 = 1024 * 1024;

enum Backing<'a> {
    Borrowed(&'a [u8]),
    Heap(Vec<u8>),
    Mapped(Mmap),
}

/// Still-encoded image data, labelled with the id errors should report
pub(crate) struct EncodedImage<'a> {
    source_id: String,
    backing: Backing<'a>,
}

impl EncodedImage<'static> {
    /// Open an image file. The handle is opened once and sized from its own
    /// metadata, so a file swapped between stat and read can't be mis-sized.
    pub(crate) fn open(path: &Path) -> Result<Self, ScoreError> {
        let io_error = |source| ScoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();

        let backing = if len > MAP_ABOVE_BYTES {
            // SAFETY: read-only mapping, owned by `Backing` and never
            // exposed past the borrow in `as_bytes`.
            Backing::Mapped(unsafe { Mmap::map(&file) }.map_err(io_error)?)
        } else {
            let mut bytes = Vec::with_capacity(len as usize);
            file.read_to_end(&mut bytes).map_err(io_error)?;
            Backing::Heap(bytes)
        };

        Ok(Self {
            source_id: path.display().to_string(),
            backing,
        })
    }
}

impl<'a> EncodedImage<'a> {
    /// Wrap bytes the caller already holds
    pub(crate) fn in_memory(source_id: &str, data: &'a [u8]) -> Self {
        Self {
            source_id: source_id.to_string(),
            backing: Backing::Borrowed(data),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Borrowed(bytes) => bytes,
            Backing::Heap(bytes) => bytes,
            Backing::Mapped(map) => map,
        }
    }

    pub(crate) fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }

    /// Decode into an RGBA sample; failures name this image's source id
    pub(crate) fn decode(&self) -> Result<ImageSample, ScoreError> {
        let image = FastDecoder::decode(&self.source_id, self.as_bytes())?;
        ImageSample::from_image(self.source_id.clone(), &image)
    }
}
