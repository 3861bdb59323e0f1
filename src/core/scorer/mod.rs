//! # Scorer Module
//!
//! Compares two images pixel by pixel and reports how closely they match.
//!
//! ## How It Works
//! 1. Decode both sources (concurrently, joined before comparing)
//! 2. Stretch each one onto a fixed 224x224 grid with a bilinear filter
//! 3. Measure the RGB distance at every grid position
//! 4. Score = percentage of positions closer than 30
//!
//! ## Score Bands
//! | Score      | Band      |
//! |------------|-----------|
//! | > 90       | Excellent |
//! | > 75       | Good      |
//! | > 50       | Partial   |
//! | otherwise  | Poor      |
//!
//! Stretching ignores aspect ratio, so a non-square photo of a square marker
//! is distorted before comparison and scores lower than the framing alone
//! would suggest. That is the documented behaviour, not something to correct.
//!
//! ## Example
//! ```rust,ignore
//! use marker_overlay::core::scorer::{ImageSource, ScorerConfig};
//!
//! let scorer = ScorerConfig::new().build()?;
//! let result = scorer.score(&ImageSource::path("target.png"), &ImageSource::path("upload.jpg"))?;
//! println!("{:.1}% - {}", result.score, result.band);
//! ```

mod distance;
mod encoded;
mod fast_decode;
mod resample;
mod source;
mod types;

pub use distance::{color_distance, count_matching_pixels, MAX_RGB_DISTANCE};
pub use resample::GridResampler;
pub use source::{ImageSample, ImageSource};
pub use types::{MatchBand, MatchResult};

use crate::error::ScoreError;
use crate::events::{Event, EventSender, ScoreEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the similarity scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Comparison grid width
    pub grid_width: u32,
    /// Comparison grid height
    pub grid_height: u32,
    /// RGB distance below which two pixels count as matching
    pub pixel_threshold: f64,
    /// Score above which a comparison is reported as matched
    pub match_threshold: f64,
}

impl ScorerConfig {
    /// Create a configuration with the standard 224x224 grid and thresholds
    pub fn new() -> Self {
        Self {
            grid_width: 224,
            grid_height: 224,
            pixel_threshold: 30.0,
            match_threshold: 75.0,
        }
    }

    /// Set the comparison grid size
    pub fn grid_size(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Set the per-pixel colour distance threshold
    pub fn pixel_threshold(mut self, threshold: f64) -> Self {
        self.pixel_threshold = threshold;
        self
    }

    /// Set the score a comparison must exceed to be matched
    pub fn match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ScoreError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if !(self.pixel_threshold.is_finite() && self.pixel_threshold >= 0.0) {
            return Err(ScoreError::InvalidConfig(format!(
                "pixel threshold must be a non-negative number, got {}",
                self.pixel_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.match_threshold) {
            return Err(ScoreError::InvalidConfig(format!(
                "match threshold must be between 0 and 100, got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }

    /// Build the scorer
    pub fn build(self) -> Result<SimilarityScorer, ScoreError> {
        self.validate()?;
        Ok(SimilarityScorer { config: self })
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// An image resampled onto the comparison grid, ready to be scored
#[derive(Debug, Clone)]
pub struct PreparedImage {
    source_id: String,
    width: u32,
    height: u32,
    grid: Vec<u8>,
}

impl PreparedImage {
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Grid dimensions this image was resampled to
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Pixel-similarity scorer.
///
/// Holds only configuration; every call allocates its own buffers, so one
/// scorer can serve many threads at once.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    config: ScorerConfig,
}

impl SimilarityScorer {
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score `candidate` against `target`.
    ///
    /// The two sources are decoded in parallel; comparison starts once both
    /// are ready. Any decode failure aborts with no partial result.
    pub fn score(
        &self,
        target: &ImageSource,
        candidate: &ImageSource,
    ) -> Result<MatchResult, ScoreError> {
        let (target, candidate) =
            rayon::join(|| self.prepare(target), || self.prepare(candidate));
        self.compare(&target?, &candidate?)
    }

    /// Same as [`score`](Self::score), reporting start and outcome as events
    pub fn score_with_events(
        &self,
        target: &ImageSource,
        candidate: &ImageSource,
        events: &EventSender,
    ) -> Result<MatchResult, ScoreError> {
        events.send(Event::Score(ScoreEvent::Started {
            target: target.id(),
            candidate: candidate.id(),
        }));

        match self.score(target, candidate) {
            Ok(result) => {
                events.send(Event::Score(ScoreEvent::Completed {
                    score: result.score,
                    matched: result.matched,
                }));
                Ok(result)
            }
            Err(e) => {
                events.send(Event::Score(ScoreEvent::Failed {
                    message: e.to_string(),
                }));
                Err(e)
            }
        }
    }

    /// Score two already-decoded samples
    pub fn score_samples(
        &self,
        target: &ImageSample,
        candidate: &ImageSample,
    ) -> Result<MatchResult, ScoreError> {
        let target = self.prepare_sample(target)?;
        let candidate = self.prepare_sample(candidate)?;
        self.compare(&target, &candidate)
    }

    /// Decode a source and resample it onto the grid
    pub fn prepare(&self, source: &ImageSource) -> Result<PreparedImage, ScoreError> {
        let sample = source.load()?;
        self.prepare_sample(&sample)
    }

    /// Resample a decoded sample onto the grid
    pub fn prepare_sample(&self, sample: &ImageSample) -> Result<PreparedImage, ScoreError> {
        let mut resampler = GridResampler::new(self.config.grid_width, self.config.grid_height);
        let grid = resampler.resample(sample)?;
        Ok(PreparedImage {
            source_id: sample.source_id().to_string(),
            width: self.config.grid_width,
            height: self.config.grid_height,
            grid,
        })
    }

    /// Compare two prepared grids.
    ///
    /// Both must have been prepared on this scorer's grid size; anything else
    /// is rejected as `InvalidConfig` rather than scored.
    pub fn compare(
        &self,
        target: &PreparedImage,
        candidate: &PreparedImage,
    ) -> Result<MatchResult, ScoreError> {
        let expected = (self.config.grid_width, self.config.grid_height);
        for image in [target, candidate] {
            if image.dimensions() != expected {
                return Err(ScoreError::InvalidConfig(format!(
                    "{} was prepared on a {}x{} grid, scorer expects {}x{}",
                    image.source_id, image.width, image.height, expected.0, expected.1
                )));
            }
        }

        let total = u64::from(self.config.grid_width) * u64::from(self.config.grid_height);
        let matching =
            count_matching_pixels(&target.grid, &candidate.grid, self.config.pixel_threshold);
        let result = MatchResult::from_counts(matching, total, self.config.match_threshold);

        debug!(
            target = target.source_id(),
            candidate = candidate.source_id(),
            score = result.score,
            band = %result.band,
            "compared images"
        );

        Ok(result)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self {
            config: ScorerConfig::default(),
        }
    }
}
