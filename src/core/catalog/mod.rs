//! # Catalog Module
//!
//! Scores an uploaded photo against every target in a catalog and ranks them.
//!
//! ## How It Works
//! 1. Decode and resample the candidate once
//! 2. Score every target in parallel (rayon)
//! 3. Skip targets that fail to decode, recording why
//! 4. Rank by score, best first (ties broken by target id)
//!
//! ## Example
//! ```rust,ignore
//! use marker_overlay::core::catalog::{Catalog, CatalogConfig, CatalogMatcher};
//!
//! let targets = Catalog::discover("/srv/markers".as_ref(), &CatalogConfig::default())?;
//! let matcher = CatalogMatcher::new(SimilarityScorer::default(), targets);
//! let report = matcher.match_candidate(&ImageSource::path("upload.jpg"))?;
//! ```

mod discover;
mod types;

pub use discover::{discover_targets, TargetFilter};
pub use types::{CatalogConfig, CatalogEntry, CatalogReport, CatalogTarget, TargetFailure};

use crate::core::scorer::{ImageSource, SimilarityScorer};
use crate::error::CatalogError;
use crate::events::{CatalogEvent, CatalogProgress, Event, EventSender, null_sender};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

/// Convenience constructors for target lists
pub struct Catalog;

impl Catalog {
    /// Discover targets under a directory
    pub fn discover(root: &Path, config: &CatalogConfig) -> Result<Vec<CatalogTarget>, CatalogError> {
        discover_targets(root, config)
    }
}

/// Matches candidates against a fixed set of targets
pub struct CatalogMatcher {
    scorer: SimilarityScorer,
    targets: Vec<CatalogTarget>,
    limit: Option<usize>,
}

impl CatalogMatcher {
    pub fn new(scorer: SimilarityScorer, targets: Vec<CatalogTarget>) -> Self {
        Self {
            scorer,
            targets,
            limit: None,
        }
    }

    /// Keep only the best `limit` entries in reports
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn targets(&self) -> &[CatalogTarget] {
        &self.targets
    }

    /// Match a candidate without progress reporting
    pub fn match_candidate(&self, candidate: &ImageSource) -> Result<CatalogReport, CatalogError> {
        self.match_candidate_with_events(candidate, &null_sender())
    }

    /// Match a candidate, reporting progress through `events`
    pub fn match_candidate_with_events(
        &self,
        candidate: &ImageSource,
        events: &EventSender,
    ) -> Result<CatalogReport, CatalogError> {
        let start_time = Instant::now();

        if self.targets.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let prepared = self
            .scorer
            .prepare(candidate)
            .map_err(CatalogError::Candidate)?;

        let total = self.targets.len();
        events.send(Event::Catalog(CatalogEvent::Started {
            total_targets: total,
        }));

        let completed = AtomicUsize::new(0);

        let outcomes: Vec<_> = self
            .targets
            .par_iter()
            .map(|target| {
                let outcome = self
                    .scorer
                    .prepare(&target.source)
                    .and_then(|grid| self.scorer.compare(&grid, &prepared));

                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Catalog(CatalogEvent::Progress(CatalogProgress {
                    completed: done,
                    total,
                    current_target: target.id.clone(),
                })));

                (target, outcome)
            })
            .collect();

        let mut entries = Vec::with_capacity(outcomes.len());
        let mut errors = Vec::new();
        for (target, outcome) in outcomes {
            match outcome {
                Ok(result) => entries.push(CatalogEntry {
                    target_id: target.id.clone(),
                    result,
                }),
                Err(e) => {
                    warn!(target = %target.id, error = %e, "skipping catalog target");
                    events.send(Event::Catalog(CatalogEvent::TargetFailed {
                        target_id: target.id.clone(),
                        message: e.to_string(),
                    }));
                    errors.push(TargetFailure {
                        target_id: target.id.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        entries.sort_by(|a, b| {
            b.result
                .score
                .total_cmp(&a.result.score)
                .then_with(|| a.target_id.cmp(&b.target_id))
        });
        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }

        events.send(Event::Catalog(CatalogEvent::Completed {
            best_target: entries.first().map(|e| e.target_id.clone()),
            best_score: entries.first().map(|e| e.result.score),
        }));

        Ok(CatalogReport {
            id: Uuid::new_v4(),
            candidate: prepared.source_id().to_string(),
            entries,
            errors,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use std::io::Cursor;

    fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(4, 4, Rgb(rgb));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn target(id: &str, rgb: [u8; 3]) -> CatalogTarget {
        CatalogTarget::new(id, ImageSource::bytes(id, solid_png(rgb)))
    }

    fn small_scorer() -> SimilarityScorer {
        crate::core::scorer::ScorerConfig::new()
            .grid_size(16, 16)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let matcher = CatalogMatcher::new(small_scorer(), Vec::new());
        let candidate = ImageSource::bytes("upload", solid_png([0, 0, 0]));
        assert!(matches!(
            matcher.match_candidate(&candidate),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn ranks_best_target_first() {
        let matcher = CatalogMatcher::new(
            small_scorer(),
            vec![
                target("blue", [0, 0, 255]),
                target("red", [250, 5, 5]),
                target("green", [0, 255, 0]),
            ],
        );
        let candidate = ImageSource::bytes("upload", solid_png([255, 0, 0]));

        let report = matcher.match_candidate(&candidate).unwrap();
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.best().unwrap().target_id, "red");
        assert_eq!(report.best().unwrap().result.score, 100.0);
        assert_eq!(report.matched().count(), 1);
        assert_eq!(report.candidate, "upload");
    }

    #[test]
    fn ties_are_ordered_by_id() {
        let matcher = CatalogMatcher::new(
            small_scorer(),
            vec![target("b", [0, 0, 255]), target("a", [0, 255, 0])],
        );
        let candidate = ImageSource::bytes("upload", solid_png([255, 0, 0]));

        let report = matcher.match_candidate(&candidate).unwrap();
        let ids: Vec<_> = report.entries.iter().map(|e| e.target_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn broken_targets_are_skipped_and_recorded() {
        let matcher = CatalogMatcher::new(
            small_scorer(),
            vec![
                target("good", [255, 0, 0]),
                CatalogTarget::new("broken", ImageSource::bytes("broken", b"nope".to_vec())),
            ],
        );
        let candidate = ImageSource::bytes("upload", solid_png([255, 0, 0]));

        let report = matcher.match_candidate(&candidate).unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].target_id, "broken");
    }

    #[test]
    fn undecodable_candidate_aborts() {
        let matcher = CatalogMatcher::new(small_scorer(), vec![target("red", [255, 0, 0])]);
        let candidate = ImageSource::bytes("upload", b"nope".to_vec());
        assert!(matches!(
            matcher.match_candidate(&candidate),
            Err(CatalogError::Candidate(_))
        ));
    }

    #[test]
    fn limit_truncates_entries() {
        let matcher = CatalogMatcher::new(
            small_scorer(),
            vec![target("a", [0, 0, 0]), target("b", [9, 9, 9]), target("c", [255, 255, 255])],
        )
        .with_limit(Some(2));
        let candidate = ImageSource::bytes("upload", solid_png([0, 0, 0]));

        let report = matcher.match_candidate(&candidate).unwrap();
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn emits_started_progress_and_completed() {
        let (sender, receiver) = EventChannel::new();
        let matcher = CatalogMatcher::new(
            small_scorer(),
            vec![target("red", [255, 0, 0]), target("blue", [0, 0, 255])],
        );
        let candidate = ImageSource::bytes("upload", solid_png([255, 0, 0]));

        matcher
            .match_candidate_with_events(&candidate, &sender)
            .unwrap();
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.first(),
            Some(Event::Catalog(CatalogEvent::Started { total_targets: 2 }))
        ));
        let progress = events
            .iter()
            .filter(|e| matches!(e, Event::Catalog(CatalogEvent::Progress(_))))
            .count();
        assert_eq!(progress, 2);
        match events.last() {
            Some(Event::Catalog(CatalogEvent::Completed { best_target, .. })) => {
                assert_eq!(best_target.as_deref(), Some("red"));
            }
            other => panic!("Expected Completed event, got {:?}", other),
        }
    }
}
