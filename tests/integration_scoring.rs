//! Integration tests for similarity scoring and catalog matching.
//!
//! These tests write real image files to a temporary directory and go
//! through the public API end to end:
//! - Identical, opposite and symmetric comparisons
//! - Corrupt and missing files
//! - Catalog discovery and ranking

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use marker_overlay::core::catalog::{Catalog, CatalogConfig, CatalogMatcher};
use marker_overlay::core::scorer::{ImageSource, MatchBand, ScorerConfig, SimilarityScorer};
use marker_overlay::error::{CatalogError, ScoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str, image: RgbImage) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::ImageRgb8(image).save(&path).unwrap();
    path
}

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    ImageBuffer::from_pixel(width, height, Rgb(rgb))
}

fn checkerboard(size: u32, cell: u32) -> RgbImage {
    ImageBuffer::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgb([20, 20, 20])
        } else {
            Rgb([235, 235, 235])
        }
    })
}

#[test]
fn identical_files_score_100() {
    let dir = TempDir::new().unwrap();
    let path = write_image(dir.path(), "marker.png", checkerboard(300, 30));

    let scorer = SimilarityScorer::default();
    let source = ImageSource::path(&path);
    let result = scorer.score(&source, &source).unwrap();

    assert_eq!(result.score, 100.0);
    assert!(result.matched);
    assert_eq!(result.band, MatchBand::Excellent);
}

#[test]
fn red_versus_blue_is_a_poor_match() {
    let dir = TempDir::new().unwrap();
    let red = write_image(dir.path(), "red.png", solid(1, 1, [255, 0, 0]));
    let blue = write_image(dir.path(), "blue.png", solid(1, 1, [0, 0, 255]));

    let result = SimilarityScorer::default()
        .score(&ImageSource::path(&red), &ImageSource::path(&blue))
        .unwrap();

    assert_eq!(result.score, 0.0);
    assert!(!result.matched);
    assert_eq!(result.band.to_string(), "Poor Match");
}

#[test]
fn different_sizes_of_the_same_colour_match() {
    let dir = TempDir::new().unwrap();
    let wide = write_image(dir.path(), "wide.png", solid(400, 100, [40, 120, 200]));
    let tall = write_image(dir.path(), "tall.png", solid(50, 500, [40, 120, 200]));

    let result = SimilarityScorer::default()
        .score(&ImageSource::path(&wide), &ImageSource::path(&tall))
        .unwrap();
    assert_eq!(result.score, 100.0);
}

#[test]
fn scores_are_symmetric() {
    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", checkerboard(200, 25));
    let b = write_image(dir.path(), "b.png", checkerboard(180, 40));

    let scorer = SimilarityScorer::default();
    let ab = scorer
        .score(&ImageSource::path(&a), &ImageSource::path(&b))
        .unwrap();
    let ba = scorer
        .score(&ImageSource::path(&b), &ImageSource::path(&a))
        .unwrap();

    assert_eq!(ab.score, ba.score);
    assert!(ab.score > 0.0 && ab.score < 100.0);
}

#[test]
fn jpeg_upload_of_the_target_still_matches() {
    let dir = TempDir::new().unwrap();
    let target = write_image(dir.path(), "target.png", checkerboard(256, 64));
    let upload = write_image(dir.path(), "upload.jpg", checkerboard(256, 64));

    let result = SimilarityScorer::default()
        .score(&ImageSource::path(&target), &ImageSource::path(&upload))
        .unwrap();
    assert!(result.matched, "score was {}", result.score);
}

#[test]
fn corrupt_file_is_a_decode_error() {
    let dir = TempDir::new().unwrap();
    let good = write_image(dir.path(), "good.png", solid(4, 4, [0, 0, 0]));
    let corrupt = dir.path().join("corrupt.jpg");
    fs::write(&corrupt, b"this is not a valid image file").unwrap();

    let result = SimilarityScorer::default()
        .score(&ImageSource::path(&good), &ImageSource::path(&corrupt));

    match result {
        Err(ScoreError::Decode { source_id, .. }) => assert!(source_id.contains("corrupt.jpg")),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[test]
fn missing_file_fails_the_comparison() {
    let dir = TempDir::new().unwrap();
    let good = write_image(dir.path(), "good.png", solid(4, 4, [0, 0, 0]));

    let result = SimilarityScorer::default().score(
        &ImageSource::path(&good),
        &ImageSource::path(dir.path().join("missing.png")),
    );
    assert!(matches!(result, Err(ScoreError::Io { .. })));
}

#[test]
fn concurrent_comparisons_agree() {
    let dir = TempDir::new().unwrap();
    let a = write_image(dir.path(), "a.png", checkerboard(120, 15));
    let b = write_image(dir.path(), "b.png", checkerboard(120, 20));

    let scorer = SimilarityScorer::default();
    let expected = scorer
        .score(&ImageSource::path(&a), &ImageSource::path(&b))
        .unwrap()
        .score;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    scorer
                        .score(&ImageSource::path(&a), &ImageSource::path(&b))
                        .unwrap()
                        .score
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn catalog_directory_ranks_the_matching_target_first() {
    let targets_dir = TempDir::new().unwrap();
    write_image(targets_dir.path(), "poster.png", checkerboard(200, 50));
    write_image(targets_dir.path(), "flyer.png", solid(200, 200, [200, 30, 30]));
    write_image(targets_dir.path(), "card.png", solid(200, 200, [30, 30, 200]));
    fs::write(targets_dir.path().join("readme.txt"), b"not a target").unwrap();

    let upload_dir = TempDir::new().unwrap();
    let upload = write_image(upload_dir.path(), "upload.png", checkerboard(400, 100));

    let targets = Catalog::discover(targets_dir.path(), &CatalogConfig::default()).unwrap();
    assert_eq!(targets.len(), 3);

    let scorer = ScorerConfig::new().grid_size(64, 64).build().unwrap();
    let report = CatalogMatcher::new(scorer, targets)
        .match_candidate(&ImageSource::path(&upload))
        .unwrap();

    let best = report.best().unwrap();
    assert_eq!(best.target_id, "poster");
    assert!(best.result.matched);
    assert!(report.errors.is_empty());
}

#[test]
fn catalog_of_an_empty_directory_cannot_match() {
    let targets_dir = TempDir::new().unwrap();
    let upload_dir = TempDir::new().unwrap();
    let upload = write_image(upload_dir.path(), "upload.png", solid(8, 8, [1, 2, 3]));

    let targets = Catalog::discover(targets_dir.path(), &CatalogConfig::default()).unwrap();
    let result = CatalogMatcher::new(SimilarityScorer::default(), targets)
        .match_candidate(&ImageSource::path(&upload));

    assert!(matches!(result, Err(CatalogError::EmptyCatalog)));
}
