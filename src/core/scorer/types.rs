//! Result types produced by the similarity scorer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quality band of a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchBand {
    /// score > 90
    Excellent,
    /// 75 < score <= 90
    Good,
    /// 50 < score <= 75
    Partial,
    /// score <= 50
    Poor,
}

impl MatchBand {
    /// Classify a score, checking bands from highest to lowest.
    ///
    /// Anything that is not above 50 (including NaN) is `Poor`.
    pub fn from_score(score: f64) -> Self {
        if score > 90.0 {
            MatchBand::Excellent
        } else if score > 75.0 {
            MatchBand::Good
        } else if score > 50.0 {
            MatchBand::Partial
        } else {
            MatchBand::Poor
        }
    }

    /// Short guidance shown next to the score
    pub fn description(&self) -> &'static str {
        match self {
            MatchBand::Excellent => "The photo is practically the same image as the target",
            MatchBand::Good => "The photo matches the target",
            MatchBand::Partial => "Some of the target is recognisable; try a straighter, closer shot",
            MatchBand::Poor => "The photo does not look like the target",
        }
    }
}

impl std::fmt::Display for MatchBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchBand::Excellent => write!(f, "Excellent Match"),
            MatchBand::Good => write!(f, "Good Match"),
            MatchBand::Partial => write!(f, "Partial Match"),
            MatchBand::Poor => write!(f, "Poor Match"),
        }
    }
}

/// Outcome of comparing a candidate image with a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Percentage of grid positions whose colours are close (0-100)
    pub score: f64,
    /// Whether the score clears the match threshold
    pub matched: bool,
    /// Quality band of the score
    pub band: MatchBand,
    /// Grid positions counted as matching
    pub matching_pixels: u64,
    /// Grid positions compared
    pub total_pixels: u64,
    /// When the comparison finished
    pub computed_at: DateTime<Utc>,
}

impl MatchResult {
    /// Derive a result from pixel counts. `match_threshold` is exclusive.
    pub(crate) fn from_counts(matching_pixels: u64, total_pixels: u64, match_threshold: f64) -> Self {
        let score = if total_pixels == 0 {
            0.0
        } else {
            100.0 * matching_pixels as f64 / total_pixels as f64
        };

        Self {
            score,
            matched: score > match_threshold,
            band: MatchBand::from_score(score),
            matching_pixels,
            total_pixels,
            computed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_evaluated_high_to_low() {
        assert_eq!(MatchBand::from_score(100.0), MatchBand::Excellent);
        assert_eq!(MatchBand::from_score(90.1), MatchBand::Excellent);
        assert_eq!(MatchBand::from_score(90.0), MatchBand::Good);
        assert_eq!(MatchBand::from_score(75.1), MatchBand::Good);
        assert_eq!(MatchBand::from_score(75.0), MatchBand::Partial);
        assert_eq!(MatchBand::from_score(50.1), MatchBand::Partial);
        assert_eq!(MatchBand::from_score(50.0), MatchBand::Poor);
        assert_eq!(MatchBand::from_score(0.0), MatchBand::Poor);
    }

    #[test]
    fn every_score_maps_to_exactly_one_band() {
        for tenth in 0..=1000 {
            let score = tenth as f64 / 10.0;
            let band = MatchBand::from_score(score);
            let expected = [
                (score > 90.0, MatchBand::Excellent),
                (score > 75.0 && score <= 90.0, MatchBand::Good),
                (score > 50.0 && score <= 75.0, MatchBand::Partial),
                (score <= 50.0, MatchBand::Poor),
            ];
            let hits: Vec<_> = expected.iter().filter(|(hit, _)| *hit).collect();
            assert_eq!(hits.len(), 1, "score {score} fell into {} bands", hits.len());
            assert_eq!(hits[0].1, band);
        }
    }

    #[test]
    fn matched_boundary_is_exclusive() {
        let at_boundary = MatchResult::from_counts(75, 100, 75.0);
        assert_eq!(at_boundary.score, 75.0);
        assert!(!at_boundary.matched);

        let above = MatchResult::from_counts(76, 100, 75.0);
        assert!(above.matched);
        assert_eq!(above.band, MatchBand::Good);
    }

    #[test]
    fn band_labels() {
        assert_eq!(MatchBand::Excellent.to_string(), "Excellent Match");
        assert_eq!(MatchBand::Good.to_string(), "Good Match");
        assert_eq!(MatchBand::Partial.to_string(), "Partial Match");
        assert_eq!(MatchBand::Poor.to_string(), "Poor Match");
    }

    #[test]
    fn result_is_serializable() {
        let result = MatchResult::from_counts(9, 10, 75.0);
        let json = serde_json::to_string(&result).unwrap();
        let back: MatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
