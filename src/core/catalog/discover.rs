//! Building a catalog from a directory of target images.

use super::{CatalogConfig, CatalogTarget};
use crate::core::scorer::ImageSource;
use crate::error::CatalogError;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Decides which files in a directory are target images
pub struct TargetFilter {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl TargetFilter {
    /// Create a filter for the configured extensions
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            extensions: config.extensions.iter().map(|e| e.to_lowercase()).collect(),
            include_hidden: config.include_hidden,
        }
    }

    /// Check if a file should become a target
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Walk `root` and turn every matching image into a target.
///
/// Targets are identified by file stem and returned sorted by id. Entries
/// that cannot be read are logged and skipped.
pub fn discover_targets(root: &Path, config: &CatalogConfig) -> Result<Vec<CatalogTarget>, CatalogError> {
    if !root.is_dir() {
        return Err(CatalogError::Discover {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let filter = TargetFilter::new(config);
    let mut walker = WalkDir::new(root).follow_links(false);
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let include_hidden = config.include_hidden;
    let entries = walker
        .into_iter()
        .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry.path()));

    let mut targets = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable catalog entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !filter.should_include(path) {
            continue;
        }

        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        targets.push(CatalogTarget::new(id, ImageSource::path(path)));
    }

    targets.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(targets)
}
