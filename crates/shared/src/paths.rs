//! File path utilities for exported data.
//!
//! Export file names typed at the terminal are bare stems ("anime_data");
//! this module turns them into concrete paths under the export directory.

use std::path::{Path, PathBuf};

/// Default stem for a JSON dump of the session
pub const DEFAULT_JSON_STEM: &str = "anime_data";

/// Default stem for a CSV dump of the anime list
pub const DEFAULT_CSV_STEM: &str = "anime_list";

/// File path manager for export files
#[derive(Debug, Clone)]
pub struct ExportPaths {
    root: PathBuf,
}

impl ExportPaths {
    /// Create a new ExportPaths with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// JSON export path for a user-supplied stem
    pub fn json_file(&self, stem: &str) -> PathBuf {
        self.file(stem, DEFAULT_JSON_STEM, "json")
    }

    /// CSV export path for a user-supplied stem
    pub fn csv_file(&self, stem: &str) -> PathBuf {
        self.file(stem, DEFAULT_CSV_STEM, "csv")
    }

    fn file(&self, stem: &str, default_stem: &str, extension: &str) -> PathBuf {
        let slug = Self::sanitize_stem(stem);
        let slug = if slug.is_empty() {
            default_stem.to_string()
        } else {
            slug
        };
        self.root.join(format!("{}.{}", slug, extension))
    }

    /// Strip path separators and reserved characters from a file stem
    pub fn sanitize_stem(stem: &str) -> String {
        stem.trim()
            .replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
            .trim_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let paths = ExportPaths::new("/data/exports");

        assert_eq!(
            paths.json_file("anime"),
            PathBuf::from("/data/exports/anime.json")
        );

        assert_eq!(
            paths.csv_file(""),
            PathBuf::from("/data/exports/anime_list.csv")
        );

        assert_eq!(
            paths.json_file("   "),
            PathBuf::from("/data/exports/anime_data.json")
        );
    }

    #[test]
    fn test_sanitize_stem() {
        assert_eq!(ExportPaths::sanitize_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(ExportPaths::sanitize_stem(" my list "), "my list");
    }
}
