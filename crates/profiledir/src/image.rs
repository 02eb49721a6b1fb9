//! Image load outcomes for profile cards.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Outcome of fetching a card's image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEvent {
    /// The image loaded.
    Loaded,
    /// The image could not be loaded.
    Failed,
}

/// Something that can tell whether an image source loads.
pub trait ImageProbe {
    /// Attempt to load `source`.
    fn probe(&self, source: &str) -> ImageEvent;
}

/// Resolves root-relative sources against a local directory.
///
/// Remote `http` sources are not fetched and count as loaded.
#[derive(Debug, Clone)]
pub struct AssetProbe {
    root: PathBuf,
}

impl AssetProbe {
    /// Serve root-relative sources from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory standing in for the site root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageProbe for AssetProbe {
    fn probe(&self, source: &str) -> ImageEvent {
        if source.starts_with("http") {
            return ImageEvent::Loaded;
        }

        let Some(relative) = source.strip_prefix('/') else {
            debug!("Image source '{}' is not root-relative", source);
            return ImageEvent::Failed;
        };

        let path = self.root.join(relative);
        if path.is_file() {
            ImageEvent::Loaded
        } else {
            debug!("Image {} not found", path.display());
            ImageEvent::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("profiledir_assets_{tag}_{}", std::process::id()))
    }

    #[test]
    fn test_remote_sources_load() {
        let probe = AssetProbe::new("/nonexistent");
        assert_eq!(probe.probe("https://example.com/a.png"), ImageEvent::Loaded);
        assert_eq!(probe.probe("http://example.com/a.png"), ImageEvent::Loaded);
    }

    #[test]
    fn test_missing_local_file_fails() {
        let probe = AssetProbe::new("/nonexistent");
        assert_eq!(probe.probe("/photo/boss.jpg"), ImageEvent::Failed);
    }

    #[test]
    fn test_relative_source_fails() {
        let probe = AssetProbe::new(std::env::temp_dir());
        assert_eq!(probe.probe("photo.jpg"), ImageEvent::Failed);
    }

    #[test]
    fn test_existing_local_file_loads() {
        let root = temp_root("exists");
        std::fs::create_dir_all(root.join("photo")).unwrap();
        std::fs::write(root.join("photo/boss.jpg"), b"jpeg").unwrap();

        let probe = AssetProbe::new(&root);
        assert_eq!(probe.probe("/photo/boss.jpg"), ImageEvent::Loaded);
        assert_eq!(probe.probe("/photo"), ImageEvent::Failed);
        assert_eq!(probe.root(), root.as_path());

        let _ = std::fs::remove_dir_all(&root);
    }
}
