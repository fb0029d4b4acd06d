//! Image reference resolution.
//!
//! A reference is tried against four path conventions in order; the first
//! candidate that is an existing file wins.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prefixes that name the asset directory itself.
const ASSET_PREFIXES: &[&str] = &["images/", "/images/"];

/// Which path convention resolved a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// `images/x.png` or `/images/x.png` rewritten under the asset root
    AssetPrefix,
    /// The reference is already an absolute path
    Absolute,
    /// The reference joined to the asset root
    RootJoined,
    /// Only the file name, joined to the asset root
    Basename,
}

impl std::fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssetPrefix => write!(f, "asset-prefix"),
            Self::Absolute => write!(f, "absolute"),
            Self::RootJoined => write!(f, "root-joined"),
            Self::Basename => write!(f, "basename"),
        }
    }
}

/// Resolves image references against an asset root
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for a reference, in the order they are tried.
    pub fn candidates(&self, source: &str) -> Vec<(ResolveStrategy, PathBuf)> {
        let mut candidates = Vec::with_capacity(4);

        if let Some(rest) = ASSET_PREFIXES
            .iter()
            .find_map(|prefix| source.strip_prefix(prefix))
        {
            candidates.push((ResolveStrategy::AssetPrefix, self.root.join(rest)));
        }

        let path = Path::new(source);
        if path.is_absolute() {
            candidates.push((ResolveStrategy::Absolute, path.to_path_buf()));
        } else {
            candidates.push((ResolveStrategy::RootJoined, self.root.join(path)));
        }

        if let Some(name) = path.file_name() {
            candidates.push((ResolveStrategy::Basename, self.root.join(name)));
        }

        candidates
    }

    /// Resolve a reference to an absolute path of an existing file.
    pub fn resolve(&self, source: &str) -> Option<(PathBuf, ResolveStrategy)> {
        let source = source.trim();
        if source.is_empty() {
            return None;
        }

        let candidates = self.candidates(source);
        for (strategy, candidate) in &candidates {
            if candidate.is_file() {
                let resolved = absolutize(candidate);
                debug!(
                    source,
                    strategy = %strategy,
                    path = %resolved.display(),
                    "Resolved image"
                );
                return Some((resolved, *strategy));
            }
        }

        let tried = candidates
            .last()
            .map(|(_, p)| p.display().to_string())
            .unwrap_or_default();
        warn!(source, tried = %tried, "Image not found");
        None
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_asset_prefix_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("chart.png"));
        let resolver = AssetResolver::new(dir.path());

        let (path, strategy) = resolver.resolve("images/chart.png").unwrap();
        assert_eq!(strategy, ResolveStrategy::AssetPrefix);
        assert!(path.is_absolute());
        assert!(path.ends_with("chart.png"));

        let (_, strategy) = resolver.resolve("/images/chart.png").unwrap();
        assert_eq!(strategy, ResolveStrategy::AssetPrefix);
    }

    #[test]
    fn test_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("elsewhere").join("photo.jpg");
        touch(&file);
        let resolver = AssetResolver::new(dir.path().join("images"));

        let (path, strategy) = resolver.resolve(file.to_str().unwrap()).unwrap();
        assert_eq!(strategy, ResolveStrategy::Absolute);
        assert!(path.ends_with("photo.jpg"));
    }

    #[test]
    fn test_root_joined_and_basename() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("plots").join("pca.png"));
        touch(&dir.path().join("roc.png"));
        let resolver = AssetResolver::new(dir.path());

        let (_, strategy) = resolver.resolve("plots/pca.png").unwrap();
        assert_eq!(strategy, ResolveStrategy::RootJoined);

        let (path, strategy) = resolver.resolve("../../build/output/roc.png").unwrap();
        assert_eq!(strategy, ResolveStrategy::Basename);
        assert!(path.ends_with("roc.png"));
    }

    #[test]
    fn test_unresolved() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path());
        assert!(resolver.resolve("images/missing.png").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn test_candidate_order() {
        let resolver = AssetResolver::new("assets");
        let strategies: Vec<_> = resolver
            .candidates("images/a.png")
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(
            strategies,
            vec![
                ResolveStrategy::AssetPrefix,
                ResolveStrategy::RootJoined,
                ResolveStrategy::Basename
            ]
        );
    }
}
