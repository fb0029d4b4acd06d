//! Media collection for embedded pictures.
//!
//! Each distinct image path is read once and stored as
//! `ppt/media/imageN.<ext>`, numbered in first-use order.

use crate::error::{PptxError, Result};
use crate::slide::{Deck, PositionedElement};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the MIME content type for an image file extension
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        "tiff" | "tif" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// An image ready to be written into the package
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// Source path on disk
    pub path: PathBuf,

    /// Embedded name (e.g., "image1.png")
    pub embedded_name: String,

    /// Lowercase file extension
    pub extension: String,

    /// Raw bytes
    pub data: Vec<u8>,
}

impl MediaItem {
    /// Read an image from disk for embedding as `image{number}`.
    pub fn load(path: &Path, number: usize) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "png".to_string());
        let data = std::fs::read(path).map_err(|e| {
            PptxError::image_error(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            embedded_name: format!("image{}.{}", number, extension),
            extension,
            data,
        })
    }

    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(&self.extension)
    }
}

/// All media embedded in one package
#[derive(Debug, Default)]
pub struct MediaTable {
    items: Vec<MediaItem>,
}

impl MediaTable {
    /// Load every distinct image referenced by the deck.
    ///
    /// Unreadable images are skipped with a warning; the writer then omits
    /// the elements that point at them.
    pub fn collect(deck: &Deck) -> Self {
        let mut table = Self::default();
        let mut seen = BTreeSet::new();

        for element in deck.iter().flat_map(|s| s.elements.iter()) {
            let PositionedElement::Image { path, .. } = element else {
                continue;
            };
            if !seen.insert(path.clone()) {
                continue;
            }
            match MediaItem::load(path, table.items.len() + 1) {
                Ok(item) => {
                    debug!(path = %path.display(), name = %item.embedded_name, "Embedding image");
                    table.items.push(item);
                }
                Err(e) => warn!(code = e.code(), "Skipping image: {}", e),
            }
        }

        table
    }

    pub fn find(&self, path: &Path) -> Option<&MediaItem> {
        self.items.iter().find(|m| m.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct extensions in sorted order, for content-type defaults.
    pub fn extensions(&self) -> BTreeSet<&str> {
        self.items.iter().map(|m| m.extension.as_str()).collect()
    }
}
