//! Deck configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file (or no
//! file at all) yields the standard 10" x 7.5" deck.
//!
//! ```toml
//! [meta]
//! title = "Diabetes Prediction"
//! author = "Group 7"
//!
//! [assets]
//! root = "images"
//!
//! [generic]
//! max_paragraphs = 10
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete deck configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckConfig {
    /// Document metadata
    #[serde(default)]
    pub meta: MetaConfig,

    /// Slide canvas
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Asset lookup
    #[serde(default)]
    pub assets: AssetConfig,

    /// Image sizing
    #[serde(default)]
    pub images: ImageConfig,

    /// Bounds for the content-driven fallback layout
    #[serde(default)]
    pub generic: GenericConfig,
}

/// Document metadata written into the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Presentation title; the first slide title when unset
    #[serde(default)]
    pub title: Option<String>,

    /// Presentation author
    #[serde(default)]
    pub author: Option<String>,

    /// Locale code (e.g., "en-US")
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Canvas size in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    #[serde(default = "default_canvas_height")]
    pub height: f64,
}

fn default_canvas_width() -> f64 {
    10.0
}
fn default_canvas_height() -> f64 {
    7.5
}

/// Asset directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Root directory image references are resolved against
    #[serde(default = "default_asset_root")]
    pub root: PathBuf,
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("images")
}

/// Image sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Width used when an image cannot be decoded
    #[serde(default = "default_image_width")]
    pub default_width: f64,

    /// Height used when an image cannot be decoded
    #[serde(default = "default_image_height")]
    pub default_height: f64,

    /// Resolution assumed when the file carries none
    #[serde(default = "default_dpi")]
    pub default_dpi: f64,
}

fn default_image_width() -> f64 {
    6.0
}
fn default_image_height() -> f64 {
    4.0
}
fn default_dpi() -> f64 {
    96.0
}

/// Bounds for the generic layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenericConfig {
    /// Cursor position past which nothing more is placed
    #[serde(default = "default_floor")]
    pub floor: f64,

    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    #[serde(default = "default_max_headings")]
    pub max_headings: usize,

    #[serde(default = "default_max_lists")]
    pub max_lists: usize,

    #[serde(default = "default_max_list_items")]
    pub max_list_items: usize,

    #[serde(default = "default_max_callouts")]
    pub max_callouts: usize,

    /// Box images are scaled into
    #[serde(default = "default_image_box_width")]
    pub image_box_width: f64,

    #[serde(default = "default_image_box_height")]
    pub image_box_height: f64,

    /// Space that must remain above the floor to start another image
    #[serde(default = "default_image_reserve")]
    pub image_reserve: f64,
}

fn default_floor() -> f64 {
    6.8
}
fn default_max_paragraphs() -> usize {
    15
}
fn default_max_headings() -> usize {
    5
}
fn default_max_lists() -> usize {
    3
}
fn default_max_list_items() -> usize {
    6
}
fn default_max_callouts() -> usize {
    2
}
fn default_image_box_width() -> f64 {
    7.0
}
fn default_image_box_height() -> f64 {
    4.0
}
fn default_image_reserve() -> f64 {
    3.0
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            locale: default_locale(),
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_width: default_image_width(),
            default_height: default_image_height(),
            default_dpi: default_dpi(),
        }
    }
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self {
            floor: default_floor(),
            max_paragraphs: default_max_paragraphs(),
            max_headings: default_max_headings(),
            max_lists: default_max_lists(),
            max_list_items: default_max_list_items(),
            max_callouts: default_max_callouts(),
            image_box_width: default_image_box_width(),
            image_box_height: default_image_box_height(),
            image_reserve: default_image_reserve(),
        }
    }
}

impl DeckConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| EngineError::config(path, e.to_string()))?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DeckConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that sizes are usable
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("canvas.width", self.canvas.width),
            ("canvas.height", self.canvas.height),
            ("images.default_width", self.images.default_width),
            ("images.default_height", self.images.default_height),
            ("images.default_dpi", self.images.default_dpi),
            ("generic.image_box_width", self.generic.image_box_width),
            ("generic.image_box_height", self.generic.image_box_height),
        ];

        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::config(
                    "<config>",
                    format!("'{}' must be a positive number, got {}", name, value),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DeckConfig::default();
        assert_eq!(config.canvas.width, 10.0);
        assert_eq!(config.canvas.height, 7.5);
        assert_eq!(config.assets.root, PathBuf::from("images"));
        assert_eq!(config.images.default_dpi, 96.0);
        assert_eq!(config.generic.max_paragraphs, 15);
        assert_eq!(config.generic.floor, 6.8);
        assert_eq!(config.meta.locale, "en-US");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = DeckConfig::from_toml_str("").unwrap();
        assert_eq!(config, DeckConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = DeckConfig::from_toml_str(
            r#"
            [meta]
            title = "Diabetes Prediction"

            [generic]
            max_paragraphs = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.meta.title.as_deref(), Some("Diabetes Prediction"));
        assert_eq!(config.meta.locale, "en-US");
        assert_eq!(config.generic.max_paragraphs, 4);
        assert_eq!(config.generic.max_headings, 5);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = DeckConfig::from_toml_str("[transitions]\nstyle = \"fade\"").unwrap_err();
        assert_eq!(err.code(), "DECK004");
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = DeckConfig::from_toml_str("[canvas]\nwidth = 0.0").unwrap_err();
        assert_eq!(err.code(), "DECK003");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        std::fs::write(&path, "[assets]\nroot = \"media\"\n").unwrap();
        let config = DeckConfig::from_file(&path).unwrap();
        assert_eq!(config.assets.root, PathBuf::from("media"));

        std::fs::write(&path, "[canvas]\nwidth = \"wide\"\n").unwrap();
        let err = DeckConfig::from_file(&path).unwrap_err();
        assert_eq!(err.code(), "DECK003");
        assert!(err.to_string().contains("deck.toml"));
    }
}
