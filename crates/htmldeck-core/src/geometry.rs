//! Image geometry.
//!
//! Native size comes from the pixel dimensions and the resolution stored
//! in the file (PNG `pHYs`, JPEG JFIF density), defaulting to 96 DPI.
//! An image that cannot be inspected gets a fixed default size.

use crate::config::ImageConfig;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const METERS_PER_INCH: f64 = 0.0254;
const CM_PER_INCH: f64 = 2.54;

/// Pixel dimensions and resolution of an image file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeImage {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Horizontal resolution, when the file records one
    pub dpi: Option<f64>,
}

impl NativeImage {
    /// Read dimensions and resolution. The file handle is dropped before
    /// this returns, whatever the outcome.
    pub fn inspect(path: &Path) -> Result<Self, image::ImageError> {
        let (pixel_width, pixel_height) = image::ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;
        let dpi = read_dpi(path).ok().flatten();
        Ok(Self {
            pixel_width,
            pixel_height,
            dpi,
        })
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        f64::from(self.pixel_width) / f64::from(self.pixel_height)
    }
}

/// Fit `(width, height)` into `(max_width, max_height)` keeping the aspect
/// ratio. Sizes that already fit are returned unchanged.
pub fn fit_within(width: f64, height: f64, max_width: f64, max_height: f64) -> (f64, f64) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let aspect = width / height;
    let (mut w, mut h) = if aspect > 1.0 {
        (max_width, max_width / aspect)
    } else {
        (max_height * aspect, max_height)
    };
    // a wide box with a near-square image can still overflow the other side
    if h > max_height {
        h = max_height;
        w = h * aspect;
    }
    if w > max_width {
        w = max_width;
        h = w / aspect;
    }
    (w, h)
}

/// Computes placement sizes for images
#[derive(Debug, Clone, Copy)]
pub struct ImageGeometry {
    default_width: f64,
    default_height: f64,
    default_dpi: f64,
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

impl ImageGeometry {
    pub fn from_config(config: &ImageConfig) -> Self {
        Self {
            default_width: config.default_width,
            default_height: config.default_height,
            default_dpi: config.default_dpi,
        }
    }

    /// Size used when an image cannot be read.
    pub fn default_size(&self) -> (f64, f64) {
        (self.default_width, self.default_height)
    }

    /// Natural size in inches.
    pub fn natural_size(&self, image: &NativeImage) -> (f64, f64) {
        let dpi = image
            .dpi
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(self.default_dpi);
        (
            f64::from(image.pixel_width) / dpi,
            f64::from(image.pixel_height) / dpi,
        )
    }

    /// Size of the image at `path` fitted into the box.
    ///
    /// Never fails: unreadable or degenerate images yield the default size.
    pub fn fit(&self, path: &Path, max_width: f64, max_height: f64) -> (f64, f64) {
        match NativeImage::inspect(path) {
            Ok(image) if image.pixel_width > 0 && image.pixel_height > 0 => {
                let (width, height) = self.natural_size(&image);
                fit_within(width, height, max_width, max_height)
            }
            Ok(_) => {
                warn!(path = %path.display(), "Image has no pixels, using default size");
                self.default_size()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read image, using default size");
                self.default_size()
            }
        }
    }
}

/// Resolution recorded in a PNG or JPEG header, in dots per inch.
fn read_dpi(path: &Path) -> std::io::Result<Option<f64>> {
    let mut header = Vec::with_capacity(4096);
    BufReader::new(File::open(path)?)
        .take(64 * 1024)
        .read_to_end(&mut header)?;

    if header.starts_with(PNG_SIGNATURE) {
        Ok(png_dpi(&header))
    } else if header.starts_with(&[0xFF, 0xD8]) {
        Ok(jfif_dpi(&header))
    } else {
        Ok(None)
    }
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

/// `pHYs` chunk with unit "meter".
fn png_dpi(bytes: &[u8]) -> Option<f64> {
    let mut pos = PNG_SIGNATURE.len();
    while pos + 8 <= bytes.len() {
        let length = be_u32(bytes, pos)? as usize;
        let kind = bytes.get(pos + 4..pos + 8)?;
        let data = pos + 8;
        match kind {
            b"pHYs" => {
                let per_meter = be_u32(bytes, data)?;
                let unit = *bytes.get(data + 8)?;
                return (unit == 1).then(|| f64::from(per_meter) * METERS_PER_INCH);
            }
            b"IDAT" | b"IEND" => return None,
            _ => pos = data.checked_add(length)?.checked_add(4)?,
        }
    }
    None
}

/// JFIF `APP0` density with unit dots-per-inch or dots-per-cm.
fn jfif_dpi(bytes: &[u8]) -> Option<f64> {
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        let length = be_u16(bytes, pos + 2)? as usize;
        if marker == 0xE0 && bytes.get(pos + 4..pos + 9) == Some(b"JFIF\0") {
            let unit = *bytes.get(pos + 11)?;
            let density = f64::from(be_u16(bytes, pos + 12)?);
            return match unit {
                1 => Some(density),
                2 => Some(density * CM_PER_INCH),
                _ => None,
            };
        }
        if marker == 0xDA {
            return None;
        }
        pos += 2 + length;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(w, h, Rgb([10, 80, 136])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(2.0, 1.0, 4.0, 4.0), (2.0, 1.0));
    }

    #[test]
    fn test_fit_within_landscape_and_portrait() {
        let (w, h) = fit_within(16.0, 8.0, 8.0, 5.0);
        assert_eq!((w, h), (8.0, 4.0));

        let (w, h) = fit_within(5.0, 10.0, 8.0, 5.0);
        assert_eq!((w, h), (2.5, 5.0));
    }

    #[test]
    fn test_fit_within_never_overflows() {
        let (w, h) = fit_within(12.0, 10.0, 7.0, 4.0);
        assert!(w <= 7.0 && h <= 4.0);
        assert!((w / h - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_fit_png_preserves_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 1200, 600);
        let geometry = ImageGeometry::default();

        // 12.5" x 6.25" at 96 DPI
        let (w, h) = geometry.fit(&path, 7.0, 4.0);
        assert!((w - 7.0).abs() < 1e-9);
        assert!((w / h - 2.0).abs() < 1e-9);
        assert!(h <= 4.0);
    }

    #[test]
    fn test_fit_small_png_is_natural_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "icon.png", 96, 48);
        let (w, h) = ImageGeometry::default().fit(&path, 7.0, 4.0);
        assert!((w - 1.0).abs() < 1e-9);
        assert!((h - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unreadable_image_gets_default_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();
        let geometry = ImageGeometry::default();
        assert_eq!(geometry.fit(&path, 4.0, 5.5), (6.0, 4.0));
        assert_eq!(geometry.fit(&dir.path().join("gone.png"), 4.0, 5.5), (6.0, 4.0));
    }

    #[test]
    fn test_png_phys_dpi() {
        let mut png = PNG_SIGNATURE.to_vec();
        png.extend_from_slice(&13u32.to_be_bytes());
        png.extend_from_slice(b"IHDR");
        png.extend_from_slice(&[0; 13]);
        png.extend_from_slice(&[0; 4]);
        png.extend_from_slice(&9u32.to_be_bytes());
        png.extend_from_slice(b"pHYs");
        png.extend_from_slice(&7874u32.to_be_bytes());
        png.extend_from_slice(&7874u32.to_be_bytes());
        png.push(1);
        let dpi = png_dpi(&png).unwrap();
        assert!((dpi - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_jfif_dpi() {
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        jpeg.extend_from_slice(b"JFIF\0");
        jpeg.extend_from_slice(&[1, 1, 1]);
        jpeg.extend_from_slice(&300u16.to_be_bytes());
        jpeg.extend_from_slice(&300u16.to_be_bytes());
        jpeg.extend_from_slice(&[0, 0]);
        assert_eq!(jfif_dpi(&jpeg), Some(300.0));

        jpeg[13] = 0;
        assert_eq!(jfif_dpi(&jpeg), None);
    }

    #[test]
    fn test_natural_size_uses_recorded_dpi() {
        let geometry = ImageGeometry::default();
        let image = NativeImage {
            pixel_width: 600,
            pixel_height: 300,
            dpi: Some(300.0),
        };
        assert_eq!(geometry.natural_size(&image), (2.0, 1.0));
        assert_eq!(image.aspect(), 2.0);

        let undpi = NativeImage { dpi: Some(0.0), ..image };
        assert_eq!(geometry.natural_size(&undpi), (6.25, 3.125));
    }
}
