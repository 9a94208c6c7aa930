//! Image assets for the exported document.
//!
//! The logo, footer banner and student photo are fetched from a file path
//! or URL, decoded, and flattened to raw RGB ready to embed. Any failure is
//! logged and the asset is left out; the export still goes ahead.

use std::io::Read;

use ::image::{DynamicImage, Rgba, RgbImage};
use tracing::{info, warn};

use crate::error::AppError;
use crate::layout::ImageSlot;

/// Decoded image as 8-bit RGB rows, alpha composited onto white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddableImage {
    pub width_px: u32,
    pub height_px: u32,
    pub rgb: Vec<u8>,
}

impl EmbeddableImage {
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba_image = image.to_rgba8();
        let (width_px, height_px) = rgba_image.dimensions();

        let mut rgb_image = RgbImage::new(width_px, height_px);
        for (x, y, pixel) in rgba_image.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
            rgb_image.put_pixel(x, y, ::image::Rgb([blend(r), blend(g), blend(b)]));
        }

        Self {
            width_px,
            height_px,
            rgb: rgb_image.into_raw(),
        }
    }
}

/// Where each optional image comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSources {
    pub logo: Option<String>,
    pub footer: Option<String>,
    pub photo: Option<String>,
}

/// Images available to the renderer. Any of them may be missing.
#[derive(Debug, Clone, Default)]
pub struct ReportAssets {
    pub logo: Option<EmbeddableImage>,
    pub footer: Option<EmbeddableImage>,
    pub photo: Option<EmbeddableImage>,
}

impl ReportAssets {
    /// Load whatever can be loaded. Failures leave the slot empty.
    pub fn load(sources: &AssetSources) -> Self {
        Self {
            logo: load_optional("logo", sources.logo.as_deref()),
            footer: load_optional("footer", sources.footer.as_deref()),
            photo: load_optional("photo", sources.photo.as_deref()),
        }
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&EmbeddableImage> {
        match slot {
            ImageSlot::Logo => self.logo.as_ref(),
            ImageSlot::Footer => self.footer.as_ref(),
            ImageSlot::Photo => self.photo.as_ref(),
        }
    }
}

fn load_optional(what: &str, source: Option<&str>) -> Option<EmbeddableImage> {
    let source = source.filter(|s| !s.is_empty())?;
    match load_image(source) {
        Ok(image) => {
            info!("Loaded {} from {}", what, source);
            Some(EmbeddableImage::from_image(&image))
        }
        Err(e) => {
            warn!("Skipping {}: {}", what, e);
            None
        }
    }
}

/// Read and decode an image from a file path or an http(s) URL.
pub fn load_image(source: &str) -> Result<DynamicImage, AppError> {
    let image_bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let response = ureq::get(source)
            .call()
            .map_err(|e| AppError::AssetError(format!("Failed to fetch URL: {}", e)))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::AssetError(format!("Failed to read response: {}", e)))?;
        bytes
    } else {
        std::fs::read(source).map_err(|e| AppError::AssetError(format!("{}: {}", source, e)))?
    };

    ::image::load_from_memory(&image_bytes)
        .map_err(|e| AppError::AssetError(format!("Failed to decode image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageFormat, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn test_transparent_pixels_become_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        rgba.put_pixel(1, 0, Rgba([10, 20, 30, 0]));

        let embedded = EmbeddableImage::from_image(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(embedded.width_px, 2);
        assert_eq!(embedded.height_px, 1);
        assert_eq!(embedded.rgb, vec![10, 20, 30, 255, 255, 255]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(4, 3, Rgba([0, 0, 255, 255]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let sources = AssetSources {
            logo: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        let assets = ReportAssets::load(&sources);
        let logo = assets.get(ImageSlot::Logo).unwrap();
        assert_eq!((logo.width_px, logo.height_px), (4, 3));
        assert!(assets.get(ImageSlot::Footer).is_none());
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let sources = AssetSources {
            footer: Some("does-not-exist.png".to_string()),
            ..Default::default()
        };
        assert!(ReportAssets::load(&sources).footer.is_none());
        assert!(load_image("does-not-exist.png").is_err());
    }

    #[test]
    fn test_undecodable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"not an image").unwrap();
        let sources = AssetSources {
            photo: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(ReportAssets::load(&sources).photo.is_none());
    }
}
