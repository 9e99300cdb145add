//! Font and image asset loading
//!
//! Every render needs the card font plus four rarity-keyed images: the
//! section separator and the three header ornament pieces. All of them must
//! be resolved before layout starts, since header geometry feeds the canvas
//! width. The image loads are independent, so they run as one concurrent
//! batch and are joined before returning.

use std::fs;
use std::path::Path;
use std::thread;

use ab_glyph::FontArc;
use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::error::RenderError;
use crate::item::Rarity;

/// Font file expected inside the asset directory.
pub const FONT_FILE: &str = "fontin-smallcaps-webfont.ttf";

/// Loaded, immutable render assets for one rarity.
///
/// Safe to share across renders; each render call gets its own canvas.
pub struct RenderAssets {
    pub font: FontArc,
    pub separator: RgbaImage,
    pub header_left: RgbaImage,
    pub header_middle: RgbaImage,
    pub header_right: RgbaImage,
    /// Header ornament width after rarity scaling.
    pub header_width: u32,
    /// Header ornament height after rarity scaling.
    pub header_height: u32,
}

impl RenderAssets {
    /// Load the font and the four per-rarity images from `dir`.
    ///
    /// Header ornaments keep their natural size for Rare/Unique items and are
    /// scaled to 2/3 for everything else.
    pub fn load(dir: &Path, rarity: Rarity) -> Result<Self, RenderError> {
        let font = load_font(&dir.join(FONT_FILE))?;

        let key = rarity.asset_key();
        let separator_path = dir.join(format!("separator-{}.png", key));
        let left_path = dir.join(format!("header-{}-left.png", key));
        let middle_path = dir.join(format!("header-{}-middle.png", key));
        let right_path = dir.join(format!("header-{}-right.png", key));

        let (separator, left, middle, right) = thread::scope(|s| {
            let separator = s.spawn(|| load_image(&separator_path));
            let left = s.spawn(|| load_image(&left_path));
            let middle = s.spawn(|| load_image(&middle_path));
            let right = s.spawn(|| load_image(&right_path));
            (join(separator), join(left), join(middle), join(right))
        });

        let separator = separator?;
        let mut header_left = left?;
        let mut header_middle = middle?;
        let mut header_right = right?;

        let (mut header_width, mut header_height) = header_left.dimensions();
        if !rarity.is_premium() {
            header_width = header_width * 2 / 3;
            header_height = header_height * 2 / 3;
            header_left = scale_header(&header_left, header_width, header_height);
            header_middle = scale_header(&header_middle, header_width, header_height);
            header_right = scale_header(&header_right, header_width, header_height);
        }

        log::debug!(
            "loaded {} assets from {} (header {}x{})",
            key,
            dir.display(),
            header_width,
            header_height
        );

        Ok(RenderAssets {
            font,
            separator,
            header_left,
            header_middle,
            header_right,
            header_width,
            header_height,
        })
    }
}

fn load_font(path: &Path) -> Result<FontArc, RenderError> {
    let data = fs::read(path)
        .map_err(|e| RenderError::Asset(format!("failed to read font {}: {}", path.display(), e)))?;
    FontArc::try_from_vec(data)
        .map_err(|e| RenderError::Asset(format!("invalid font {}: {}", path.display(), e)))
}

fn load_image(path: &Path) -> Result<RgbaImage, RenderError> {
    let img = image::open(path)
        .map_err(|e| RenderError::Asset(format!("failed to load {}: {}", path.display(), e)))?;
    Ok(img.to_rgba8())
}

fn join(
    handle: thread::ScopedJoinHandle<'_, Result<RgbaImage, RenderError>>,
) -> Result<RgbaImage, RenderError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(RenderError::Asset("image load thread panicked".into())))
}

fn scale_header(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(img, width.max(1), height.max(1), FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_assets_fail_before_drawing() {
        let err = RenderAssets::load(Path::new("definitely/not/here"), Rarity::Rare);
        assert!(matches!(err, Err(RenderError::Asset(_))));
    }

    #[test]
    fn test_scale_header_never_zero() {
        let img = RgbaImage::new(3, 3);
        let scaled = scale_header(&img, 0, 0);
        assert_eq!(scaled.dimensions(), (1, 1));
    }
}
