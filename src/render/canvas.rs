//! Raster canvas
//!
//! A plain RGBA pixel buffer plus the card font. Text drawing uses top
//! baseline semantics (the y coordinate is the top of the line, the glyph
//! baseline sits one ascent below) and anchors text on its horizontal center,
//! which is how every line on the card is positioned.

use ab_glyph::{point, Font, FontArc, PxScale, ScaleFont};
use image::{imageops, Rgba, RgbaImage};

pub struct Canvas {
    image: RgbaImage,
    font: FontArc,
}

impl Canvas {
    pub fn new(width: u32, height: u32, font: FontArc) -> Self {
        Canvas {
            image: RgbaImage::new(width, height),
            font,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fill the whole buffer with one color.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Pixel width of `text` at font size `px`.
    pub fn measure_text(&self, text: &str, px: f32) -> f32 {
        measure_text(&self.font, text, px)
    }

    /// Draw `text` horizontally centered at `center_x`, with `top_y` as the
    /// top of the line.
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        center_x: f32,
        top_y: f32,
        px: f32,
        color: Rgba<u8>,
    ) {
        self.draw_text_run(text, center_x, top_y, px, color, 0.0);
    }

    /// Draw centered text with a horizontal shear: every pixel at device row
    /// y is shifted by `skew * y`. Used only for flavor text.
    pub fn draw_text_skewed(
        &mut self,
        text: &str,
        center_x: f32,
        top_y: f32,
        px: f32,
        color: Rgba<u8>,
        skew: f32,
    ) {
        self.draw_text_run(text, center_x, top_y, px, color, skew);
    }

    fn draw_text_run(
        &mut self,
        text: &str,
        center_x: f32,
        top_y: f32,
        px: f32,
        color: Rgba<u8>,
        skew: f32,
    ) {
        let font = self.font.clone();
        let scaled = font.as_scaled(PxScale::from(px));
        let baseline = top_y + scaled.ascent();
        let mut cursor_x = center_x - measure_text(&font, text, px) / 2.0;
        let mut previous = None;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                cursor_x += scaled.kern(prev, glyph_id);
            }
            let advance = scaled.h_advance(glyph_id);

            let mut glyph = scaled.scaled_glyph(ch);
            glyph.position = point(cursor_x, baseline);
            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                let image = &mut self.image;
                outline.draw(|gx, gy, coverage| {
                    let y = bounds.min.y + gy as f32;
                    let x = bounds.min.x + gx as f32 + skew * y;
                    blend_pixel(image, x, y, color, coverage);
                });
            }

            cursor_x += advance;
            previous = Some(glyph_id);
        }
    }

    /// Overlay an image with alpha blending at (x, y).
    pub fn draw_image(&mut self, img: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, img, x, y);
    }

    /// Shrink the buffer to `new_height`, keeping already painted pixels.
    pub fn shrink_to_height(&mut self, new_height: u32) {
        let width = self.image.width();
        self.image = resize_preserving(&self.image, width, new_height);
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Pixel width of `text` at font size `px`, kerning included.
pub fn measure_text(font: &FontArc, text: &str, px: f32) -> f32 {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut width = 0.0;
    let mut previous = None;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        previous = Some(glyph_id);
    }
    width
}

/// Copy `image` into a buffer of the new size, preserving the overlapping
/// region. Content outside the new bounds is discarded.
pub fn resize_preserving(image: &RgbaImage, new_width: u32, new_height: u32) -> RgbaImage {
    let mut resized = RgbaImage::new(new_width, new_height);
    let keep_width = new_width.min(image.width());
    let keep_height = new_height.min(image.height());
    let kept = imageops::crop_imm(image, 0, 0, keep_width, keep_height).to_image();
    imageops::replace(&mut resized, &kept, 0, 0);
    resized
}

fn blend_pixel(image: &mut RgbaImage, x: f32, y: f32, color: Rgba<u8>, coverage: f32) {
    if coverage <= 0.0 || x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= image.width() || y >= image.height() {
        return;
    }
    let alpha = coverage.min(1.0);
    let inverse = 1.0 - alpha;
    let dst = image.get_pixel_mut(x, y);
    dst.0[0] = (color.0[0] as f32 * alpha + dst.0[0] as f32 * inverse) as u8;
    dst.0[1] = (color.0[1] as f32 * alpha + dst.0[1] as f32 * inverse) as u8;
    dst.0[2] = (color.0[2] as f32 * alpha + dst.0[2] as f32 * inverse) as u8;
    dst.0[3] = 255;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_preserves_painted_content() {
        let mut image = RgbaImage::new(10, 100);
        image.put_pixel(5, 20, Rgba([255, 0, 0, 255]));
        image.put_pixel(5, 90, Rgba([0, 255, 0, 255]));

        let resized = resize_preserving(&image, 10, 40);
        assert_eq!(resized.dimensions(), (10, 40));
        // Content above the new height survives, content below is gone
        assert_eq!(*resized.get_pixel(5, 20), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_resize_growing_leaves_new_area_blank() {
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(1, 1, Rgba([9, 9, 9, 255]));

        let resized = resize_preserving(&image, 4, 8);
        assert_eq!(*resized.get_pixel(1, 1), Rgba([9, 9, 9, 255]));
        assert_eq!(*resized.get_pixel(1, 6), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_blend_pixel_out_of_bounds_is_ignored() {
        let mut image = RgbaImage::new(2, 2);
        blend_pixel(&mut image, -1.0, 0.0, Rgba([255, 255, 255, 255]), 1.0);
        blend_pixel(&mut image, 5.0, 5.0, Rgba([255, 255, 255, 255]), 1.0);
        blend_pixel(&mut image, 1.0, 1.0, Rgba([255, 255, 255, 255]), 1.0);
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*image.get_pixel(1, 1), Rgba([255, 255, 255, 255]));
    }
}
