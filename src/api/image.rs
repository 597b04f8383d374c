//! Image service helpers
//!
//! The collection serves images through a IIIF endpoint addressed by
//! `image_id`. The URL is built from a template; nothing checks that it
//! resolves. Downloaded bytes are decoded into a small RGB raster that the
//! detail view draws with half-block characters.

use super::FetchError;
use image::imageops::FilterType;
use image::RgbImage;

/// Default IIIF template (`{image_id}` and `{width}` are substituted)
pub const DEFAULT_IMAGE_URL: &str =
    "https://www.artic.edu/iiif/2/{image_id}/full/{width},/0/default.jpg";

/// Width used for links and clipboard copies
pub const DEFAULT_IMAGE_WIDTH: u32 = 843;

/// Decoded previews are clamped to this size to bound memory
const MAX_PREVIEW_DIM: u32 = 400;

/// Substitute an image reference and width into a URL template
pub fn image_url(template: &str, image_id: &str, width: u32) -> String {
    template
        .replace("{image_id}", image_id)
        .replace("{width}", &width.to_string())
}

/// Decoded image ready for terminal rendering
#[derive(Debug, Clone)]
pub struct Preview {
    pixels: RgbImage,
}

impl Preview {
    /// Decode JPEG/PNG bytes from the image service
    pub fn decode(bytes: &[u8]) -> Result<Self, FetchError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;

        let decoded = if decoded.width() > MAX_PREVIEW_DIM || decoded.height() > MAX_PREVIEW_DIM {
            decoded.resize(MAX_PREVIEW_DIM, MAX_PREVIEW_DIM, FilterType::Triangle)
        } else {
            decoded
        };

        Ok(Self {
            pixels: decoded.to_rgb8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raster scaled to fit `cols` x `rows` terminal cells
    ///
    /// Each cell shows two vertically stacked pixels, so the pixel box is
    /// `cols` wide and `rows * 2` tall. Aspect ratio is preserved.
    pub fn fit(&self, cols: u16, rows: u16) -> Option<RgbImage> {
        let (w, h) = fit_dimensions(self.width(), self.height(), cols as u32, rows as u32 * 2)?;
        Some(image::imageops::resize(&self.pixels, w, h, FilterType::Triangle))
    }
}

/// Largest (w, h) with the source aspect ratio inside (max_w, max_h)
fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> Option<(u32, u32)> {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return None;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).floor() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).floor() as u32).clamp(1, max_h);
    Some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb([200u8, 30, 30]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_image_url_substitutes_placeholders() {
        let url = image_url(DEFAULT_IMAGE_URL, "abc-123", DEFAULT_IMAGE_WIDTH);
        assert_eq!(
            url,
            "https://www.artic.edu/iiif/2/abc-123/full/843,/0/default.jpg"
        );
    }

    #[test]
    fn test_decode_png() {
        let preview = Preview::decode(&png_bytes(40, 20)).unwrap();
        assert_eq!(preview.width(), 40);
        assert_eq!(preview.height(), 20);
    }

    #[test]
    fn test_decode_clamps_large_images() {
        let preview = Preview::decode(&png_bytes(800, 400)).unwrap();
        assert_eq!(preview.width(), MAX_PREVIEW_DIM);
        assert_eq!(preview.height(), MAX_PREVIEW_DIM / 2);
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let err = Preview::decode(b"not an image").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        // 100x50 into 20 cols x 20 rows (20x40 pixels) -> width-bound
        assert_eq!(fit_dimensions(100, 50, 20, 40), Some((20, 10)));
        // 50x100 into 40x20 pixels -> height-bound
        assert_eq!(fit_dimensions(50, 100, 40, 20), Some((10, 20)));
        assert_eq!(fit_dimensions(10, 10, 0, 5), None);
    }

    #[test]
    fn test_fit_uses_two_pixels_per_row() {
        let preview = Preview::decode(&png_bytes(10, 10)).unwrap();
        let fitted = preview.fit(10, 5).unwrap();
        assert_eq!((fitted.width(), fitted.height()), (10, 10));
    }
}
