//! Downscaled image previews.
//!
//! A preview keeps a small RGB raster of the selected image so the terminal
//! can redraw it at any size without decoding the original bytes again.

use super::errors::PreviewError;

/// Largest raster kept for a preview, in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 160;
pub const PREVIEW_MAX_HEIGHT: u32 = 120;

/// What the preview area shows for the selected file.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Image(PreviewImage),
    /// The bytes were read but are not an image this build can decode.
    Undecodable(String),
}

impl Preview {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match PreviewImage::decode(bytes, PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT) {
            Ok(image) => Preview::Image(image),
            Err(err) => Preview::Undecodable(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB pixels, `width * height` entries.
    pub pixels: Vec<[u8; 3]>,
    /// Dimensions of the source image before downscaling.
    pub source_width: u32,
    pub source_height: u32,
}

impl PreviewImage {
    /// Decodes `bytes` and shrinks the result to fit `max_width` x `max_height`,
    /// preserving the aspect ratio. Images already small enough are kept as is.
    pub fn decode(bytes: &[u8], max_width: u32, max_height: u32) -> Result<Self, PreviewError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PreviewError::Decode(e.to_string()))?;
        let (source_width, source_height) = (decoded.width(), decoded.height());
        let scaled = if source_width > max_width || source_height > max_height {
            decoded.thumbnail(max_width, max_height)
        } else {
            decoded
        };
        let rgb = scaled.to_rgb8();
        let pixels = rgb.pixels().map(|p| p.0).collect();
        Ok(Self {
            width: rgb.width(),
            height: rgb.height(),
            pixels,
            source_width,
            source_height,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Size in pixels of the largest aspect-preserving grid that fits in
    /// `cols` x `rows` terminal cells, where each cell holds two pixel rows.
    pub fn fit(&self, cols: u16, rows: u16) -> (u16, u16) {
        if self.width == 0 || self.height == 0 || cols == 0 || rows == 0 {
            return (0, 0);
        }
        let max_w = cols as f64;
        let max_h = rows as f64 * 2.0;
        let scale = (max_w / self.width as f64).min(max_h / self.height as f64);
        let w = ((self.width as f64 * scale).floor() as u16).clamp(1, cols);
        let h = ((self.height as f64 * scale).floor() as u16).clamp(1, rows * 2);
        (w, h)
    }

    /// Nearest-neighbour sample of the pixel at `(x, y)` on a `grid_w` x `grid_h` grid.
    pub fn sample(&self, x: u16, y: u16, grid_w: u16, grid_h: u16) -> [u8; 3] {
        let sx = (x as u32 * self.width / grid_w.max(1) as u32).min(self.width - 1);
        let sy = (y as u32 * self.height / grid_h.max(1) as u32).min(self.height - 1);
        self.pixel(sx, sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 { Rgb([255u8, 0, 0]) } else { Rgb([0u8, 0, 255]) }
        });
        let mut bytes = Vec::new();
        buffer.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decode_small_image_keeps_size() {
        let preview = PreviewImage::decode(&png_bytes(8, 4), 160, 120).unwrap();
        assert_eq!((preview.width, preview.height), (8, 4));
        assert_eq!(preview.pixel(0, 0), [255, 0, 0]);
        assert_eq!(preview.pixel(7, 3), [0, 0, 255]);
    }

    #[test]
    fn test_decode_large_image_is_downscaled() {
        let preview = PreviewImage::decode(&png_bytes(640, 160), 160, 120).unwrap();
        assert_eq!((preview.source_width, preview.source_height), (640, 160));
        assert_eq!(preview.width, 160);
        assert_eq!(preview.height, 40);
        assert_eq!(preview.pixels.len(), 160 * 40);
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let err = PreviewImage::decode(b"definitely not a picture", 160, 120).unwrap_err();
        assert!(matches!(err, PreviewError::Decode(_)));
        assert!(matches!(Preview::from_bytes(b"text"), Preview::Undecodable(_)));
    }

    #[test]
    fn test_fit_preserves_aspect() {
        let preview = PreviewImage::decode(&png_bytes(100, 50), 160, 120).unwrap();
        // 40 cols by 10 rows gives a 40x20 pixel box; a 2:1 image fills it.
        assert_eq!(preview.fit(40, 10), (40, 20));
        // Height-bound: 5 rows is 10 pixels tall, so 20 wide.
        assert_eq!(preview.fit(80, 5), (20, 10));
        assert_eq!(preview.fit(0, 5), (0, 0));
    }

    #[test]
    fn test_sample_nearest_neighbour() {
        let preview = PreviewImage::decode(&png_bytes(8, 4), 160, 120).unwrap();
        assert_eq!(preview.sample(0, 0, 2, 1), [255, 0, 0]);
        assert_eq!(preview.sample(1, 0, 2, 1), [0, 0, 255]);
    }
}
