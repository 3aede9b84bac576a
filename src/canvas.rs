//! Software [`Renderer`] that composites a frame into an RGBA buffer.
//!
//! Images and rectangles are blended into the buffer immediately. Text cannot
//! be rasterised without a font, so labels only get their background box
//! drawn here and are queued for whoever presents the frame.

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::geometry::Rect;
use crate::{Renderer, TextLabel};

pub struct Canvas {
    frame: RgbaImage,
    labels: Vec<TextLabel>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::new(width, height),
            labels: Vec::new(),
        }
    }

    /// Fills the whole frame with `color` and drops queued labels.
    pub fn clear(&mut self, color: Rgba<u8>) {
        for pixel in self.frame.pixels_mut() {
            *pixel = color;
        }
        self.labels.clear();
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    /// Labels drawn since the last [`Canvas::clear`], in draw order.
    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }
}

impl Renderer for Canvas {
    fn draw_image(&mut self, image: &RgbaImage, source: Rect, at: (i32, i32)) {
        let (Ok(source_x), Ok(source_y)) = (u32::try_from(source.x), u32::try_from(source.y))
        else {
            return;
        };
        // crop_imm clamps the region to the image; overlay clips to the frame
        let region = imageops::crop_imm(image, source_x, source_y, source.width, source.height);
        imageops::overlay(&mut self.frame, &region.to_image(), at.0 as i64, at.1 as i64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let (width, height) = self.frame.dimensions();
        let Some(visible) = rect.clip_to(width, height) else {
            return;
        };
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                blend_over(self.frame.get_pixel_mut(x as u32, y as u32), color);
            }
        }
    }

    fn draw_text(&mut self, label: &TextLabel) {
        if let Some(background) = label.background {
            let text_size = self.measure_text(label);
            self.fill_rect(label.box_bounds_for(text_size), background);
        }
        self.labels.push(label.clone());
    }
}

/// Source-over compositing onto a frame pixel; the frame's own alpha is
/// left as it is so an opaque frame stays opaque.
fn blend_over(destination: &mut Rgba<u8>, source: Rgba<u8>) {
    let alpha = u32::from(source[3]);
    for channel in 0..3 {
        let over = u32::from(source[channel]) * alpha;
        let under = u32::from(destination[channel]) * (255 - alpha);
        destination[channel] = ((over + under + 127) / 255) as u8;
    }
}
