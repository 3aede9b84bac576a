//! Tile Swap Puzzle Library
//!
//! Cuts a picture into a grid of tiles, shuffles them, and tracks the player
//! restoring the picture by swapping pairs of tiles. Drawing and input are
//! left to the caller through the [`Renderer`] trait and
//! [`session::Session::handle_click`].

pub mod assets;
pub mod board;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod session;
pub mod tiles;

use image::{Rgba, RgbaImage};

use geometry::Rect;

/// Padding between a label's text and the edge of its background box.
pub const LABEL_PADDING: u32 = 2;

/// Approximate advance of one glyph as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.5;

/// A line of text centred on a point, optionally on a solid box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub center: (i32, i32),
    /// Font size in pixels.
    pub size: f32,
    pub color: Rgba<u8>,
    pub background: Option<Rgba<u8>>,
}

impl TextLabel {
    /// Rough size of the rendered text, for renderers without font metrics.
    ///
    /// Every glyph is assumed to be half as wide as it is tall. Proportional
    /// fonts can run wider, so renderers that have the real font override
    /// [`Renderer::measure_text`].
    pub fn estimated_size(&self) -> (u32, u32) {
        let glyphs = self.text.chars().count() as f32;
        let width = (glyphs * self.size * GLYPH_ASPECT).ceil() as u32;
        (width, self.size.ceil() as u32)
    }

    /// Rectangle of text measuring `width` x `height`, centred on the label.
    pub fn text_bounds_for(&self, (width, height): (u32, u32)) -> Rect {
        Rect::new(
            self.center.0 - (width / 2) as i32,
            self.center.1 - (height / 2) as i32,
            width,
            height,
        )
    }

    /// Background box around text of the given size, grown by [`LABEL_PADDING`].
    pub fn box_bounds_for(&self, text_size: (u32, u32)) -> Rect {
        self.text_bounds_for(text_size).inflate(LABEL_PADDING)
    }

    /// Text bounds from [`TextLabel::estimated_size`].
    pub fn text_bounds(&self) -> Rect {
        self.text_bounds_for(self.estimated_size())
    }

    /// Background box from [`TextLabel::estimated_size`].
    pub fn box_bounds(&self) -> Rect {
        self.box_bounds_for(self.estimated_size())
    }
}

/// Drawing capability consumed by [`session::Session::render`].
///
/// Coordinates are render-surface pixels with the origin at the top left.
/// Implementations clip anything that falls outside the surface.
pub trait Renderer {
    /// Draws the `source` region of `image` with its top-left corner at `at`.
    fn draw_image(&mut self, image: &RgbaImage, source: Rect, at: (i32, i32));
    /// Fills `rect`, blending by the colour's alpha.
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);
    fn draw_text(&mut self, label: &TextLabel);

    /// Pixel size of `label`'s text as this renderer will draw it.
    fn measure_text(&self, label: &TextLabel) -> (u32, u32) {
        label.estimated_size()
    }
}
