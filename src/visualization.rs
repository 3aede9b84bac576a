//! Puzzle window using kiss3d.
//!
//! [`Session::render`] drives a [`SceneRenderer`], which turns each draw call
//! into a rectangle node of a 2D scene. Nodes are pooled and reused in call
//! order, so the scene only grows to the largest frame seen. Every distinct
//! image region is registered as a texture once; swapping tiles just moves
//! nodes. Labels are measured with kiss3d's font and redrawn every frame
//! because kiss3d text is immediate-mode.

use std::sync::Arc;

use image::imageops;
use image::{DynamicImage, Rgba, RgbaImage};
use kiss3d::event::{Action, MouseButton, WindowEvent};
use kiss3d::prelude::*;
use kiss3d::resource::{Texture, TextureManager};
use log::debug;

use tileswap::config::FALLBACK_BACKGROUND;
use tileswap::geometry::Rect;
use tileswap::session::Session;
use tileswap::{Renderer, TextLabel};

const WINDOW_TITLE: &str = "Tile Swap Puzzle";

/// Converts an 8-bit RGBA colour to kiss3d's float colour.
fn to_color(color: Rgba<u8>) -> Color {
    let [r, g, b, a] = color.0.map(|channel| channel as f32 / 255.0);
    Color::new(r, g, b, a)
}

/// Retained-mode [`Renderer`] over a kiss3d 2D scene.
struct SceneRenderer {
    scene: SceneNode2d,
    nodes: Vec<SceneNode2d>,
    /// Nodes claimed since the last [`SceneRenderer::begin`].
    used: usize,
    screen: (f32, f32),
    font: Arc<Font>,
    /// Labels with their measured text bounds.
    labels: Vec<(TextLabel, Rect)>,
}

impl SceneRenderer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            scene: SceneNode2d::empty(),
            nodes: Vec::new(),
            used: 0,
            screen: (width as f32, height as f32),
            font: Font::default(),
            labels: Vec::new(),
        }
    }

    /// Starts a new frame; nodes are handed out again from the first one.
    fn begin(&mut self) {
        self.used = 0;
        self.labels.clear();
    }

    /// Hides the nodes the frame did not claim.
    fn finish(&mut self) {
        for node in &mut self.nodes[self.used..] {
            node.set_visible(false);
        }
    }

    fn scene_mut(&mut self) -> &mut SceneNode2d {
        &mut self.scene
    }

    /// Claims the next node and places it over `rect`.
    ///
    /// The camera has its origin at the window centre with y pointing up, so
    /// surface coordinates are flipped around the centre.
    fn claim(&mut self, rect: Rect) -> &mut SceneNode2d {
        if self.used == self.nodes.len() {
            let node = self.scene.add_rectangle(1.0, 1.0);
            self.nodes.push(node);
        }
        let (width, height) = (rect.width as f32, rect.height as f32);
        let position = Vec2::new(
            rect.x as f32 + width / 2.0 - self.screen.0 / 2.0,
            self.screen.1 / 2.0 - rect.y as f32 - height / 2.0,
        );

        let node = &mut self.nodes[self.used];
        self.used += 1;
        node.set_visible(true);
        node.set_local_scale(width, height);
        node.set_position(position);
        node
    }

    /// Surface-space text bounds of every label drawn this frame.
    fn labels(&self) -> &[(TextLabel, Rect)] {
        &self.labels
    }
}

/// Name under which the `source` region of `image` is registered.
///
/// Derived from the image's buffer address and the region, so the same tile
/// of the same picture always maps to the same texture.
fn texture_key(image: &RgbaImage, source: Rect) -> String {
    format!(
        "tileswap-{:p}-{}-{}-{}x{}",
        image.as_ptr(),
        source.x,
        source.y,
        source.width,
        source.height
    )
}

/// Texture for the `source` region of `image`, registered on first use.
fn region_texture(
    image: &RgbaImage,
    source_x: u32,
    source_y: u32,
    source: Rect,
) -> Arc<Texture> {
    let name = texture_key(image, source);
    TextureManager::get_global_manager(|textures| match textures.get(&name) {
        Some(texture) => texture,
        None => {
            let region = imageops::crop_imm(image, source_x, source_y, source.width, source.height);
            debug!("Registering texture {name}");
            textures.add_image(DynamicImage::ImageRgba8(region.to_image()), &name)
        }
    })
}

/// Advance width and line height of `label` set in `font`.
fn measure(font: &Font, label: &TextLabel) -> (u32, u32) {
    let font = font.font();
    let scale = rusttype::Scale::uniform(label.size);
    let metrics = font.v_metrics(scale);
    let width = font
        .layout(&label.text, scale, rusttype::point(0.0, 0.0))
        .last()
        .map_or(0.0, |glyph| {
            glyph.position().x + glyph.unpositioned().h_metrics().advance_width
        });
    (
        width.ceil() as u32,
        (metrics.ascent - metrics.descent).ceil() as u32,
    )
}

impl Renderer for SceneRenderer {
    fn draw_image(&mut self, image: &RgbaImage, source: Rect, at: (i32, i32)) {
        let (Ok(source_x), Ok(source_y)) = (u32::try_from(source.x), u32::try_from(source.y))
        else {
            return;
        };
        // same clamping as crop_imm
        let width = source.width.min(image.width().saturating_sub(source_x));
        let height = source.height.min(image.height().saturating_sub(source_y));
        if width == 0 || height == 0 {
            return;
        }
        let source = Rect::new(source.x, source.y, width, height);

        let texture = region_texture(image, source_x, source_y, source);
        let node = self.claim(Rect::new(at.0, at.1, width, height));
        node.set_color(WHITE);
        node.set_texture(texture);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        let plain = TextureManager::get_global_manager(|textures| textures.get_default());
        let node = self.claim(rect);
        node.set_color(to_color(color));
        node.set_texture(plain);
    }

    fn draw_text(&mut self, label: &TextLabel) {
        let text_size = self.measure_text(label);
        if let Some(background) = label.background {
            self.fill_rect(label.box_bounds_for(text_size), background);
        }
        self.labels.push((label.clone(), label.text_bounds_for(text_size)));
    }

    fn measure_text(&self, label: &TextLabel) -> (u32, u32) {
        measure(&self.font, label)
    }
}

/// Runs the puzzle window until it is closed.
pub fn play(session: Session) {
    pollster::block_on(play_async(session));
}

async fn play_async(mut session: Session) {
    let (width, height) = session.screen_size();
    let mut window = Window::new_with_size(WINDOW_TITLE, width, height).await;
    window.set_background_color(to_color(FALLBACK_BACKGROUND));

    let mut camera = FixedView2d::new();
    let mut renderer = SceneRenderer::new(width, height);
    let mut cursor = (0.0f64, 0.0f64);
    // the first frame always needs building
    let mut needs_redraw = true;

    loop {
        for event in window.events().iter() {
            match event.value {
                WindowEvent::CursorPos(x, y, _) => cursor = (x, y),
                WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                    // cursor positions arrive in physical pixels
                    let scale = window.scale_factor();
                    let x = (cursor.0 / scale).floor() as i32;
                    let y = (cursor.1 / scale).floor() as i32;
                    if session.handle_click(x, y).changed() {
                        needs_redraw = true;
                    }
                }
                _ => {}
            }
        }

        if needs_redraw {
            renderer.begin();
            session.render(&mut renderer);
            renderer.finish();
            debug!("Scene rebuilt with {} nodes", renderer.used);
            needs_redraw = false;
        }

        // text is positioned in physical pixels, top-left of the line box
        let scale = window.scale_factor() as f32;
        for (label, bounds) in renderer.labels() {
            window.draw_text(
                &label.text,
                Vec2::new(bounds.x as f32 * scale, bounds.y as f32 * scale),
                label.size * scale,
                &renderer.font,
                to_color(label.color),
            );
        }

        // render_2d presents one frame per call, paced by the display
        if !window.render_2d(renderer.scene_mut(), &mut camera).await {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tileswap::board::Board;
    use tileswap::config::Config;
    use tileswap::tiles::TileId;

    use super::*;

    /// Collects the texture names a frame would use.
    #[derive(Default)]
    struct TextureKeys(BTreeSet<String>);

    impl Renderer for TextureKeys {
        fn draw_image(&mut self, image: &RgbaImage, source: Rect, _: (i32, i32)) {
            self.0.insert(texture_key(image, source));
        }

        fn fill_rect(&mut self, _: Rect, _: Rgba<u8>) {}

        fn draw_text(&mut self, _: &TextLabel) {}
    }

    fn label(text: &str) -> TextLabel {
        TextLabel {
            text: text.to_string(),
            center: (500, 670),
            size: 32.0,
            color: Rgba([255, 255, 255, 255]),
            background: Some(Rgba([0, 0, 0, 255])),
        }
    }

    #[test]
    fn test_swaps_reuse_registered_textures() {
        let config = Config {
            screen_width: 100,
            screen_height: 160,
            rows: 2,
            cols: 2,
            ..Config::default()
        };
        let board = Board::from_cells([1, 0, 3, 2].map(TileId).to_vec()).unwrap();
        let mut session = Session::new(
            &config,
            RgbaImage::new(40, 40),
            RgbaImage::new(100, 160),
            board,
        )
        .unwrap();

        let mut before = TextureKeys::default();
        session.render(&mut before);
        // the frame plus one per tile
        assert_eq!(before.0.len(), 5);

        for index in 0..4 {
            let (x, y) = session.layout().cell_rect(index).center();
            session.handle_click(x, y);
        }
        assert_eq!(session.board().swaps(), 2);

        let mut after = TextureKeys::default();
        session.render(&mut after);
        assert_eq!(after.0, before.0, "Swapping must not need new textures");
    }

    #[test]
    fn test_measured_text_fits_wide_glyphs() {
        let font = Font::default();
        let wide = label("WWWW");
        let (width, height) = measure(&font, &wide);
        assert!(
            width > wide.estimated_size().0,
            "Measured {width} px should exceed the half-em estimate"
        );
        assert!(height >= 32, "Line height {height} is shorter than the font size");
        assert!(wide.box_bounds_for((width, height)).width > width);
    }

    #[test]
    fn test_measured_text_grows_with_length() {
        let font = Font::default();
        let (short, _) = measure(&font, &label("Swaps: 9"));
        let (long, _) = measure(&font, &label("Swaps: 99"));
        assert!(long > short);
        assert_eq!(measure(&font, &label("")).0, 0);
    }
}
