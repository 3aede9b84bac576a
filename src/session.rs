//! One game session: the picture, its tiles, the board and the layout.
//!
//! Everything is built once at startup. Afterwards the only mutation is
//! [`Session::handle_click`], and [`Session::render`] reads the current state
//! to draw a full frame.

use image::{Rgba, RgbaImage};
use log::{debug, info};
use rand::Rng;

use crate::assets::{load_frame_or_default, pick_picture, scale_to_fit, PicturePicker};
use crate::board::{Board, ClickOutcome};
use crate::config::{Config, HIGHLIGHT_COLOR, SHADOW_COLOR};
use crate::error::{BoardError, Error};
use crate::geometry::Rect;
use crate::layout::Layout;
use crate::tiles::{slice, Tile};
use crate::{Renderer, TextLabel};

pub const SWAP_COUNTER_SIZE: f32 = 32.0;
/// Distance of the swap counter's centre from the bottom of the surface.
pub const SWAP_COUNTER_OFFSET: i32 = 30;
pub const BANNER_SIZE: f32 = 64.0;
pub const BANNER_TEXT: &str = "Puzzle complete!";

const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LABEL_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct Session {
    screen_width: u32,
    screen_height: u32,
    cols: u32,
    /// Background, already sized to the surface.
    frame: RgbaImage,
    /// The scaled puzzle picture all tiles point into.
    picture: RgbaImage,
    /// Tiles indexed by their `TileId`.
    tiles: Vec<Tile>,
    board: Board,
    layout: Layout,
}

impl Session {
    /// Picks a picture through `picker` and starts a shuffled session.
    pub fn start<P, R>(config: &Config, picker: &P, rng: &mut R) -> Result<Self, Error>
    where
        P: PicturePicker + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let path = pick_picture(picker, rng)?;
        info!("Picture: {}", path.display());
        let picture = picker.load(&path)?;
        let frame = load_frame_or_default(picker, config.screen_width, config.screen_height);
        let board = Board::shuffled(config.cell_count(), rng)?;
        Self::new(config, picture, frame, board)
    }

    /// Builds a session from already-loaded images and a starting board.
    ///
    /// The picture is scaled down to the configured maximum puzzle size; the
    /// frame is used as given.
    pub fn new(
        config: &Config,
        picture: RgbaImage,
        frame: RgbaImage,
        board: Board,
    ) -> Result<Self, Error> {
        config.validate()?;
        let (original_width, original_height) = picture.dimensions();
        let picture = scale_to_fit(picture, config.max_puzzle_size);
        let tiles = slice(&picture, config.rows, config.cols)?;
        if board.len() != tiles.len() {
            return Err(BoardError::SizeMismatch {
                board: board.len(),
                grid: tiles.len(),
            }
            .into());
        }

        let (tile_width, tile_height) = (tiles[0].source.width, tiles[0].source.height);
        let layout = Layout::from_config(config, tile_width, tile_height)?;
        info!(
            "Picture {}x{} scaled to {}x{}; {}x{} grid of {}x{} tiles",
            original_width,
            original_height,
            picture.width(),
            picture.height(),
            config.rows,
            config.cols,
            tile_width,
            tile_height
        );
        debug!("Starting board:\n{}", board.format_grid(config.cols as usize));

        Ok(Self {
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            cols: config.cols,
            frame,
            picture,
            tiles,
            board,
            layout,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn picture(&self) -> &RgbaImage {
        &self.picture
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Handles a primary-button press at surface coordinates `(x, y)`.
    pub fn handle_click(&mut self, x: i32, y: i32) -> ClickOutcome {
        let was_solved = self.board.is_solved();
        let hit = self.layout.hit_test(x, y);
        let outcome = self.board.apply_click(hit);
        debug!("Click at ({x}, {y}) -> {outcome:?}");

        if let ClickOutcome::Swapped { first, second } = outcome {
            info!(
                "Swapped cells {first} and {second} ({} swaps)",
                self.board.swaps()
            );
            debug!("Board:\n{}", self.board.format_grid(self.cols as usize));
            if !was_solved && self.board.is_solved() {
                info!("Solved in {} swaps", self.board.swaps());
            }
        }
        outcome
    }

    /// Label showing the running swap count.
    pub fn swap_counter_label(&self) -> TextLabel {
        TextLabel {
            text: format!("Swaps: {}", self.board.swaps()),
            center: (
                (self.screen_width / 2) as i32,
                self.screen_height as i32 - SWAP_COUNTER_OFFSET,
            ),
            size: SWAP_COUNTER_SIZE,
            color: LABEL_COLOR,
            background: Some(LABEL_BACKGROUND),
        }
    }

    /// Completion banner, present only while the board is solved.
    pub fn banner_label(&self) -> Option<TextLabel> {
        self.board.is_solved().then(|| TextLabel {
            text: BANNER_TEXT.to_string(),
            center: (
                (self.screen_width / 2) as i32,
                (self.screen_height / 2) as i32,
            ),
            size: BANNER_SIZE,
            color: LABEL_COLOR,
            background: Some(LABEL_BACKGROUND),
        })
    }

    /// Draws one complete frame.
    ///
    /// Order: background, shadow panel, then each cell in index order (its
    /// highlight first if selected), the swap counter, and the banner when
    /// solved.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_image(
            &self.frame,
            Rect::new(0, 0, self.frame.width(), self.frame.height()),
            (0, 0),
        );
        renderer.fill_rect(self.layout.puzzle_area(), SHADOW_COLOR);

        let selected = self.board.selection().cell();
        for (index, tile_id) in self.board.cells().iter().enumerate() {
            let cell = self.layout.cell_rect(index);
            if selected == Some(index) {
                renderer.fill_rect(self.layout.highlight_rect(index), HIGHLIGHT_COLOR);
            }
            let tile = &self.tiles[tile_id.0];
            renderer.draw_image(&self.picture, tile.source, (cell.x, cell.y));
        }

        renderer.draw_text(&self.swap_counter_label());
        if let Some(banner) = self.banner_label() {
            renderer.draw_text(&banner);
        }
    }
}
