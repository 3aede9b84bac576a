//! Static game configuration.

use std::path::PathBuf;

use image::Rgba;

use crate::error::GeometryError;

pub const DEFAULT_SCREEN_WIDTH: u32 = 1000;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 700;
pub const DEFAULT_ROWS: u32 = 6;
pub const DEFAULT_COLS: u32 = 6;
/// Gap between neighbouring tiles, and around the outer ring of tiles.
pub const DEFAULT_MARGIN: u32 = 2;
/// Side of the square the puzzle picture is scaled down to fit.
pub const DEFAULT_MAX_PUZZLE_SIZE: u32 = 700;
pub const DEFAULT_PICTURES_DIR: &str = "pictures";
pub const DEFAULT_FRAME_FILE: &str = "box.jpg";

/// Translucent panel drawn behind the puzzle area.
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 100]);
/// Fill behind the selected tile.
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Background used when the frame image is unavailable.
pub const FALLBACK_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Everything the session derives its geometry and assets from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    pub rows: u32,
    pub cols: u32,
    pub margin: u32,
    pub max_puzzle_size: u32,
    pub pictures_dir: PathBuf,
    /// File name of the frame image inside `pictures_dir`; never offered as a puzzle.
    pub frame_file: String,
    /// Fixes picture choice and shuffle order when set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            margin: DEFAULT_MARGIN,
            max_puzzle_size: DEFAULT_MAX_PUZZLE_SIZE,
            pictures_dir: PathBuf::from(DEFAULT_PICTURES_DIR),
            frame_file: DEFAULT_FRAME_FILE.to_string(),
            seed: None,
        }
    }
}

impl Config {
    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Rejects configurations no board can be built from.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GeometryError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(GeometryError::EmptySurface {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if i32::try_from(self.screen_width).is_err() || i32::try_from(self.screen_height).is_err() {
            return Err(GeometryError::SurfaceTooLarge {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.max_puzzle_size == 0 {
            return Err(GeometryError::EmptyPuzzleArea);
        }
        Ok(())
    }
}
