//! Mapping between grid cells and screen rectangles.
//!
//! The puzzle area is `cols * (tile_width + margin) + margin` wide (and the
//! same for rows/height) and is centred on the render surface using floor
//! division, so it may start at a negative coordinate when it is larger than
//! the surface. Cell `i` sits at row `i / cols`, column `i % cols`.

use crate::config::Config;
use crate::error::GeometryError;
use crate::geometry::Rect;

/// Derived, read-only geometry of one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    tile_width: u32,
    tile_height: u32,
    margin: u32,
    rows: u32,
    cols: u32,
    /// Outer rectangle of the puzzle area, margins included.
    area: Rect,
}

impl Layout {
    /// Fails when the puzzle area or the surface does not fit in `i32`
    /// coordinates.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        margin: u32,
        rows: u32,
        cols: u32,
        screen_width: u32,
        screen_height: u32,
    ) -> Result<Self, GeometryError> {
        let overflow = || GeometryError::AreaOverflow { rows, cols, margin };
        let area_width = span(cols, tile_width, margin).ok_or_else(overflow)?;
        let area_height = span(rows, tile_height, margin).ok_or_else(overflow)?;
        let origin_x = centre_offset(screen_width, area_width);
        let origin_y = centre_offset(screen_height, area_height);
        let (Some(origin_x), Some(origin_y)) = (origin_x, origin_y) else {
            return Err(GeometryError::SurfaceTooLarge {
                width: screen_width,
                height: screen_height,
            });
        };

        Ok(Self {
            tile_width,
            tile_height,
            margin,
            rows,
            cols,
            area: Rect::new(origin_x, origin_y, area_width, area_height),
        })
    }

    /// Builds the layout for tiles of the given size under `config`.
    pub fn from_config(
        config: &Config,
        tile_width: u32,
        tile_height: u32,
    ) -> Result<Self, GeometryError> {
        Self::new(
            tile_width,
            tile_height,
            config.margin,
            config.rows,
            config.cols,
            config.screen_width,
            config.screen_height,
        )
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn puzzle_area(&self) -> Rect {
        self.area
    }

    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Screen rectangle of the tile drawn in cell `index`.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let row = (index / self.cols as usize) as i32;
        let col = (index % self.cols as usize) as i32;
        let step_x = (self.tile_width + self.margin) as i32;
        let step_y = (self.tile_height + self.margin) as i32;
        Rect::new(
            self.area.x + col * step_x + self.margin as i32,
            self.area.y + row * step_y + self.margin as i32,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Rectangle filled behind a selected cell; reaches one margin past the tile.
    pub fn highlight_rect(&self, index: usize) -> Rect {
        self.cell_rect(index).inflate(self.margin)
    }

    /// Returns the first cell, in row-major order, whose rectangle contains
    /// the point (edges included), or `None` for points in margins or outside
    /// the puzzle area.
    pub fn hit_test(&self, px: i32, py: i32) -> Option<usize> {
        (0..self.cell_count()).find(|&index| self.cell_rect(index).contains_inclusive(px, py))
    }
}

/// `count * (tile + margin) + margin`, if it fits a positive `i32`.
fn span(count: u32, tile: u32, margin: u32) -> Option<u32> {
    let total = count.checked_mul(tile.checked_add(margin)?)?.checked_add(margin)?;
    i32::try_from(total).ok()?;
    Some(total)
}

/// Floor-divided offset that centres `inner` within `outer`.
fn centre_offset(outer: u32, inner: u32) -> Option<i32> {
    let outer = i32::try_from(outer).ok()?;
    // both operands are non-negative i32, so the difference cannot overflow
    Some((outer - inner as i32).div_euclid(2))
}
