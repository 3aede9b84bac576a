//! Cutting the puzzle picture into a grid of tiles.
//!
//! Tiles are views into the shared picture: each records which rectangle of
//! the source it shows and the grid position it came from. The picture itself
//! is owned by the session and never copied per tile.

use std::fmt;

use image::GenericImageView;

use crate::error::GeometryError;
use crate::geometry::Rect;

/// Original row-major grid index of a tile (`row * cols + col`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rectangular region of the source picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    /// Region of the source picture, in picture pixels.
    pub source: Rect,
}

/// Size shared by every tile of a `rows` x `cols` grid over a picture.
///
/// Uses floor division: the remainder columns on the right and rows at the
/// bottom are not covered by any tile.
pub fn tile_size(
    width: u32,
    height: u32,
    rows: u32,
    cols: u32,
) -> Result<(u32, u32), GeometryError> {
    if rows == 0 || cols == 0 {
        return Err(GeometryError::EmptyGrid { rows, cols });
    }
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptyImage { width, height });
    }
    let tile_width = width / cols;
    let tile_height = height / rows;
    if tile_width == 0 || tile_height == 0 {
        return Err(GeometryError::TilesTooSmall {
            width,
            height,
            rows,
            cols,
        });
    }
    Ok((tile_width, tile_height))
}

/// Partitions a picture into `rows * cols` tiles in row-major order.
pub fn slice<I: GenericImageView>(
    image: &I,
    rows: u32,
    cols: u32,
) -> Result<Vec<Tile>, GeometryError> {
    let (width, height) = image.dimensions();
    let (tile_width, tile_height) = tile_size(width, height, rows, cols)?;

    let tiles = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .map(|(row, col)| Tile {
            id: TileId((row * cols + col) as usize),
            source: Rect::new(
                (col * tile_width) as i32,
                (row * tile_height) as i32,
                tile_width,
                tile_height,
            ),
        })
        .collect();

    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    /// Counts how many tiles cover each pixel of the picture.
    fn coverage(tiles: &[Tile], width: u32, height: u32) -> Vec<u32> {
        let mut counts = vec![0u32; (width * height) as usize];
        for tile in tiles {
            let source = tile.source;
            for y in source.y..source.bottom() {
                for x in source.x..source.right() {
                    counts[(y as u32 * width + x as u32) as usize] += 1;
                }
            }
        }
        counts
    }

    #[test]
    fn test_slice_produces_rows_times_cols_in_row_major_order() {
        let tiles = slice(&blank(600, 400), 2, 3).unwrap();
        assert_eq!(tiles.len(), 6);
        for (index, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.id, TileId(index), "Tile {index} out of order");
        }
        assert_eq!(tiles[0].source, Rect::new(0, 0, 200, 200));
        assert_eq!(tiles[2].source, Rect::new(400, 0, 200, 200));
        assert_eq!(tiles[4].source, Rect::new(200, 200, 200, 200));
    }

    #[test]
    fn test_remainder_pixels_are_excluded() {
        let tiles = slice(&blank(103, 52), 5, 10).unwrap();
        assert_eq!(tiles.len(), 50);
        let last = tiles.last().unwrap();
        assert_eq!(last.source, Rect::new(90, 40, 10, 10));

        let counts = coverage(&tiles, 103, 52);
        for y in 0..52 {
            for x in 0..103 {
                let expected = if x < 100 && y < 50 { 1 } else { 0 };
                assert_eq!(
                    counts[(y * 103 + x) as usize],
                    expected,
                    "Pixel ({x},{y}) covered the wrong number of times"
                );
            }
        }
    }

    #[test]
    fn test_no_overlap_for_many_grid_shapes() {
        for (width, height) in [(36, 36), (50, 31), (17, 99), (64, 48)] {
            for rows in 1..=6 {
                for cols in 1..=6 {
                    let tiles = slice(&blank(width, height), rows, cols).unwrap();
                    assert_eq!(tiles.len(), (rows * cols) as usize);
                    let counts = coverage(&tiles, width, height);
                    assert!(
                        counts.iter().all(|&count| count <= 1),
                        "Overlap slicing {width}x{height} into {rows}x{cols}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        assert_eq!(
            slice(&blank(0, 10), 2, 2),
            Err(GeometryError::EmptyImage {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            slice(&blank(10, 10), 0, 2),
            Err(GeometryError::EmptyGrid { rows: 0, cols: 2 })
        );
        assert_eq!(
            slice(&blank(5, 10), 2, 6),
            Err(GeometryError::TilesTooSmall {
                width: 5,
                height: 10,
                rows: 2,
                cols: 6
            })
        );
    }
}
