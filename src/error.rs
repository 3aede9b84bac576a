//! Error types for startup and board construction.
//!
//! Every failure surfaces before the first frame is drawn; once a session is
//! running, clicks cannot fail.

use std::path::PathBuf;

/// Problems with the picture directory or its files.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read picture directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no puzzle pictures (.jpg, .jpeg, .png) found in {0}")]
    NoCandidates(PathBuf),
    #[error("cannot decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Degenerate configuration or image dimensions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("render surface must be non-empty (got {width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("render surface {width}x{height} exceeds the drawable coordinate range")]
    SurfaceTooLarge { width: u32, height: u32 },
    #[error("maximum puzzle size must be positive")]
    EmptyPuzzleArea,
    #[error("a {rows}x{cols} grid with a {margin} px margin overflows the drawable coordinate range")]
    AreaOverflow { rows: u32, cols: u32, margin: u32 },
    #[error("image has a zero dimension ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("a {width}x{height} image is too small for a {rows}x{cols} grid")]
    TilesTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
}

/// A cell arrangement that is not a permutation of the tile identities.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must hold at least one tile")]
    Empty,
    #[error("tile {tile} is out of range for a board of {len} cells")]
    OutOfRange { tile: usize, len: usize },
    #[error("tile {0} appears more than once")]
    Duplicate(usize),
    #[error("board has {board} cells but the grid has {grid}")]
    SizeMismatch { board: usize, grid: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Board(#[from] BoardError),
}
