//! Board state: which tile occupies each cell, the selection, and the swap count.
//!
//! The board is driven by one transition, [`Board::apply_click`], fed with a
//! hit-test result:
//!
//! | selection     | click misses | click on `j`       | click on selected `i` | click on `j != i`           |
//! |---------------|--------------|--------------------|-----------------------|-----------------------------|
//! | `Empty`       | no-op        | select `j`         | -                     | -                           |
//! | `Selected(i)` | no-op        | -                  | deselect              | swap `i`, `j`; count; clear |
//!
//! The cells always hold a permutation of the tile identities.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BoardError;
use crate::tiles::TileId;

/// The at-most-one cell marked for swapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Selected(usize),
}

impl Selection {
    pub fn cell(self) -> Option<usize> {
        match self {
            Selection::Empty => None,
            Selection::Selected(index) => Some(index),
        }
    }
}

/// What a click did to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click hit no cell.
    Ignored,
    Selected(usize),
    Deselected(usize),
    Swapped { first: usize, second: usize },
}

impl ClickOutcome {
    /// Returns true if the click changed anything that is drawn.
    pub fn changed(self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Tile currently shown in each cell, indexed by cell.
    cells: Vec<TileId>,
    /// Identity order; the win condition.
    solution: Vec<TileId>,
    selection: Selection,
    swaps: u32,
}

impl Board {
    /// Creates a board of `len` cells holding the tiles in solved order.
    pub fn solved(len: usize) -> Result<Self, BoardError> {
        if len == 0 {
            return Err(BoardError::Empty);
        }
        let solution: Vec<TileId> = (0..len).map(TileId).collect();
        Ok(Self {
            cells: solution.clone(),
            solution,
            selection: Selection::Empty,
            swaps: 0,
        })
    }

    /// Creates a board of `len` cells in an order drawn from `rng`.
    ///
    /// The result may happen to be solved; with more than a handful of cells
    /// that is vanishingly rare.
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Self::solved(len)?;
        board.cells.shuffle(rng);
        Ok(board)
    }

    /// Creates a board with an explicit arrangement, which must be a
    /// permutation of `0..cells.len()`.
    pub fn from_cells(cells: Vec<TileId>) -> Result<Self, BoardError> {
        check_permutation(&cells)?;
        let mut board = Self::solved(cells.len())?;
        board.cells = cells;
        Ok(board)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[TileId] {
        &self.cells
    }

    pub fn tile_at(&self, index: usize) -> Option<TileId> {
        self.cells.get(index).copied()
    }

    pub fn solution(&self) -> &[TileId] {
        &self.solution
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Feeds one click's hit-test result through the selection state machine.
    ///
    /// Hits beyond the board are treated like misses.
    pub fn apply_click(&mut self, hit: Option<usize>) -> ClickOutcome {
        let Some(clicked) = hit.filter(|&index| index < self.cells.len()) else {
            return ClickOutcome::Ignored;
        };

        match self.selection {
            Selection::Empty => {
                self.selection = Selection::Selected(clicked);
                ClickOutcome::Selected(clicked)
            }
            Selection::Selected(selected) if selected == clicked => {
                self.selection = Selection::Empty;
                ClickOutcome::Deselected(clicked)
            }
            Selection::Selected(selected) => {
                self.swap(selected, clicked);
                self.swaps += 1;
                self.selection = Selection::Empty;
                ClickOutcome::Swapped {
                    first: selected,
                    second: clicked,
                }
            }
        }
    }

    /// Exchanges the tiles in two cells. Does not touch the selection or the
    /// swap counter.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn swap(&mut self, first: usize, second: usize) {
        self.cells.swap(first, second);
    }

    /// Returns true if every cell holds the tile that originally belonged there.
    ///
    /// Compared on every call rather than cached. For boards of a few dozen
    /// cells this is negligible; a flag refreshed on each swap would work
    /// equally well for much larger boards.
    pub fn is_solved(&self) -> bool {
        self.cells == self.solution
    }

    /// Returns true if the cells hold each tile identity exactly once.
    pub fn is_permutation(&self) -> bool {
        check_permutation(&self.cells).is_ok()
    }

    /// Formats the board as a grid of tile identities, one row per line.
    ///
    /// The selected cell is marked with `*`; the final line reports the swap
    /// count and whether the board is solved.
    pub fn format_grid(&self, cols: usize) -> String {
        let cols = cols.max(1);
        let width = self.len().saturating_sub(1).to_string().len();
        let mut output = String::new();

        for (row_index, row) in self.cells.chunks(cols).enumerate() {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, tile)| {
                    let selected = self.selection == Selection::Selected(row_index * cols + col);
                    let mark = if selected { '*' } else { ' ' };
                    format!("{:>width$}{mark}", tile.0)
                })
                .collect();
            output.push_str(line.join(" ").trim_end());
            output.push('\n');
        }

        output.push_str(&format!(
            "swaps: {}, solved: {}\n",
            self.swaps,
            self.is_solved()
        ));
        output
    }
}

fn check_permutation(cells: &[TileId]) -> Result<(), BoardError> {
    if cells.is_empty() {
        return Err(BoardError::Empty);
    }
    let mut seen = vec![false; cells.len()];
    for &TileId(tile) in cells {
        if tile >= cells.len() {
            return Err(BoardError::OutOfRange {
                tile,
                len: cells.len(),
            });
        }
        if seen[tile] {
            return Err(BoardError::Duplicate(tile));
        }
        seen[tile] = true;
    }
    Ok(())
}
