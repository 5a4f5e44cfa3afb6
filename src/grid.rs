// --- File: grid.rs ---
use crate::constants::MAX_GRID_CELLS;
use std::fmt;
use std::ops::{Add, AddAssign};
use thiserror::Error;

pub const DEAD: u8 = 0;
pub const ALIVE: u8 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid shape: row {row} has {found} cells, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid argument: generation count must be non-negative, got {0}")]
    NegativeGenerations(i64),
    #[error("grid of {height}x{width} cells exceeds the limit of {limit} cells")]
    TooLarge {
        height: usize,
        width: usize,
        limit: usize,
    },
}

/// Translation of a grid's top-left corner in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub row: i64,
    pub col: i64,
}

impl Offset {
    pub const ZERO: Offset = Offset { row: 0, col: 0 };

    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.row += rhs.row;
        self.col += rhs.col;
    }
}

/// Inclusive bounds of the live cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl BoundingBox {
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// Grows the box to cover `other`.
    pub fn merge(self, other: BoundingBox) -> BoundingBox {
        BoundingBox {
            min_row: self.min_row.min(other.min_row),
            max_row: self.max_row.max(other.max_row),
            min_col: self.min_col.min(other.min_col),
            max_col: self.max_col.max(other.max_col),
        }
    }
}

/// Dense, row-major binary grid. Every cell is either `DEAD` or `ALIVE`.
///
/// A grid with no rows or no columns is always stored as the canonical 0x0
/// grid, so two empty grids compare equal regardless of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cell count of a `height` x `width` grid, if it fits under `MAX_GRID_CELLS`.
    pub fn checked_area(height: usize, width: usize) -> Result<usize, GridError> {
        height
            .checked_mul(width)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(GridError::TooLarge {
                height,
                width,
                limit: MAX_GRID_CELLS,
            })
    }

    /// All-dead grid of the given size.
    pub fn new(height: usize, width: usize) -> Self {
        if height == 0 || width == 0 {
            return Self::empty();
        }
        Self {
            height,
            width,
            cells: vec![DEAD; height * width],
        }
    }

    /// Builds a grid from row vectors. Any nonzero value counts as alive.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let width = first.as_ref().len();
        let mut cells = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::InvalidShape {
                    row: index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row.iter().map(|&v| if v != 0 { ALIVE } else { DEAD }));
        }
        Ok(Self::from_cells(rows.len(), width, cells))
    }

    /// Wraps an already-normalized 0/1 buffer of `height * width` cells.
    pub(crate) fn from_cells(height: usize, width: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        if height == 0 || width == 0 {
            return Self::empty();
        }
        Self {
            height,
            width,
            cells,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.width + col] = if alive { ALIVE } else { DEAD };
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on zero, and an empty grid has no rows anyway
        self.cells.chunks_exact(self.width.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == ALIVE).count()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for (r, row) in self.rows().enumerate() {
            let Some(first) = row.iter().position(|&c| c == ALIVE) else {
                continue;
            };
            // position() found one, so rposition() can't miss
            let last = row.iter().rposition(|&c| c == ALIVE).unwrap_or(first);
            let row_box = BoundingBox {
                min_row: r,
                max_row: r,
                min_col: first,
                max_col: last,
            };
            bbox = Some(match bbox {
                Some(b) => b.merge(row_box),
                None => row_box,
            });
        }
        bbox
    }

    /// Copies the sub-rectangle described by `bbox`.
    pub fn crop(&self, bbox: BoundingBox) -> Grid {
        let (h, w) = (bbox.height(), bbox.width());
        let mut cells = Vec::with_capacity(h * w);
        for r in bbox.min_row..=bbox.max_row {
            cells.extend_from_slice(&self.row(r)[bbox.min_col..=bbox.max_col]);
        }
        Grid::from_cells(h, w, cells)
    }
}

/// Reduces a grid to its minimal live-cell bounding box for comparison.
/// A grid with no live cells trims to a single dead cell.
pub fn trim(grid: &Grid) -> Grid {
    match grid.bounding_box() {
        Some(bbox) => grid.crop(bbox),
        None => Grid::new(1, 1),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            write!(f, "[")?;
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", cell)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
