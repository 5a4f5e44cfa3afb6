// --- File: kernel.rs ---
use crate::grid::{BoundingBox, Grid, Offset};
use crate::optimized::OptimizedKernel;
use crate::reference::ReferenceKernel;
use std::fmt;
use std::str::FromStr;

/// Single-step evolution contract shared by every kernel.
///
/// `next_generation` must be pure: it never touches `grid`, and the same input
/// always produces the same `(grid, offset)` pair. The returned grid is the
/// bounding box of live cells (or the canonical empty grid when everything
/// died), and the offset is where that box's top-left corner sits relative to
/// the input grid's top-left corner.
pub trait Kernel: Send + Sync {
    fn name(&self) -> &'static str;
    fn next_generation(&self, grid: &Grid) -> (Grid, Offset);
}

/// B3/S23.
#[inline(always)]
pub fn rule(alive: bool, neighbors: u8) -> bool {
    neighbors == 3 || (neighbors == 2 && alive)
}

/// Crops a next-generation buffer laid out in the padded frame
/// (`padded_width` columns, input cell (r, c) at (r + 1, c + 1)).
pub(crate) fn crop_padded(
    next_padded: &[u8],
    padded_width: usize,
    bbox: Option<BoundingBox>,
) -> (Grid, Offset) {
    let Some(bbox) = bbox else {
        return (Grid::empty(), Offset::ZERO);
    };
    let (h, w) = (bbox.height(), bbox.width());
    let mut cells = Vec::with_capacity(h * w);
    for r in bbox.min_row..=bbox.max_row {
        let start = r * padded_width;
        cells.extend_from_slice(&next_padded[start + bbox.min_col..=start + bbox.max_col]);
    }
    let offset = Offset::new(bbox.min_row as i64 - 1, bbox.min_col as i64 - 1);
    (Grid::from_cells(h, w, cells), offset)
}

// --- Strategy selection ---

/// Which kernel body to run. Selected where the comparison is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    Reference,
    #[default]
    Optimized,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Reference, Strategy::Optimized];
}

impl Kernel for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Reference => ReferenceKernel.name(),
            Strategy::Optimized => OptimizedKernel::default().name(),
        }
    }

    fn next_generation(&self, grid: &Grid) -> (Grid, Offset) {
        match self {
            Strategy::Reference => ReferenceKernel.next_generation(grid),
            Strategy::Optimized => OptimizedKernel::default().next_generation(grid),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" | "ref" => Ok(Strategy::Reference),
            "optimized" | "opt" => Ok(Strategy::Optimized),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_is_b3_s23() {
        for n in 0..=8u8 {
            assert_eq!(rule(false, n), n == 3, "birth with {} neighbors", n);
            assert_eq!(rule(true, n), n == 2 || n == 3, "survival with {} neighbors", n);
        }
    }

    #[test]
    fn crop_reports_offset_in_unpadded_frame() {
        // 4x4 padded frame, single live cell at padded (0, 2)
        let mut buf = vec![0u8; 16];
        buf[2] = 1;
        let bbox = BoundingBox {
            min_row: 0,
            max_row: 0,
            min_col: 2,
            max_col: 2,
        };
        let (grid, offset) = crop_padded(&buf, 4, Some(bbox));
        assert_eq!(grid.to_rows(), vec![vec![1]]);
        assert_eq!(offset, Offset::new(-1, 1));
    }

    #[test]
    fn crop_without_live_cells_is_extinct() {
        assert_eq!(crop_padded(&[0; 9], 3, None), (Grid::empty(), Offset::ZERO));
    }

    #[test]
    fn strategy_parses_from_cli_names() {
        assert_eq!("reference".parse::<Strategy>(), Ok(Strategy::Reference));
        assert_eq!("OPT".parse::<Strategy>(), Ok(Strategy::Optimized));
        assert!("fast".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Optimized);
    }
}
