// --- File: optimized.rs ---
use crate::constants::PARALLEL_CELL_THRESHOLD;
use crate::grid::{ALIVE, BoundingBox, Grid, Offset};
use crate::kernel::{Kernel, crop_padded, rule};
use rayon::prelude::*;

/// Row-parallel kernel.
///
/// Each padded row is produced from three vertical column sums and a sliding
/// 3-wide window over them, so every cell costs a handful of adds instead of a
/// 3x3 scan. Rows whose neighborhood is entirely dead are zero-filled without
/// counting. Workers own disjoint output rows and report the live column range
/// of their row, which gives an exact bounding box once merged.
#[derive(Debug, Clone, Copy)]
pub struct OptimizedKernel {
    /// Padded frames with fewer cells than this run on the calling thread.
    pub parallel_threshold: usize,
}

impl Default for OptimizedKernel {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_CELL_THRESHOLD,
        }
    }
}

impl OptimizedKernel {
    pub fn with_parallel_threshold(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }
}

// Live column range of one output row, if any cell survived.
type RowSpan = Option<(usize, usize)>;

struct PaddedFrame<'a> {
    cells: &'a [u8],
    // row_live[y] is true if padded row y holds at least one live cell
    row_live: &'a [bool],
    dead_row: &'a [u8],
    height: usize,
    width: usize,
}

impl PaddedFrame<'_> {
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// The row above or below `y`, or a dead row outside the frame.
    #[inline]
    fn neighbor_row(&self, y: usize, up: bool) -> (&[u8], bool) {
        let ny = if up { y.checked_sub(1) } else { Some(y + 1).filter(|&v| v < self.height) };
        match ny {
            Some(ny) => (self.row(ny), self.row_live[ny]),
            None => (self.dead_row, false),
        }
    }

    fn evolve_row(&self, y: usize, out: &mut [u8], colsum: &mut [u8]) -> RowSpan {
        let cur = self.row(y);
        let (above, above_live) = self.neighbor_row(y, true);
        let (below, below_live) = self.neighbor_row(y, false);

        if !(above_live || self.row_live[y] || below_live) {
            out.fill(0);
            return None;
        }

        let w = self.width;
        for x in 0..w {
            colsum[x] = above[x] + cur[x] + below[x];
        }

        let mut span: RowSpan = None;
        // sum of colsum[x-1..=x+1], clipped to the frame
        let mut window = colsum[0] + if w > 1 { colsum[1] } else { 0 };
        for x in 0..w {
            let alive = cur[x] == ALIVE;
            let next = rule(alive, window - cur[x]);
            out[x] = next as u8;
            if next {
                span = Some(match span {
                    Some((lo, _)) => (lo, x),
                    None => (x, x),
                });
            }
            if x + 2 < w {
                window += colsum[x + 2];
            }
            if x >= 1 {
                window -= colsum[x - 1];
            }
        }
        span
    }
}

impl Kernel for OptimizedKernel {
    fn name(&self) -> &'static str {
        "optimized"
    }

    fn next_generation(&self, grid: &Grid) -> (Grid, Offset) {
        if grid.is_empty() {
            return (Grid::empty(), Offset::ZERO);
        }

        let (height, width) = (grid.height(), grid.width());
        let (ph, pw) = (height + 2, width + 2);

        // --- Pad once into a flat buffer ---
        let mut padded = vec![0u8; ph * pw];
        let mut row_live = vec![false; ph];
        for (y, src) in grid.rows().enumerate() {
            let start = (y + 1) * pw + 1;
            padded[start..start + width].copy_from_slice(src);
            row_live[y + 1] = src.contains(&ALIVE);
        }

        let dead_row = vec![0u8; pw];
        let frame = PaddedFrame {
            cells: &padded,
            row_live: &row_live,
            dead_row: &dead_row,
            height: ph,
            width: pw,
        };

        // --- Evolve rows ---
        let mut next_padded = vec![0u8; ph * pw];
        let spans: Vec<RowSpan> = if ph * pw >= self.parallel_threshold {
            next_padded
                .par_chunks_mut(pw)
                .enumerate()
                .map_init(
                    || vec![0u8; pw],
                    |colsum, (y, out)| frame.evolve_row(y, out, colsum),
                )
                .collect()
        } else {
            let mut colsum = vec![0u8; pw];
            next_padded
                .chunks_mut(pw)
                .enumerate()
                .map(|(y, out)| frame.evolve_row(y, out, &mut colsum))
                .collect()
        };

        // --- Merge row spans into the bounding box ---
        let bbox = spans
            .iter()
            .enumerate()
            .filter_map(|(y, span)| {
                span.map(|(lo, hi)| BoundingBox {
                    min_row: y,
                    max_row: y,
                    min_col: lo,
                    max_col: hi,
                })
            })
            .reduce(BoundingBox::merge);

        crop_padded(&next_padded, pw, bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{random_grid, seeded_rng};
    use crate::reference::ReferenceKernel;
    use rand::Rng;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn single_column_input() {
        let g = grid(&[&[1], &[1], &[1]]);
        let (next, offset) = OptimizedKernel::default().next_generation(&g);
        assert_eq!(next.to_rows(), vec![vec![1, 1, 1]]);
        assert_eq!(offset, Offset::new(1, -1));
    }

    #[test]
    fn extinct_result_is_canonical_empty() {
        let g = grid(&[&[1, 0, 0, 0, 1]]);
        assert_eq!(
            OptimizedKernel::default().next_generation(&g),
            (Grid::empty(), Offset::ZERO)
        );
    }

    #[test]
    fn matches_reference_sequential_and_parallel() {
        let mut rng = seeded_rng(Some(0x11fe));
        let sequential = OptimizedKernel::with_parallel_threshold(usize::MAX);
        let parallel = OptimizedKernel::with_parallel_threshold(0);
        for _ in 0..200 {
            let h = rng.gen_range(1..24);
            let w = rng.gen_range(1..24);
            let density = rng.gen_range(0.05..0.7);
            let g = random_grid(&mut rng, h, w, density);
            let expected = ReferenceKernel.next_generation(&g);
            assert_eq!(sequential.next_generation(&g), expected, "grid:\n{}", g);
            assert_eq!(parallel.next_generation(&g), expected, "grid:\n{}", g);
        }
    }

    #[test]
    fn sparse_grid_skips_dead_bands_correctly() {
        let mut rows = vec![vec![0u8; 40]; 60];
        rows[3][5] = 1;
        rows[3][6] = 1;
        rows[3][7] = 1;
        rows[55][30] = 1;
        rows[56][30] = 1;
        rows[57][30] = 1;
        let g = Grid::from_rows(&rows).unwrap();
        let kernel = OptimizedKernel::with_parallel_threshold(0);
        assert_eq!(kernel.next_generation(&g), ReferenceKernel.next_generation(&g));
    }

    #[test]
    fn result_has_no_dead_border() {
        let mut rng = seeded_rng(Some(7));
        for _ in 0..50 {
            let g = random_grid(&mut rng, 12, 17, 0.4);
            let (next, _) = OptimizedKernel::default().next_generation(&g);
            if next.is_empty() {
                continue;
            }
            let last_row = next.height() - 1;
            let last_col = next.width() - 1;
            assert!(next.row(0).contains(&1));
            assert!(next.row(last_row).contains(&1));
            assert!((0..next.height()).any(|r| next.get(r, 0) == 1));
            assert!((0..next.height()).any(|r| next.get(r, last_col) == 1));
        }
    }
}
