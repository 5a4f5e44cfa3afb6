// --- File: reference.rs ---
use crate::grid::{ALIVE, BoundingBox, Grid, Offset};
use crate::kernel::{Kernel, crop_padded, rule};

/// Literal nested-loop kernel. Used as the correctness oracle, never tuned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl Kernel for ReferenceKernel {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn next_generation(&self, grid: &Grid) -> (Grid, Offset) {
        if grid.is_empty() {
            return (Grid::empty(), Offset::ZERO);
        }

        let (height, width) = (grid.height(), grid.width());
        let (ph, pw) = (height + 2, width + 2);

        // --- Pad with one dead ring ---
        let mut padded = vec![0u8; ph * pw];
        for y in 0..height {
            for x in 0..width {
                padded[(y + 1) * pw + (x + 1)] = grid.get(y, x);
            }
        }

        // --- Count neighbors inside the padded frame and apply the rule ---
        let mut next_padded = vec![0u8; ph * pw];
        for y in 0..ph as isize {
            for x in 0..pw as isize {
                let mut live_neighbors = 0u8;
                for i in -1..=1isize {
                    for j in -1..=1isize {
                        if i == 0 && j == 0 {
                            continue;
                        }
                        let (ny, nx) = (y + i, x + j);
                        if ny >= 0 && ny < ph as isize && nx >= 0 && nx < pw as isize {
                            live_neighbors += padded[ny as usize * pw + nx as usize];
                        }
                    }
                }
                let alive = padded[y as usize * pw + x as usize] == ALIVE;
                next_padded[y as usize * pw + x as usize] = rule(alive, live_neighbors) as u8;
            }
        }

        // --- Bounding box ---
        let mut bbox: Option<BoundingBox> = None;
        for y in 0..ph {
            for x in 0..pw {
                if next_padded[y * pw + x] != ALIVE {
                    continue;
                }
                let cell = BoundingBox {
                    min_row: y,
                    max_row: y,
                    min_col: x,
                    max_col: x,
                };
                bbox = Some(bbox.map_or(cell, |b| b.merge(cell)));
            }
        }

        crop_padded(&next_padded, pw, bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn empty_grid_stays_empty() {
        assert_eq!(
            ReferenceKernel.next_generation(&Grid::empty()),
            (Grid::empty(), Offset::ZERO)
        );
    }

    #[test]
    fn lone_cell_dies() {
        let (next, offset) = ReferenceKernel.next_generation(&grid(&[&[1]]));
        assert!(next.is_empty());
        assert_eq!(offset, Offset::ZERO);
    }

    #[test]
    fn horizontal_blinker_turns_vertical() {
        let (next, offset) = ReferenceKernel.next_generation(&grid(&[&[1, 1, 1]]));
        assert_eq!(next.to_rows(), vec![vec![1], vec![1], vec![1]]);
        assert_eq!(offset, Offset::new(-1, 1));
    }

    #[test]
    fn block_is_still() {
        let block = grid(&[&[1, 1], &[1, 1]]);
        let (next, offset) = ReferenceKernel.next_generation(&block);
        assert_eq!(next, block);
        assert_eq!(offset, Offset::ZERO);
    }

    #[test]
    fn dead_border_is_cropped() {
        let padded_block = grid(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]]);
        let (next, offset) = ReferenceKernel.next_generation(&padded_block);
        assert_eq!(next.to_rows(), vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(offset, Offset::new(1, 1));
    }

    #[test]
    fn input_is_untouched() {
        let g = grid(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);
        let before = g.clone();
        let _ = ReferenceKernel.next_generation(&g);
        assert_eq!(g, before);
    }
}
