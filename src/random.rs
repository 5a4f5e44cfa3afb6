// --- File: random.rs ---
use crate::grid::Grid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub type GridRng = StdRng;

pub fn seeded_rng(seed: Option<u64>) -> GridRng {
    match seed {
        Some(seed) => GridRng::seed_from_u64(seed),
        None => GridRng::from_entropy(),
    }
}

/// Grid of independent cells, each alive with probability `density`.
pub fn random_grid<R: Rng + ?Sized>(rng: &mut R, height: usize, width: usize, density: f64) -> Grid {
    let density = density.clamp(0.0, 1.0);
    let mut grid = Grid::new(height, width);
    for r in 0..grid.height() {
        for c in 0..grid.width() {
            grid.set(r, c, rng.gen_bool(density));
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_grid() {
        let a = random_grid(&mut seeded_rng(Some(42)), 16, 9, 0.5);
        let b = random_grid(&mut seeded_rng(Some(42)), 16, 9, 0.5);
        assert_eq!(a, b);
        assert_eq!((a.height(), a.width()), (16, 9));
    }

    #[test]
    fn density_extremes() {
        let mut rng = seeded_rng(Some(1));
        assert_eq!(random_grid(&mut rng, 5, 5, 0.0).live_count(), 0);
        assert_eq!(random_grid(&mut rng, 5, 5, 1.0).live_count(), 25);
        assert_eq!(random_grid(&mut rng, 5, 5, 3.0).live_count(), 25);
    }

    #[test]
    fn zero_sized_request_is_empty() {
        assert!(random_grid(&mut seeded_rng(Some(3)), 0, 10, 0.5).is_empty());
    }
}
