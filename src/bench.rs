// --- File: bench.rs ---
use crate::driver::expand;
use crate::grid::{Grid, trim};
use crate::kernel::{Kernel, Strategy};
use std::time::{Duration, Instant};

/// Result of running both strategies on the same input. A mismatch is an
/// ordinary outcome here: it is how a broken optimization gets caught.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted {
        reference: Duration,
        optimized: Duration,
    },
    WrongAnswer {
        reference: Grid,
        optimized: Grid,
    },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Runs `kernel` through the driver and measures wall-clock time.
pub fn timed_expand<K: Kernel + ?Sized>(
    kernel: &K,
    initial: Grid,
    generations: usize,
) -> (Grid, Duration) {
    let start = Instant::now();
    let result = expand(kernel, initial, generations);
    let elapsed = start.elapsed();
    log::info!(
        "{}: {} generation budget, {:.4} s, {} live cells",
        kernel.name(),
        generations,
        elapsed.as_secs_f64(),
        result.live_count()
    );
    (result, elapsed)
}

/// Evolves `initial` with the reference and the optimized strategy and
/// compares the trimmed results.
pub fn compare(initial: &Grid, generations: usize) -> Verdict {
    let (reference, reference_time) = timed_expand(&Strategy::Reference, initial.clone(), generations);
    let (optimized, optimized_time) = timed_expand(&Strategy::Optimized, initial.clone(), generations);

    let reference = trim(&reference);
    let optimized = trim(&optimized);
    if reference != optimized {
        log::warn!("Optimized result differs from reference after {} generations", generations);
        return Verdict::WrongAnswer {
            reference,
            optimized,
        };
    }
    Verdict::Accepted {
        reference: reference_time,
        optimized: optimized_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{random_grid, seeded_rng};

    #[test]
    fn random_grid_is_accepted() {
        let grid = random_grid(&mut seeded_rng(Some(2024)), 40, 60, 0.5);
        assert!(compare(&grid, 30).is_accepted());
    }

    #[test]
    fn empty_input_is_accepted() {
        assert!(compare(&Grid::empty(), 10).is_accepted());
    }
}
