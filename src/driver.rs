// --- File: driver.rs ---
use crate::grid::{Grid, GridError, Offset};
use crate::kernel::Kernel;

/// How a multi-generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Kernel calls made during the run.
    pub generations: usize,
    /// True if the run stopped because a step left the grid unchanged.
    pub stabilized: bool,
}

/// State of one multi-generation run: the current grid, where its top-left
/// corner sits in world coordinates, and how far it has evolved.
pub struct Simulation<'k, K: Kernel + ?Sized> {
    kernel: &'k K,
    grid: Grid,
    position: Offset,
    generation: u64,
    changed: bool,
}

impl<'k, K: Kernel + ?Sized> Simulation<'k, K> {
    pub fn new(kernel: &'k K, grid: Grid) -> Self {
        Self {
            kernel,
            grid,
            position: Offset::ZERO,
            generation: 0,
            changed: true,
        }
    }

    /// Evolves one generation. Returns whether the grid changed.
    pub fn step(&mut self) -> bool {
        let (next, delta) = self.kernel.next_generation(&self.grid);
        self.changed = next != self.grid;
        self.grid = next;
        self.position += delta;
        self.generation += 1;
        log::trace!(
            "{} gen {}: {}x{} at ({}, {})",
            self.kernel.name(),
            self.generation,
            self.grid.height(),
            self.grid.width(),
            self.position.row,
            self.position.col
        );
        self.changed
    }

    /// Steps up to `generations` times, stopping early at a fixed point.
    pub fn run(&mut self, generations: usize) -> Outcome {
        for done in 1..=generations {
            if !self.step() {
                log::debug!(
                    "{} stabilized after {} generation(s) with {} live cells",
                    self.kernel.name(),
                    self.generation,
                    self.grid.live_count()
                );
                return Outcome {
                    generations: done,
                    stabilized: true,
                };
            }
        }
        Outcome {
            generations,
            stabilized: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn position(&self) -> Offset {
        self.position
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Evolves `grid` for up to `generations` steps and returns the final grid.
/// Stops as soon as one step produces a grid identical to its input.
pub fn expand<K: Kernel + ?Sized>(kernel: &K, grid: Grid, generations: usize) -> Grid {
    let mut sim = Simulation::new(kernel, grid);
    sim.run(generations);
    sim.into_grid()
}

/// [`expand`] for callers holding a signed count.
pub fn expand_checked<K: Kernel + ?Sized>(
    kernel: &K,
    grid: Grid,
    generations: i64,
) -> Result<Grid, GridError> {
    let generations =
        usize::try_from(generations).map_err(|_| GridError::NegativeGenerations(generations))?;
    Ok(expand(kernel, grid, generations))
}
