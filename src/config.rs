// --- File: config.rs ---
use crate::constants::*;
use crate::grid::{Grid, GridError};
use crate::kernel::Strategy;
use crate::random::{random_grid, seeded_rng};
use crate::rle::{self, RleError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Pattern(#[from] RleError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Where the initial grid comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSource {
    Pattern(PathBuf),
    Random {
        height: usize,
        width: usize,
        density: f64,
        seed: Option<u64>,
    },
}

impl GridSource {
    pub fn load(&self) -> Result<Grid, LoadError> {
        match self {
            GridSource::Pattern(path) => Ok(rle::load(path)?),
            GridSource::Random {
                height,
                width,
                density,
                seed,
            } => {
                Grid::checked_area(*height, *width)?;
                let grid = random_grid(&mut seeded_rng(*seed), *height, *width, *density);
                log::info!(
                    "Generated random {}x{} grid with {} live cells",
                    height,
                    width,
                    grid.live_count()
                );
                Ok(grid)
            }
        }
    }
}

/// Everything one invocation of the binary needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: GridSource,
    pub generations: usize,
    pub visualize: bool,
    pub visualizer: VisualizerConfig,
}

#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub strategy: Strategy,
    pub step_interval: Duration,
    pub min_step_interval: Duration,
    pub max_step_interval: Duration,
    pub step_interval_adjust: Duration,
    // How long the last frame stays up once the pattern stops changing
    pub stabilized_hold: Duration,
    pub view_offset: i64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            step_interval: Duration::from_secs_f64(DEFAULT_STEP_INTERVAL_SECS),
            min_step_interval: Duration::from_secs_f64(MIN_STEP_INTERVAL_SECS),
            max_step_interval: Duration::from_secs_f64(MAX_STEP_INTERVAL_SECS),
            step_interval_adjust: Duration::from_secs_f64(STEP_INTERVAL_ADJUST),
            stabilized_hold: Duration::from_secs_f64(STABILIZED_HOLD_SECS),
            view_offset: VIEW_OFFSET,
        }
    }
}

impl VisualizerConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Keeps a requested interval inside the configured bounds.
    pub fn clamp_interval(&self, interval: Duration) -> Duration {
        interval.clamp(self.min_step_interval, self.max_step_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_source_is_reproducible() {
        let source = GridSource::Random {
            height: 8,
            width: 12,
            density: DEFAULT_RANDOM_DENSITY,
            seed: Some(99),
        };
        let a = source.load().unwrap();
        assert_eq!(a, source.load().unwrap());
        assert_eq!((a.height(), a.width()), (8, 12));
    }

    #[test]
    fn missing_pattern_file_is_reported() {
        let source = GridSource::Pattern(PathBuf::from("/no/such/pattern.rle"));
        assert!(matches!(source.load(), Err(LoadError::Pattern(RleError::Io(_)))));
    }

    #[test]
    fn oversized_random_source_is_rejected() {
        let source = GridSource::Random {
            height: usize::MAX,
            width: 2,
            density: DEFAULT_RANDOM_DENSITY,
            seed: Some(1),
        };
        assert!(matches!(
            source.load(),
            Err(LoadError::Grid(GridError::TooLarge { width: 2, .. }))
        ));
    }

    #[test]
    fn default_interval_is_within_bounds() {
        let config = VisualizerConfig::default();
        assert_eq!(config.clamp_interval(config.step_interval), config.step_interval);
        assert_eq!(
            config.clamp_interval(Duration::from_secs(10)),
            config.max_step_interval
        );
        assert_eq!(config.clamp_interval(Duration::ZERO), config.min_step_interval);
    }
}
// --- End of File: config.rs ---
