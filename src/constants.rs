// --- File: constants.rs ---
// --- Kernel ---
// Padded frames below this many cells aren't worth handing to the thread pool.
pub const PARALLEL_CELL_THRESHOLD: usize = 8192;

// --- Grid sources ---
// Upper bound on cells for grids sized from untrusted input (RLE headers, -S).
pub const MAX_GRID_CELLS: usize = 1 << 32;

// --- Command line defaults ---
pub const DEFAULT_ITERATIONS: i64 = 100;
pub const DEFAULT_RANDOM_DENSITY: f64 = 0.5; // independent uniform 0/1 cells

// --- Visualizer ---
pub const VIEW_OFFSET: i64 = 3; // cells between the window corner and the world origin
pub const STATUS_LINES: u16 = 3;
pub const DEFAULT_STEP_INTERVAL_SECS: f64 = 1.0;
pub const MIN_STEP_INTERVAL_SECS: f64 = 0.1;
pub const MAX_STEP_INTERVAL_SECS: f64 = 2.0;
pub const STEP_INTERVAL_ADJUST: f64 = 0.1;
pub const STABILIZED_HOLD_SECS: f64 = 2.0;
pub const LIVE_CELL_GLYPH: &str = "[]";
pub const DEAD_CELL_GLYPH: &str = "  ";
// --- End of File: constants.rs ---
