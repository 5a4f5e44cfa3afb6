// --- File: lib.rs ---
//! Conway's Game of Life evolution kernels with a correctness harness.
//!
//! Two kernels implement the same single-step contract ([`Kernel`]): a literal
//! reference and a row-parallel optimized one. The driver ([`expand`]) steps a
//! grid until a generation budget runs out or the pattern stops changing, and
//! [`bench::compare`] checks the optimized kernel against the reference.
pub mod bench;
pub mod config;
pub mod constants;
pub mod driver;
pub mod grid;
pub mod kernel;
pub mod optimized;
pub mod random;
pub mod reference;
pub mod rle;
pub mod visualize;

pub use driver::{Outcome, Simulation, expand, expand_checked};
pub use grid::{Grid, GridError, Offset, trim};
pub use kernel::{Kernel, Strategy};
pub use optimized::OptimizedKernel;
pub use reference::ReferenceKernel;
