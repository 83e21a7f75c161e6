// fractal holds the midpoint-displacement terrain generators:
// square-diamond over 2D grids (byte or custom value range) and the 1D line variant,
// plus the grid, histogram and preview helpers around them.
pub mod config;
pub mod diamond_square;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod linear;
pub mod preview;
pub mod rng;
pub mod value;
pub mod variance;

pub use config::{DiamondSquareConfig, FreeStepFill};
pub use diamond_square::{DiamondSquare, GenerationSummary};
pub use error::FractalError;
pub use grid::{Grid2D, is_fractal_side};
pub use histogram::Histogram;
pub use linear::LinearMidpoint;
pub use rng::{Lehmer32, RandomSource};
pub use value::{CellValue, ValueRange};
pub use variance::VarianceSchedule;

// 0..=255 map, the classic byte-range setup
pub type ByteMap = Grid2D<u8>;

// Wider map for custom ranges such as rare-resource placement
pub type WideMap = Grid2D<i32>;
