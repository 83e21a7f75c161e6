use thiserror::Error;

// Everything that can stop a generator before it touches the grid.
// All checks run up front, so an Err always means the input is unmodified.
#[derive(Error, Debug)]
pub enum FractalError {
    #[error("grid is empty")]
    EmptyGrid,

    #[error("grid must be square, got {nx}x{ny}")]
    NotSquare { nx: usize, ny: usize },

    #[error("grid sides must be 2^n+1, got {nx}x{ny}")]
    InvalidDimensions { nx: usize, ny: usize },

    #[error("rows have different lengths")]
    RaggedRows,

    #[error("line must hold at least 3 cells, got {len}")]
    LineTooShort { len: usize },

    #[error("pre-seeded cell ({x}, {y}) holds {value}, outside 0..={max}")]
    SeedOutOfRange {
        x: usize,
        y: usize,
        value: i32,
        max: i32,
    },

    #[error("max value {max_value} does not fit the cell type (ceiling {cell_max})")]
    MaxValueTooLarge { max_value: i64, cell_max: i32 },

    #[error("max value must be at least 1, got {0}")]
    InvalidMaxValue(i64),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}
