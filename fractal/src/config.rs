use serde::{Deserialize, Serialize};

use crate::error::FractalError;

// What free-step iterations write into unset cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeStepFill {
    // A fresh uniform draw per cell
    Random,
    // The same value broadcast to every free-step cell
    Fixed(i32),
}

// Settings for one square-diamond run.
// Missing TOML keys fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiamondSquareConfig {
    // None seeds from OS entropy on every run
    pub seed: Option<u64>,
    // Leading iterations that scatter values instead of averaging
    pub free_steps: u32,
    pub free_step_fill: FreeStepFill,
    // Multiplier applied to the variance after each iteration
    pub smoothing: f64,
    // Displacement bound of the first iteration; about half of max_value works best
    pub variance: f64,
    // Subtracted after the smoothing multiply
    pub variance_decrement: f64,
    // Where the variance settles once it drops below 1
    pub variance_floor: f64,
    // Occasional fully random square centres on coarse iterations
    pub cratering: bool,
    // Craters only land in squares wider than this
    pub crater_min_square: usize,
    // One square centre in this many becomes a crater
    pub crater_odds: u32,
    // Generated values lie in 0..=max_value
    pub max_value: i64,
    pub wrap_x: bool,
    pub wrap_y: bool,
}

impl Default for DiamondSquareConfig {
    fn default() -> Self {
        Self {
            seed: None,
            free_steps: 0,
            free_step_fill: FreeStepFill::Random,
            smoothing: 0.85,
            variance: 250.0,
            variance_decrement: 0.1,
            variance_floor: 0.0,
            cratering: false,
            crater_min_square: 6,
            crater_odds: 100,
            max_value: 255,
            wrap_x: false,
            wrap_y: false,
        }
    }
}

impl DiamondSquareConfig {
    // Classic 0..=255 byte map, variance decays to 0
    pub fn byte_range() -> Self {
        Self::default()
    }

    // Arbitrary 0..=max_value range, variance never drops below 1
    pub fn custom_range(max_value: i64) -> Self {
        Self {
            max_value,
            variance_floor: 1.0,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, FractalError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FractalError> {
        if self.max_value < 1 {
            return Err(FractalError::InvalidMaxValue(self.max_value));
        }
        non_negative("smoothing", self.smoothing)?;
        non_negative("variance", self.variance)?;
        non_negative("variance_floor", self.variance_floor)?;
        if !self.variance_decrement.is_finite() {
            return Err(FractalError::InvalidParameter {
                name: "variance_decrement",
                value: self.variance_decrement,
            });
        }
        if self.crater_odds == 0 {
            return Err(FractalError::InvalidParameter {
                name: "crater_odds",
                value: 0.0,
            });
        }
        if let FreeStepFill::Fixed(value) = self.free_step_fill {
            if value < 0 || i64::from(value) > self.max_value {
                return Err(FractalError::InvalidParameter {
                    name: "free_step_fill",
                    value: f64::from(value),
                });
            }
        }
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), FractalError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FractalError::InvalidParameter { name, value })
    }
}
