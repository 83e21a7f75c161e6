use rand::{RngCore, SeedableRng};
use tracing::error;

use crate::error::FractalError;
use crate::rng::{Lehmer32, RandomSource, seeded};
use crate::value::{CellValue, ValueRange};

// Midpoint displacement along one axis, for ridgelines, coastlines and
// other profile curves. Lines of 2^n+1 cells give the cleanest subdivision.
pub struct LinearMidpoint<R = Lehmer32> {
    rng: R,
}

impl LinearMidpoint {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Some(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(None)
    }
}

impl<R: RngCore + SeedableRng> LinearMidpoint<R> {
    pub fn with_rng(seed: Option<u64>) -> Self {
        Self { rng: seeded(seed) }
    }

    // Restart the stream; later lines continue from wherever the last one stopped
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    // Fill the unset (zero) cells of `line`.
    // Interior results are clamped to 1..=max_value: 0 would read as unset.
    pub fn generate<T: CellValue>(
        &mut self,
        line: &mut [T],
        max_value: i64,
    ) -> Result<(), FractalError> {
        if let Err(err) = check(line, max_value) {
            error!(%err, len = line.len(), "linear midpoint aborted");
            return Err(err);
        }
        let range = ValueRange::for_cell::<T>(max_value)?;
        let len = line.len();
        let last = len - 1;

        for end in [0, last] {
            let value = self.rng.range32(0, range.max());
            if line[end].is_unset() {
                line[end] = T::from_i64(i64::from(value));
            }
        }

        let mut size = len / 2;
        loop {
            let roll = u32::try_from(size * 3).unwrap_or(u32::MAX);
            for i in (size..last).step_by(size) {
                // Skewed upward: displacement lies in -size..2*size
                let offset = i64::from(self.rng.below(roll)) - size as i64;
                if !line[i].is_unset() {
                    continue;
                }
                // Past the end only happens for lengths other than 2^n+1
                let left = line[i - size].to_i32();
                let right = line[(i + size).min(last)].to_i32();
                let avg = (i64::from(left) + i64::from(right)) / 2;
                line[i] = T::from_i64(i64::from(range.clamp_above(avg + offset, 1)));
            }
            if size == 1 {
                break;
            }
            size /= 2;
        }
        Ok(())
    }
}

fn check<T: CellValue>(line: &[T], max_value: i64) -> Result<(), FractalError> {
    if line.len() < 3 {
        return Err(FractalError::LineTooShort { len: line.len() });
    }
    let range = ValueRange::for_cell::<T>(max_value)?;
    for (x, cell) in line.iter().enumerate() {
        let value = cell.to_i32();
        if !range.contains(value) {
            return Err(FractalError::SeedOutOfRange {
                x,
                y: 0,
                value,
                max: range.max(),
            });
        }
    }
    Ok(())
}
