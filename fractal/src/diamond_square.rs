use std::marker::PhantomData;

use rand::{RngCore, SeedableRng};
use tracing::{debug, error, warn};

use crate::config::{DiamondSquareConfig, FreeStepFill};
use crate::error::FractalError;
use crate::grid::{Grid2D, is_fractal_side};
use crate::histogram::Histogram;
use crate::rng::{Lehmer32, RandomSource, seeded};
use crate::value::{CellValue, ValueRange};
use crate::variance::VarianceSchedule;

// What a finished run did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationSummary {
    // Full square+diamond iterations
    pub iterations: u32,
    pub final_variance: f64,
    // Cells given a value by this run, wrap mirrors included
    pub cells_written: usize,
    // Visits that found a pre-seeded or already final cell
    pub cells_frozen: usize,
}

// Diamond-square midpoint displacement over a (2^n+1)-sided grid.
//
// Non-zero cells in the input are treated as fixed terrain and kept. Each
// visited cell takes exactly one draw from the generator even when it is
// skipped, so freezing a cell never shifts the randomness seen by others.
// A fresh `R` is seeded at the start of every run.
pub struct DiamondSquare<R = Lehmer32> {
    config: DiamondSquareConfig,
    rng: PhantomData<R>,
}

impl DiamondSquare {
    pub fn new(config: DiamondSquareConfig) -> Self {
        Self::with_rng(config)
    }
}

impl<R: RngCore + SeedableRng> DiamondSquare<R> {
    // Same as `new` with a caller-chosen generator type
    pub fn with_rng(config: DiamondSquareConfig) -> Self {
        Self {
            config,
            rng: PhantomData,
        }
    }

    pub fn config(&self) -> &DiamondSquareConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DiamondSquareConfig {
        &mut self.config
    }

    // Fill every unset (zero) cell of `grid` in place.
    // When a histogram is passed it ends up holding the counts of the final grid.
    pub fn generate<T: CellValue>(
        &self,
        grid: &mut Grid2D<T>,
        histogram: Option<&mut Histogram>,
    ) -> Result<GenerationSummary, FractalError> {
        let range = match self.check(grid) {
            Ok(range) => range,
            Err(err) => {
                error!(%err, nx = grid.nx(), ny = grid.ny(), "diamond-square aborted");
                return Err(err);
            }
        };
        if self.config.variance > f64::from(range.max()) {
            warn!(
                variance = self.config.variance,
                max_value = range.max(),
                "initial variance exceeds the value range; output will lean to the extremes"
            );
        }
        debug!(
            side = grid.nx(),
            max_value = range.max(),
            seed = ?self.config.seed,
            free_steps = self.config.free_steps,
            "diamond-square started"
        );

        let mut run = Run {
            rng: seeded::<R>(self.config.seed),
            fixed: grid.map(|cell| !cell.is_unset()),
            range,
            schedule: VarianceSchedule::from_config(&self.config),
            tally: histogram.as_ref().map(|_| Histogram::new(range.max())),
            summary: GenerationSummary::default(),
        };

        self.seed_corners(grid, &mut run);

        let mut square_size = grid.nx() - 1;
        while square_size > 1 {
            self.square_phase(grid, square_size, &mut run);
            square_size /= 2;
            self.diamond_phase(grid, square_size, &mut run);
            run.schedule.end_iteration();
            run.summary.iterations += 1;
        }
        run.summary.final_variance = run.schedule.current();

        if let Some(hist) = histogram {
            hist.reset(range.max());
            hist.rebuild(grid);
            if let Some(tally) = &run.tally {
                let drift = tally.drift_from(hist);
                if drift > 0 {
                    debug!(drift, "incremental histogram disagreed with the rebuild");
                }
            }
        }

        debug!(
            iterations = run.summary.iterations,
            written = run.summary.cells_written,
            frozen = run.summary.cells_frozen,
            final_variance = run.summary.final_variance,
            "diamond-square finished"
        );
        Ok(run.summary)
    }

    // Reject anything the subdivision cannot walk before writing a single cell
    fn check<T: CellValue>(&self, grid: &Grid2D<T>) -> Result<ValueRange, FractalError> {
        self.config.validate()?;
        let range = ValueRange::for_cell::<T>(self.config.max_value)?;
        if grid.is_empty() {
            return Err(FractalError::EmptyGrid);
        }
        let (nx, ny) = (grid.nx(), grid.ny());
        if nx != ny {
            return Err(FractalError::NotSquare { nx, ny });
        }
        if !is_fractal_side(nx) {
            return Err(FractalError::InvalidDimensions { nx, ny });
        }
        for y in 0..ny {
            for x in 0..nx {
                let value = grid[(x, y)].to_i32();
                if !range.contains(value) {
                    return Err(FractalError::SeedOutOfRange {
                        x,
                        y,
                        value,
                        max: range.max(),
                    });
                }
            }
        }
        Ok(range)
    }

    fn seed_corners<T: CellValue>(&self, grid: &mut Grid2D<T>, run: &mut Run<R>) {
        let last = grid.nx() - 1;
        for (x, y) in [(0, 0), (0, last), (last, 0), (last, last)] {
            let value = run.rng.range32(0, run.range.max());
            if run.fixed[(x, y)] {
                run.frozen(grid[(x, y)].to_i32());
            } else {
                run.write(grid, x, y, value);
            }
        }
    }

    // Centre of every square at this stride
    fn square_phase<T: CellValue>(&self, grid: &mut Grid2D<T>, size: usize, run: &mut Run<R>) {
        let n = grid.nx();
        let half = size / 2;
        let spread = run.schedule.spread();
        let free = run.schedule.in_free_step();
        let cratering = self.config.cratering && size > self.config.crater_min_square && !free;

        for y in (0..n - 1).step_by(size) {
            for x in (0..n - 1).step_by(size) {
                let (tx, ty) = (x + half, y + half);
                let crater = cratering && run.rng.one_in(self.config.crater_odds);

                if run.fixed[(tx, ty)] {
                    run.rng.rand32();
                    run.frozen(grid[(tx, ty)].to_i32());
                    continue;
                }

                let value = if free {
                    self.free_step_value(run)
                } else if crater {
                    run.rng.range32(0, run.range.max())
                } else {
                    let (x, y, s) = (x as isize, y as isize, size as isize);
                    let avg = average(grid, &[(x, y), (x + s, y), (x, y + s), (x + s, y + s)]);
                    run.range
                        .clamp(avg + i64::from(run.rng.range32(-spread, spread)))
                };
                run.write(grid, tx, ty, value);
            }
        }
    }

    // Every unset cell on the halved stride, averaging its cardinal neighbours
    fn diamond_phase<T: CellValue>(&self, grid: &mut Grid2D<T>, size: usize, run: &mut Run<R>) {
        let n = grid.nx();
        let spread = run.schedule.spread();
        let free = run.schedule.in_free_step();

        for y in (0..n).step_by(size) {
            for x in (0..n).step_by(size) {
                if run.fixed[(x, y)] {
                    run.rng.rand32();
                    run.frozen(grid[(x, y)].to_i32());
                    continue;
                }

                if free {
                    let value = self.free_step_value(run);
                    run.write(grid, x, y, value);
                    continue;
                }

                let (sx, sy, s) = (x as isize, y as isize, size as isize);
                // Edge cells have only three neighbours inside the grid
                let avg = average(grid, &[(sx - s, sy), (sx, sy + s), (sx + s, sy), (sx, sy - s)]);
                let value = run
                    .range
                    .clamp(avg + i64::from(run.rng.range32(-spread, spread)));
                run.write(grid, x, y, value);

                // Copy the first row/column onto the opposite edge so the map tiles.
                // Free-step cells on the far edge keep their own draws.
                if self.config.wrap_x && x == 0 {
                    run.write(grid, n - 1, y, value);
                }
                if self.config.wrap_y && y == 0 {
                    run.write(grid, x, n - 1, value);
                }
            }
        }
    }

    fn free_step_value(&self, run: &mut Run<R>) -> i32 {
        match self.config.free_step_fill {
            FreeStepFill::Random => run.rng.range32(0, run.range.max()),
            FreeStepFill::Fixed(value) => {
                run.rng.rand32();
                run.range.clamp(i64::from(value))
            }
        }
    }
}

// Per-run state: the generator stream and the bookkeeping around it
struct Run<R> {
    rng: R,
    // Cells that are final: pre-seeded or already written this run
    fixed: Grid2D<bool>,
    range: ValueRange,
    schedule: VarianceSchedule,
    // Incremental counts, only kept to cross-check the final rebuild
    tally: Option<Histogram>,
    summary: GenerationSummary,
}

impl<R> Run<R> {
    #[inline]
    fn write<T: CellValue>(&mut self, grid: &mut Grid2D<T>, x: usize, y: usize, value: i32) {
        grid[(x, y)] = T::from_i64(i64::from(value));
        self.fixed[(x, y)] = true;
        self.summary.cells_written += 1;
        if let Some(tally) = &mut self.tally {
            tally.record(value);
        }
    }

    #[inline]
    fn frozen(&mut self, value: i32) {
        self.summary.cells_frozen += 1;
        if let Some(tally) = &mut self.tally {
            tally.record(value);
        }
    }
}

// Integer mean of the in-bounds points; out-of-bounds points are left out of
// both the sum and the divisor
fn average<T: CellValue>(grid: &Grid2D<T>, points: &[(isize, isize)]) -> i64 {
    let mut total = 0i64;
    let mut count = 0i64;
    for &(x, y) in points {
        if grid.is_safe(x, y) {
            total += i64::from(grid[(x as usize, y as usize)].to_i32());
            count += 1;
        }
    }
    if count == 0 { 0 } else { total / count }
}
