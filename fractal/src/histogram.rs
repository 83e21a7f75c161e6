use crate::grid::Grid2D;
use crate::value::CellValue;

// Number of cells holding each value in 0..=max_value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(max_value: i32) -> Self {
        Self {
            counts: vec![0; bucket_count(max_value)],
        }
    }

    pub fn from_grid<T: CellValue>(grid: &Grid2D<T>, max_value: i32) -> Self {
        let mut hist = Self::new(max_value);
        hist.rebuild(grid);
        hist
    }

    #[inline]
    pub fn max_value(&self) -> i32 {
        self.counts.len() as i32 - 1
    }

    // Zero every bucket and resize to 0..=max_value
    pub fn reset(&mut self, max_value: i32) {
        self.counts.clear();
        self.counts.resize(bucket_count(max_value), 0);
    }

    // Values outside the buckets are ignored
    #[inline]
    pub fn record(&mut self, value: i32) {
        if let Some(slot) = usize::try_from(value)
            .ok()
            .and_then(|i| self.counts.get_mut(i))
        {
            *slot += 1;
        }
    }

    // Recount from scratch with one full pass over the grid
    pub fn rebuild<T: CellValue>(&mut self, grid: &Grid2D<T>) {
        self.counts.fill(0);
        for &cell in grid.as_slice() {
            self.record(cell.to_i32());
        }
    }

    #[inline]
    pub fn count(&self, value: i32) -> u64 {
        usize::try_from(value)
            .ok()
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    // Smallest value t with at least `fraction` of all cells <= t.
    // Picks a sea level from a target ocean share, or any other cut-off.
    pub fn threshold_for_fraction(&self, fraction: f64) -> i32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let mut running = 0u64;
        for (value, &count) in self.counts.iter().enumerate() {
            running += count;
            if running as f64 / total as f64 >= fraction {
                return value as i32;
            }
        }
        self.max_value()
    }

    // Sum of absolute per-bucket differences
    pub(crate) fn drift_from(&self, other: &Histogram) -> u64 {
        let len = self.counts.len().max(other.counts.len());
        (0..len)
            .map(|i| {
                let a = self.counts.get(i).copied().unwrap_or(0);
                let b = other.counts.get(i).copied().unwrap_or(0);
                a.abs_diff(b)
            })
            .sum()
    }
}

fn bucket_count(max_value: i32) -> usize {
    usize::try_from(max_value).map_or(1, |m| m + 1)
}
