use std::ops::{Index, IndexMut};

use crate::error::FractalError;

// Row-major 2D array addressed as (x, y).
// Replaces the nested `Vec<Vec<f32>>` height map with one allocation and bounds-checked access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid2D<T> {
    nx: usize,
    ny: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Grid2D<T> {
    // Zero-filled grid, ready for generation
    pub fn new(nx: usize, ny: usize) -> Self {
        Self::filled(nx, ny, T::default())
    }
}

impl<T: Copy> Grid2D<T> {
    pub fn filled(nx: usize, ny: usize, value: T) -> Self {
        Self {
            nx,
            ny,
            cells: vec![value; nx * ny],
        }
    }

    // Build from rows indexed as `rows[y][x]`
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, FractalError> {
        let ny = rows.len();
        let nx = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != nx) {
            return Err(FractalError::RaggedRows);
        }
        Ok(Self {
            nx,
            ny,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.nx == 0 {
            return vec![Vec::new(); self.ny];
        }
        self.cells.chunks(self.nx).map(<[T]>::to_vec).collect()
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ny
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // True when (x, y) lies inside the grid; takes signed coordinates so
    // neighbour offsets can be tested before they are used as indices
    #[inline]
    pub fn is_safe(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.nx && (y as usize) < self.ny
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        (x < self.nx && y < self.ny).then(|| self.cells[y * self.nx + x])
    }

    // Returns false (and writes nothing) when out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        if x < self.nx && y < self.ny {
            self.cells[y * self.nx + x] = value;
            true
        } else {
            false
        }
    }

    // Same-shaped grid with `f` applied to every cell
    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Grid2D<U> {
        Grid2D {
            nx: self.nx,
            ny: self.ny,
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }

    // Flat row-major view
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    // Set every edge cell, e.g. to force an ocean or land rim before generating
    pub fn fill_border(&mut self, value: T) {
        if self.is_empty() {
            return;
        }
        let (nx, ny) = (self.nx, self.ny);
        for x in 0..nx {
            self[(x, 0)] = value;
            self[(x, ny - 1)] = value;
        }
        for y in 0..ny {
            self[(0, y)] = value;
            self[(nx - 1, y)] = value;
        }
    }
}

impl<T> Index<(usize, usize)> for Grid2D<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.nx && y < self.ny, "({x}, {y}) outside {}x{}", self.nx, self.ny);
        &self.cells[y * self.nx + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid2D<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.nx && y < self.ny, "({x}, {y}) outside {}x{}", self.nx, self.ny);
        &mut self.cells[y * self.nx + x]
    }
}

// Side length accepted by the square-diamond generators: 2^k + 1 with k >= 1
pub fn is_fractal_side(n: usize) -> bool {
    n >= 3 && (n - 1).is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::{Grid2D, is_fractal_side};
    use crate::FractalError;

    #[test]
    fn grid_dimensions() {
        let g: Grid2D<u8> = Grid2D::new(5, 3);
        assert_eq!(g.nx(), 5);
        assert_eq!(g.ny(), 3);
        assert_eq!(g.len(), 15);
        assert!(g.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn grid_bounds() {
        let mut g: Grid2D<i32> = Grid2D::new(3, 3);
        assert!(g.is_safe(0, 0));
        assert!(g.is_safe(2, 2));
        assert!(!g.is_safe(-1, 0));
        assert!(!g.is_safe(0, 3));
        assert!(g.set(1, 2, 9));
        assert!(!g.set(3, 0, 9));
        assert_eq!(g.get(1, 2), Some(9));
        assert_eq!(g.get(5, 5), None);
        assert_eq!(g[(1, 2)], 9);
    }

    #[test]
    fn grid_rows_roundtrip_layout() {
        let g = Grid2D::from_rows(vec![vec![1u8, 2, 3], vec![4, 5, 6]]).unwrap();
        // (x, y) addressing: x walks along a row
        assert_eq!(g[(2, 0)], 3);
        assert_eq!(g[(0, 1)], 4);
        assert_eq!(g.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        let r = Grid2D::from_rows(vec![vec![1u8, 2], vec![3]]);
        assert!(matches!(r, Err(FractalError::RaggedRows)));
    }

    #[test]
    fn grid_fill_border() {
        let mut g: Grid2D<u8> = Grid2D::new(4, 4);
        g.fill_border(7);
        assert_eq!(g.as_slice().iter().filter(|&&v| v == 7).count(), 12);
        assert_eq!(g[(1, 1)], 0);
        assert_eq!(g[(2, 2)], 0);
    }

    #[test]
    fn grid_fill_border_non_square() {
        let mut g: Grid2D<i32> = Grid2D::new(5, 3);
        g.fill_border(-1);
        assert_eq!(g.to_rows(), vec![
            vec![-1, -1, -1, -1, -1],
            vec![-1, 0, 0, 0, -1],
            vec![-1, -1, -1, -1, -1],
        ]);
    }

    #[test]
    #[should_panic]
    fn grid_index_out_of_bounds_panics() {
        let g: Grid2D<u8> = Grid2D::new(2, 2);
        let _ = g[(2, 0)];
    }

    #[test]
    fn fractal_sides() {
        assert!(is_fractal_side(3));
        assert!(is_fractal_side(5));
        assert!(is_fractal_side(257));
        assert!(!is_fractal_side(0));
        assert!(!is_fractal_side(1));
        assert!(!is_fractal_side(2));
        assert!(!is_fractal_side(6));
        assert!(!is_fractal_side(256));
    }
}
