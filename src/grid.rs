use std::ops::{Index, IndexMut};

use crate::error::FluidError;

/// Square scalar grid of side `n`, stored row by row.
///
/// Cell `(i, j)` lives at `i + j * n`: `i` runs along a row (x), `j` picks
/// the row (y). The outermost ring of cells is the boundary; everything
/// else is interior.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    n: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Allocate a zero-filled `n x n` grid.
    ///
    /// Reports allocator failure (including capacity overflow) instead of aborting.
    pub fn zeroed(n: usize) -> Result<Self, FluidError> {
        let len = n
            .checked_mul(n)
            .ok_or_else(|| FluidError::Configuration(format!("grid side {n} overflows the cell count")))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| FluidError::Allocation { cells: len })?;
        cells.resize(len, 0.0);
        Ok(Self { n, cells })
    }

    /// Grid side length.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `(i, j)`.
    #[inline(always)]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "cell ({i}, {j}) outside {n}x{n} grid",
            n = self.n
        );
        i + j * self.n
    }

    /// Flat index of `(i, j)`, or `IndexOutOfRange` when either coordinate is off the grid.
    pub fn checked_index(&self, i: usize, j: usize) -> Result<usize, FluidError> {
        if i < self.n && j < self.n {
            Ok(i + j * self.n)
        } else {
            Err(FluidError::IndexOutOfRange { i, j, n: self.n })
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// Overwrite every cell with `other`'s. Both grids must have the same side.
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(self.n, other.n, "grid sides differ");
        self.cells.copy_from_slice(&other.cells);
    }

    /// Sum of the interior cells.
    pub fn interior_sum(&self) -> f64 {
        let n = self.n;
        (1..n.saturating_sub(1))
            .flat_map(|j| self.cells[j * n + 1..j * n + n - 1].iter())
            .sum()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.cells[self.offset(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        let k = self.offset(i, j);
        &mut self.cells[k]
    }
}
