use rayon::prelude::*;

use crate::coords::CellCoord;

/// A row-major 2-D array of cell values.
///
/// Dimensions are fixed at construction. Lookups outside the grid return
/// `None`; they never wrap or clamp.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

pub type ElevationGrid = Grid<f64>;
pub type TemperatureGrid = Grid<f64>;
pub type MoistureGrid = Grid<f64>;
pub type BiomeGrid = Grid<crate::Biome>;

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell, row by row.
    /// Returns `None` if `width * height` overflows.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Option<Self> {
        let mut cells = Vec::with_capacity(width.checked_mul(height)?);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Parallel `from_fn`: each row is one rayon task and its cells are
    /// evaluated left to right inside that task.
    pub fn par_from_fn<F>(width: usize, height: usize, f: F) -> Self
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
    {
        let f = &f;
        let cells: Vec<T> = (0..height)
            .into_par_iter()
            .flat_map_iter(|y| (0..width).map(move |x| f(x, y)))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Transform every cell, keeping the dimensions.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Iterate cells together with their coordinates.
    pub fn indexed(&self) -> impl Iterator<Item = (CellCoord, &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| (CellCoord::new(idx % width, idx / width), value))
    }
}
