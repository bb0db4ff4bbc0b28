//! Binary pixel grids.
//!
//! `BitGrid` is the owned, row-major two-level pixel buffer that the whole
//! scheme operates on. It deliberately knows nothing about image formats:
//! decoding and encoding live in [`crate::codec`], so the share logic never
//! touches an image-library type.
//!
//! Polarity convention, used everywhere in this crate:
//! - `true`  = ink  = black = foreground
//! - `false` = blank = white = background

/// A rectangular grid of binary pixels, stored row-major.
///
/// Cells are addressed as `(x, y)` with `(0, 0)` in the top-left corner.
/// The grid is plain data: cheap to clone, comparable with `==`, and
/// immutable by convention once a transform has produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl BitGrid {
    /// Creates a grid of the given size with every cell blank.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Creates a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the grid has zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reads the cell at `(x, y)`.
    ///
    /// Panics if the coordinates are outside the grid; callers index within
    /// `width()` x `height()`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Writes the cell at `(x, y)`.
    ///
    /// Panics if the coordinates are outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Number of inked (`true`) cells.
    pub fn ink_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of inked cells in `[0, 1]`.
    ///
    /// An empty grid has no cells to measure and reports `0.0` rather than
    /// dividing by zero.
    pub fn ink_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.ink_count() as f64 / self.cells.len() as f64
    }

    /// Returns true if both grids have the same width and height.
    pub fn same_shape(&self, other: &BitGrid) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_blank() {
        let grid = BitGrid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.ink_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = BitGrid::new(3, 3);
        grid.set(2, 1, true);
        assert!(grid.get(2, 1));
        assert!(!grid.get(1, 2));
        grid.set(2, 1, false);
        assert!(!grid.get(2, 1));
    }

    #[test]
    fn test_from_fn_checkerboard() {
        let grid = BitGrid::from_fn(4, 4, |x, y| (x + y) % 2 == 0);
        assert!(grid.get(0, 0));
        assert!(!grid.get(1, 0));
        assert!(grid.get(1, 1));
        assert_eq!(grid.ink_count(), 8);
    }

    #[test]
    fn test_ink_fraction() {
        let grid = BitGrid::from_fn(10, 10, |x, _| x < 3);
        assert!((grid.ink_fraction() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_ink_fraction_empty_grid_is_zero() {
        let grid = BitGrid::new(0, 0);
        assert!(grid.is_empty());
        assert_eq!(grid.ink_fraction(), 0.0);
    }

    #[test]
    fn test_same_shape() {
        let a = BitGrid::new(4, 6);
        let b = BitGrid::new(4, 6);
        let c = BitGrid::new(6, 4);
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let grid = BitGrid::new(2, 2);
        grid.get(2, 0);
    }
}
