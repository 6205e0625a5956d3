//! # Height Grid
//!
//! Grayscale intensity samples supplied by the image-loading collaborator.

use crate::error::MeshError;

/// A grid of 8-bit intensity samples, row-major with the origin at the
/// top-left corner.
///
/// The grid is immutable once built and is only read during generation.
///
/// # Example
///
/// ```rust
/// use litho_mesh::HeightGrid;
///
/// let grid = HeightGrid::new(2, 2, vec![0, 64, 128, 255]).unwrap();
/// assert_eq!(grid.sample(1, 1), 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl HeightGrid {
    /// Wraps row-major samples as a grid.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidGrid`] when either dimension is below 2
    /// (there is no cell to tessellate) or when `samples.len()` is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> Result<Self, MeshError> {
        if width < 2 || height < 2 {
            return Err(MeshError::invalid_grid(format!(
                "grid must be at least 2x2, got {}x{}",
                width, height
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            MeshError::invalid_grid(format!("grid {}x{} overflows", width, height))
        })?;
        if samples.len() != expected {
            return Err(MeshError::invalid_grid(format!(
                "expected {} samples for {}x{}, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every sample.
    ///
    /// ```rust
    /// use litho_mesh::HeightGrid;
    ///
    /// let ramp = HeightGrid::from_fn(4, 3, |x, _| (x * 80) as u8).unwrap();
    /// assert_eq!(ramp.sample(3, 2), 240);
    /// ```
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> Result<Self, MeshError> {
        let mut samples = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self::new(width, height, samples)
    }

    /// Builds a grid where every sample has the same value.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, MeshError> {
        Self::new(width, height, vec![value; width.saturating_mul(height)])
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at column `x`, row `y` (row 0 is the top of the image).
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "sample ({}, {}) out of bounds", x, y);
        self.samples[y * self.width + x]
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.samples[start..start + self.width]
    }

    /// All samples, row-major.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }
}
