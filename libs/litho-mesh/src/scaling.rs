//! # Scaling
//!
//! Grid-to-model mapping shared by every builder.
//!
//! ## Coordinate System
//!
//! ```text
//!  y = total_height  ┌──────────────────────┐  hangers attach here
//!                    │  frame_border        │
//!                    │   ┌──────────────┐   │  image row 0
//!                    │   │   relief     │   │
//!                    │   └──────────────┘   │  image row H-1
//!  y = 0             └──────────────────────┘  stabilizers stand here
//!                    x = 0           x = width
//! ```
//!
//! z = 0 is the relief datum, z = -min_thickness the flat back plane and
//! z = total_thickness - min_thickness the front of the frame.

use config::constants::MAX_SAMPLE_VALUE;
use config::MeshConfig;
use glam::{DVec2, DVec3};

use crate::grid::HeightGrid;

/// Scaling factors derived once per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    /// Relief depth per sample unit: `(total - min) / 255`.
    pub depth_factor: f64,
    /// Millimetres per grid column or row: `(width - 2 * border) / W`.
    pub width_factor: f64,
    /// Frame border offset applied to every mapped point.
    pub border: f64,
    /// Total model width, frame included.
    pub width: f64,
    /// Total model height: `2 * border + H * width_factor`.
    pub total_height: f64,
}

impl Scaling {
    /// Derives the factors for `grid` under `config`.
    ///
    /// ```rust
    /// use config::MeshConfig;
    /// use litho_mesh::{HeightGrid, Scaling};
    ///
    /// let config = MeshConfig { width: 50.0, frame_border: 3.0, ..MeshConfig::default() };
    /// let grid = HeightGrid::filled(4, 4, 128).unwrap();
    /// let scaling = Scaling::new(&config, &grid);
    /// assert_eq!(scaling.width_factor, 11.0);
    /// assert_eq!(scaling.total_height, 50.0);
    /// ```
    pub fn new(config: &MeshConfig, grid: &HeightGrid) -> Self {
        let border = config.frame_border;
        let width_factor = (config.width - border * 2.0) / grid.width() as f64;
        Self {
            depth_factor: config.relief_depth() / MAX_SAMPLE_VALUE,
            width_factor,
            border,
            width: config.width,
            total_height: border * 2.0 + grid.height() as f64 * width_factor,
        }
    }

    /// Maps grid coordinate `(x, y)` at relief depth `depth` into model space.
    ///
    /// Every surface vertex is placed through this function.
    #[inline]
    pub fn map(&self, x: f64, y: f64, depth: f64) -> DVec3 {
        DVec3::new(
            x * self.width_factor + self.border,
            y * self.width_factor + self.border,
            depth,
        )
    }

    /// Relief depth of a sample. Brighter samples are thinner: 0 gives the
    /// full relief depth, 255 gives 0 (the panel is `min_thickness` there).
    #[inline]
    pub fn relief_depth(&self, sample: u8) -> f64 {
        (MAX_SAMPLE_VALUE - f64::from(sample)) * self.depth_factor
    }

    /// Final model footprint `(width, total_height)`.
    #[inline]
    pub fn dimensions(&self) -> DVec2 {
        DVec2::new(self.width, self.total_height)
    }
}
