//! # Mesh Generator
//!
//! Runs every builder in order and assembles one triangle buffer.
//!
//! ## Pipeline
//!
//! ```text
//! HeightGrid ─► Scaling ─► surface ─► backside ─► frame ─► stabilizers ─► hangers
//!                            50%        60%        80%                     100%
//! ```

use config::constants::{
    CAPACITY_BACKSIDE_VERTICES, CAPACITY_FRAME_VERTICES, CAPACITY_HANGER_VERTICES,
    CAPACITY_STABILIZER_VERTICES, CAPACITY_VERTICES_PER_CELL, PROGRESS_BACKSIDE, PROGRESS_FRAME,
    PROGRESS_SURFACE, PROGRESS_TOTAL,
};
use config::MeshConfig;
use glam::DVec2;
use tracing::{debug, info};

use crate::backside;
use crate::buffer::TriangleBuffer;
use crate::frame::Frame;
use crate::grid::HeightGrid;
use crate::hanger;
use crate::scaling::Scaling;
use crate::stabilizer::Stabilizer;
use crate::surface;

/// Turns height grids into printable lithophane meshes.
///
/// The generator holds only its configuration; every call to
/// [`MeshGenerator::generate`] starts from scratch and returns an owned
/// buffer.
///
/// # Example
///
/// ```rust
/// use config::MeshConfig;
/// use litho_mesh::{HeightGrid, MeshGenerator};
///
/// let config = MeshConfig {
///     width: 50.0,
///     enable_stabilizers: false,
///     enable_hangers: false,
///     ..MeshConfig::default()
/// };
/// let grid = HeightGrid::filled(4, 4, 128).unwrap();
///
/// let mesh = MeshGenerator::new(config).generate(&grid);
/// assert_eq!(mesh.triangle_count(), 72);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshGenerator {
    config: MeshConfig,
}

impl MeshGenerator {
    /// Creates a generator for `config`.
    pub fn new(config: MeshConfig) -> Self {
        Self { config }
    }

    /// Replaces the configuration used by later generations.
    pub fn set_config(&mut self, config: MeshConfig) {
        self.config = config;
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Final model footprint `(width, total_height)` for `grid`.
    pub fn dimensions(&self, grid: &HeightGrid) -> DVec2 {
        Scaling::new(&self.config, grid).dimensions()
    }

    /// Generates the complete mesh for `grid`.
    pub fn generate(&self, grid: &HeightGrid) -> TriangleBuffer {
        self.generate_with_progress(grid, |_, _| {})
    }

    /// Generates the complete mesh for `grid`, reporting progress as
    /// `(current, total)` after the surface, backside and frame phases and
    /// once at completion.
    pub fn generate_with_progress<F>(&self, grid: &HeightGrid, mut progress: F) -> TriangleBuffer
    where
        F: FnMut(u32, u32),
    {
        let config = &self.config;
        let scaling = Scaling::new(config, grid);
        let total_height = scaling.total_height;
        let base = -config.min_thickness;

        info!(
            columns = grid.width(),
            rows = grid.height(),
            width_mm = scaling.width,
            height_mm = total_height,
            "generating lithophane"
        );

        let mut buffer = TriangleBuffer::with_capacity(self.estimated_vertices(grid));

        let added = surface::tessellate(grid, &scaling, base, &mut buffer);
        debug!(triangles = added, "surface");
        progress(PROGRESS_SURFACE, PROGRESS_TOTAL);

        if config.enable_segmentation && config.backside_segments > 1 {
            backside::segmented(grid, &scaling, base, config.backside_segments, &mut buffer);
        } else {
            backside::flat(grid, &scaling, base, &mut buffer);
        }
        progress(PROGRESS_BACKSIDE, PROGRESS_TOTAL);

        let before = buffer.triangle_count();
        Frame::new(config, total_height).emit(&mut buffer);
        debug!(triangles = buffer.triangle_count() - before, "frame");
        progress(PROGRESS_FRAME, PROGRESS_TOTAL);

        if let Some(stabilizer) = Stabilizer::new(config, total_height) {
            let before = buffer.triangle_count();
            stabilizer.emit(&mut buffer);
            debug!(triangles = buffer.triangle_count() - before, "stabilizers");
        }

        if config.enable_hangers {
            let added = hanger::build(config, total_height, &mut buffer);
            debug!(triangles = added, "hangers");
        }
        progress(PROGRESS_TOTAL, PROGRESS_TOTAL);

        info!(triangles = buffer.triangle_count(), "lithophane generated");
        buffer
    }

    /// Vertex capacity reserved before generation starts.
    fn estimated_vertices(&self, grid: &HeightGrid) -> usize {
        let config = &self.config;
        let cells = (grid.width() - 1) * (grid.height() - 1);
        let mut estimate =
            cells * CAPACITY_VERTICES_PER_CELL + CAPACITY_BACKSIDE_VERTICES + CAPACITY_FRAME_VERTICES;
        if config.enable_stabilizers {
            estimate += CAPACITY_STABILIZER_VERTICES;
        }
        if config.enable_hangers {
            estimate += config.hanger_count as usize * CAPACITY_HANGER_VERTICES;
        }
        estimate
    }
}
