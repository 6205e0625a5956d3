//! # Surface Tessellator
//!
//! Converts a height grid into the lithophane's front relief plus the four
//! walls that close it down to the flat back plane.
//!
//! ## Algorithm
//!
//! 1. Precompute relief depths for every sample in model-row order
//!    (model row `y` reads image row `H - 1 - y`).
//! 2. Fan rows `[0, H - 1)` out over the rayon pool. Each split folds into a
//!    private vertex vector; no state is shared while workers run.
//! 3. After the join, concatenate the private vectors in split order.
//!
//! Per row the tessellator emits the left wall, two triangles per cell,
//! and the right wall. The top and bottom caps are emitted once, from the
//! row 0 iteration.

use config::constants::SURFACE_ROW_CHUNK;
use glam::DVec3;
use rayon::prelude::*;

use crate::buffer::TriangleBuffer;
use crate::grid::HeightGrid;
use crate::scaling::Scaling;

/// Appends the relief surface and its closing walls to `buffer`.
///
/// `base` is the z of the back plane (`-min_thickness`). Returns the number
/// of triangles appended.
///
/// The triangle order inside the appended range is not part of the contract;
/// consumers must treat the buffer as an unordered soup.
///
/// # Example
///
/// ```rust
/// use config::MeshConfig;
/// use litho_mesh::{surface, HeightGrid, Scaling, TriangleBuffer};
///
/// let grid = HeightGrid::filled(3, 3, 200).unwrap();
/// let scaling = Scaling::new(&MeshConfig::default(), &grid);
/// let mut buffer = TriangleBuffer::new();
/// let added = surface::tessellate(&grid, &scaling, -0.8, &mut buffer);
/// // 8 relief + 8 side-wall + 8 cap triangles
/// assert_eq!(added, 24);
/// ```
pub fn tessellate(
    grid: &HeightGrid,
    scaling: &Scaling,
    base: f64,
    buffer: &mut TriangleBuffer,
) -> usize {
    let surface = Surface::new(grid, scaling, base);

    let parts: Vec<Vec<DVec3>> = (0..surface.rows - 1)
        .into_par_iter()
        .with_min_len(SURFACE_ROW_CHUNK)
        .fold(Vec::new, |mut local, y| {
            surface.emit_row(y, &mut local);
            local
        })
        .collect();

    let added: usize = parts.iter().map(Vec::len).sum();
    buffer.reserve(added);
    for part in parts {
        buffer.extend_from_vertices(part);
    }

    added / 3
}

/// Number of triangles [`tessellate`] emits for a `width` x `height` grid.
///
/// ```rust
/// assert_eq!(litho_mesh::surface::triangle_count(4, 4), 42);
/// ```
pub fn triangle_count(width: usize, height: usize) -> usize {
    let cells = (width - 1) * (height - 1);
    let side_walls = 4 * (height - 1);
    let caps = 4 * (width - 1);
    cells * 2 + side_walls + caps
}

// =============================================================================
// ROW EMITTER
// =============================================================================

/// Read-only tessellation state shared by all workers.
struct Surface<'a> {
    scaling: &'a Scaling,
    /// Relief depths, model-row order
    depths: Vec<f64>,
    columns: usize,
    rows: usize,
    base: f64,
}

impl<'a> Surface<'a> {
    fn new(grid: &HeightGrid, scaling: &'a Scaling, base: f64) -> Self {
        let (columns, rows) = (grid.width(), grid.height());
        let mut depths = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            depths.extend(
                grid.row(rows - 1 - y)
                    .iter()
                    .map(|&sample| scaling.relief_depth(sample)),
            );
        }

        Self {
            scaling,
            depths,
            columns,
            rows,
            base,
        }
    }

    #[inline]
    fn depth_row(&self, y: usize) -> &[f64] {
        let start = y * self.columns;
        &self.depths[start..start + self.columns]
    }

    #[inline]
    fn point(&self, x: usize, y: usize, depth: f64) -> DVec3 {
        self.scaling.map(x as f64, y as f64, depth)
    }

    fn emit_row(&self, y: usize, out: &mut Vec<DVec3>) {
        let row = self.depth_row(y);
        let next = self.depth_row(y + 1);
        let last = self.columns - 1;
        let base = self.base;

        // Left wall
        out.extend_from_slice(&[
            self.point(0, y, base),
            self.point(0, y, row[0]),
            self.point(0, y + 1, next[0]),
            self.point(0, y + 1, next[0]),
            self.point(0, y + 1, base),
            self.point(0, y, base),
        ]);

        for x in 0..last {
            if y == 0 {
                self.emit_caps(x, out);
            }

            let top_left = self.point(x, y, row[x]);
            let top_right = self.point(x + 1, y, row[x + 1]);
            let bottom_left = self.point(x, y + 1, next[x]);
            let bottom_right = self.point(x + 1, y + 1, next[x + 1]);

            out.extend_from_slice(&[
                top_left,
                bottom_right,
                bottom_left,
                top_left,
                top_right,
                bottom_right,
            ]);
        }

        // Right wall
        out.extend_from_slice(&[
            self.point(last, y + 1, next[last]),
            self.point(last, y, row[last]),
            self.point(last, y, base),
            self.point(last, y, base),
            self.point(last, y + 1, base),
            self.point(last, y + 1, next[last]),
        ]);
    }

    /// Walls along model rows 0 and `rows - 1` for the column pair `x, x + 1`.
    fn emit_caps(&self, x: usize, out: &mut Vec<DVec3>) {
        let base = self.base;
        let first = self.depth_row(0);
        let end = self.rows - 1;
        let last = self.depth_row(end);

        out.extend_from_slice(&[
            self.point(x + 1, 0, first[x + 1]),
            self.point(x, 0, first[x]),
            self.point(x, 0, base),
            self.point(x, 0, base),
            self.point(x + 1, 0, base),
            self.point(x + 1, 0, first[x + 1]),
        ]);

        out.extend_from_slice(&[
            self.point(x, end, base),
            self.point(x, end, last[x]),
            self.point(x + 1, end, last[x + 1]),
            self.point(x + 1, end, last[x + 1]),
            self.point(x + 1, end, base),
            self.point(x, end, base),
        ]);
    }
}
