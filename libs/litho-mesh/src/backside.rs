//! # Backside
//!
//! Flat back plane closing the relief from behind.

use tracing::warn;

use crate::buffer::TriangleBuffer;
use crate::grid::HeightGrid;
use crate::scaling::Scaling;

/// Appends the flat two-triangle backside over the mapped grid rectangle at
/// z = `base`.
pub fn flat(grid: &HeightGrid, scaling: &Scaling, base: f64, buffer: &mut TriangleBuffer) {
    let right = (grid.width() - 1) as f64;
    let top = (grid.height() - 1) as f64;

    let top_left = scaling.map(0.0, top, base);
    let top_right = scaling.map(right, top, base);
    let bottom_left = scaling.map(0.0, 0.0, base);
    let bottom_right = scaling.map(right, 0.0, base);

    buffer.push_triangle(top_left, top_right, bottom_left);
    buffer.push_triangle(top_right, bottom_right, bottom_left);
}

/// Segmented backside for bendable lithophanes.
///
/// Segmentation is reserved and not implemented; this always produces the
/// flat backside.
pub fn segmented(
    grid: &HeightGrid,
    scaling: &Scaling,
    base: f64,
    segments: u32,
    buffer: &mut TriangleBuffer,
) {
    warn!(segments, "segmented backside is not supported, using flat backside");
    flat(grid, scaling, base, buffer);
}
