//! # Hanger Builder
//!
//! Small hanging loops standing on the top frame edge.
//!
//! ```text
//!      (3,3)───(6,3)
//!      ╱   ╲       ╲
//!     ╱     (4,1)─(5,1)
//!    ╱      ╱       ╲  ╲
//! (0,0)──(3,0)     (6,0)──(9,0)
//! ```
//!
//! Offsets are in millimetres relative to the loop origin on the edge.
//! The loop is extruded from z = 0 to z = 2.

use config::constants::{HANGER_DEPTH, HANGER_WIDTH};
use config::MeshConfig;
use glam::{DVec2, DVec3};

use crate::buffer::TriangleBuffer;

/// Triangles per loop.
pub const HANGER_TRIANGLES: usize = 16;

// The face tables define the loop outline. HANGER_WIDTH and HANGER_HEIGHT
// restate its extent for placement and are checked against the tables below.

/// Front face, wound towards -z.
const FRONT: [[(f64, f64); 3]; 6] = [
    [(3.0, 0.0), (0.0, 0.0), (3.0, 3.0)],
    [(3.0, 3.0), (6.0, 3.0), (9.0, 0.0)],
    [(9.0, 0.0), (6.0, 0.0), (5.0, 1.0)],
    [(4.0, 1.0), (3.0, 0.0), (3.0, 3.0)],
    [(3.0, 3.0), (9.0, 0.0), (5.0, 1.0)],
    [(3.0, 3.0), (5.0, 1.0), (4.0, 1.0)],
];

/// Back face, wound towards +z.
const BACK: [[(f64, f64); 3]; 6] = [
    [(3.0, 3.0), (0.0, 0.0), (3.0, 0.0)],
    [(3.0, 3.0), (3.0, 0.0), (4.0, 1.0)],
    [(9.0, 0.0), (6.0, 3.0), (3.0, 3.0)],
    [(5.0, 1.0), (6.0, 0.0), (9.0, 0.0)],
    [(3.0, 3.0), (4.0, 1.0), (5.0, 1.0)],
    [(5.0, 1.0), (9.0, 0.0), (3.0, 3.0)],
];

/// Edges extruded into side walls, as `(from, to)` on the front face.
const SIDES: [((f64, f64), (f64, f64)); 2] = [
    // Inner hole
    ((5.0, 1.0), (6.0, 0.0)),
    // Top
    ((6.0, 3.0), (3.0, 3.0)),
];

/// X origins of every loop along the top edge.
///
/// Loops are centred in `hanger_count` equal slots across the model width.
///
/// ```rust
/// use config::MeshConfig;
/// use litho_mesh::hanger::origins;
///
/// let config = MeshConfig { width: 100.0, hanger_count: 2, ..MeshConfig::default() };
/// assert_eq!(origins(&config), vec![20.5, 70.5]);
/// ```
pub fn origins(config: &MeshConfig) -> Vec<f64> {
    let count = config.hanger_count;
    let slot = config.width / f64::from(count);
    let first = slot / 2.0 - HANGER_WIDTH / 2.0;
    (0..count).map(|i| first + slot * f64::from(i)).collect()
}

/// Appends `hanger_count` loops along `y = total_height`. Returns the number
/// of triangles appended.
pub fn build(config: &MeshConfig, total_height: f64, buffer: &mut TriangleBuffer) -> usize {
    let loops = origins(config);
    for &x in &loops {
        emit_loop(DVec2::new(x, total_height), buffer);
    }
    loops.len() * HANGER_TRIANGLES
}

fn emit_loop(origin: DVec2, buffer: &mut TriangleBuffer) {
    let at = |(dx, dy): (f64, f64), z: f64| DVec3::new(origin.x + dx, origin.y + dy, z);

    for [a, b, c] in FRONT {
        buffer.push_triangle(at(a, 0.0), at(b, 0.0), at(c, 0.0));
    }
    for [a, b, c] in BACK {
        buffer.push_triangle(at(a, HANGER_DEPTH), at(b, HANGER_DEPTH), at(c, HANGER_DEPTH));
    }
    for (from, to) in SIDES {
        buffer.push_quad(
            at(from, 0.0),
            at(to, 0.0),
            at(to, HANGER_DEPTH),
            at(from, HANGER_DEPTH),
        );
    }
}
