//! # Frame Builder
//!
//! Rectangular beveled picture frame surrounding the relief.
//!
//! ## Profile
//!
//! ```text
//!  z = depth   ┌────────┐ rim           opening edge (border)
//!              │        ╲ bevel
//!  z = 0       │         ╲______ shelf  (border + slope)
//!              │
//!  z = -min    └──────────────── back
//!              x = 0
//! ```
//!
//! Geometry is emitted in frame-local coordinates `(0, 0)..(width, height)`,
//! which coincide with the surface tessellator's model space.

use config::MeshConfig;
use glam::DVec3;

use crate::buffer::TriangleBuffer;

/// Triangles emitted by [`Frame::emit`]: 14 quads.
pub const FRAME_TRIANGLES: usize = 28;

/// Frame dimensions for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Rim width from the outer edge to the opening.
    pub border: f64,
    /// Distance from the relief datum to the back plane.
    pub min_thickness: f64,
    /// Height of the rim above the relief datum.
    pub depth: f64,
    /// Inward run of the bevel from the opening edge to the shelf.
    pub slope: f64,
}

impl Frame {
    /// Derives the frame for a model `total_height` tall.
    ///
    /// ```rust
    /// use config::MeshConfig;
    /// use litho_mesh::frame::Frame;
    ///
    /// let frame = Frame::new(&MeshConfig::default(), 120.0);
    /// assert_eq!(frame.slope, frame.depth * 0.75);
    /// ```
    pub fn new(config: &MeshConfig, total_height: f64) -> Self {
        let depth = config.relief_depth();
        Self {
            width: config.width,
            height: total_height,
            border: config.frame_border,
            min_thickness: config.min_thickness,
            depth,
            slope: depth * config.frame_slope_factor,
        }
    }

    /// Appends the frame solid to `buffer`.
    pub fn emit(&self, buffer: &mut TriangleBuffer) {
        let (w, h) = (self.width, self.height);
        let (front, back) = (self.depth, -self.min_thickness);
        let b = self.border;
        let inset = self.border + self.slope;
        let p = DVec3::new;

        // Outer walls
        buffer.push_quad(p(w, h, back), p(0.0, h, back), p(0.0, h, front), p(w, h, front));
        buffer.push_quad(p(0.0, 0.0, front), p(0.0, h, front), p(0.0, h, back), p(0.0, 0.0, back));
        buffer.push_quad(p(0.0, 0.0, back), p(w, 0.0, back), p(w, 0.0, front), p(0.0, 0.0, front));
        buffer.push_quad(p(w, 0.0, back), p(w, h, back), p(w, h, front), p(w, 0.0, front));

        // Back
        buffer.push_quad(p(0.0, 0.0, back), p(0.0, h, back), p(w, h, back), p(w, 0.0, back));

        // Shelf
        buffer.push_quad(
            p(w - inset, inset, 0.0),
            p(w - inset, h - inset, 0.0),
            p(inset, h - inset, 0.0),
            p(inset, inset, 0.0),
        );

        // Front rim
        buffer.push_quad(p(b, b, front), p(b, h - b, front), p(0.0, h, front), p(0.0, 0.0, front));
        buffer.push_quad(p(w - b, h - b, front), p(w - b, b, front), p(w, 0.0, front), p(w, h, front));
        buffer.push_quad(p(b, h - b, front), p(w - b, h - b, front), p(w, h, front), p(0.0, h, front));
        buffer.push_quad(p(w - b, b, front), p(b, b, front), p(0.0, 0.0, front), p(w, 0.0, front));

        // Bevel
        buffer.push_quad(
            p(inset, inset, 0.0),
            p(inset, h - inset, 0.0),
            p(b, h - b, front),
            p(b, b, front),
        );
        buffer.push_quad(
            p(w - inset, h - inset, 0.0),
            p(w - inset, inset, 0.0),
            p(w - b, b, front),
            p(w - b, h - b, front),
        );
        buffer.push_quad(
            p(inset, h - inset, 0.0),
            p(w - inset, h - inset, 0.0),
            p(w - b, h - b, front),
            p(b, h - b, front),
        );
        buffer.push_quad(
            p(w - inset, inset, 0.0),
            p(inset, inset, 0.0),
            p(b, b, front),
            p(w - b, b, front),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame() -> Frame {
        let config = MeshConfig {
            width: 50.0,
            frame_border: 3.0,
            ..MeshConfig::default()
        };
        Frame::new(&config, 40.0)
    }

    fn emitted(frame: &Frame) -> TriangleBuffer {
        let mut buffer = TriangleBuffer::new();
        frame.emit(&mut buffer);
        buffer
    }

    #[test]
    fn test_frame_triangle_count() {
        assert_eq!(emitted(&frame()).triangle_count(), FRAME_TRIANGLES);
    }

    #[test]
    fn test_frame_bounds() {
        let (min, max) = emitted(&frame()).bounding_box();
        assert_eq!(min, DVec3::new(0.0, 0.0, -0.8));
        assert_relative_eq!(max.x, 50.0);
        assert_relative_eq!(max.y, 40.0);
        assert_relative_eq!(max.z, 3.2, epsilon = 1e-12);
    }

    #[test]
    fn test_shelf_sits_at_bevel_inset() {
        let f = frame();
        let inset = f.border + f.slope;
        let buffer = emitted(&f);

        let shelf_corners: Vec<_> = buffer
            .vertices()
            .iter()
            .filter(|v| v.z == 0.0)
            .collect();
        assert!(!shelf_corners.is_empty());
        for v in shelf_corners {
            assert!((v.x - inset).abs() < 1e-9 || (v.x - (f.width - inset)).abs() < 1e-9);
            assert!((v.y - inset).abs() < 1e-9 || (v.y - (f.height - inset)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_slope_follows_factor() {
        let config = MeshConfig {
            frame_slope_factor: 0.5,
            min_thickness: 1.0,
            total_thickness: 3.0,
            ..MeshConfig::default()
        };
        let f = Frame::new(&config, 100.0);
        assert_eq!(f.depth, 2.0);
        assert_eq!(f.slope, 1.0);
    }

    #[test]
    fn test_back_face_is_flat() {
        let f = frame();
        let buffer = emitted(&f);
        let back_triangles = buffer
            .triangles()
            .filter(|tri| tri.iter().all(|v| v.z == -f.min_thickness))
            .count();
        assert_eq!(back_triangles, 2);
    }
}
