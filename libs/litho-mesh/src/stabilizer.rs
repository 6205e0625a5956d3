//! # Stabilizer Builder
//!
//! Breakaway support feet for tall lithophanes.
//!
//! Two feet stand on the bottom frame edge (`y = 0`), one at each side. Each
//! foot is a pair of wedges, one projecting from the front of the frame and
//! one from the back, so the printed panel can stand upright. The wedges join
//! the frame through a thin neck ring that snaps off after printing unless
//! the feet are made permanent.
//!
//! ## Wedge Profile (side view, one half)
//!
//! ```text
//!        y
//!  height ┤ ▐▀▀▀▀▀▀▀▀▀▀▌ crest (3 mm out)
//!         │ ▐ neck     ╲
//!         │ ▐           ╲
//!       0 ┤ ▐▄▄▄▄▄▄▄▄▄▄▄▄▌ foot (height / 2 out)
//!         └─┴──────────────► outward from the panel
//!          z₀
//! ```

use config::constants::{
    STABILIZER_CREST, STABILIZER_FOOT_RATIO, STABILIZER_MAX_WIDTH, STABILIZER_NECK,
};
use config::MeshConfig;
use glam::DVec3;
use tracing::debug;

use crate::buffer::TriangleBuffer;

/// Triangles in one wedge half.
pub const HALF_TRIANGLES: usize = 16;

/// Triangles emitted by [`Stabilizer::emit`]: two feet of two halves each.
pub const STABILIZER_TRIANGLES: usize = HALF_TRIANGLES * 4;

// =============================================================================
// WEDGE TEMPLATE
// =============================================================================

/// Position across the foot.
#[derive(Debug, Clone, Copy)]
enum Across {
    /// Outer edge, x = 0
    Start,
    /// Neck edge, 1 mm in
    NeckStart,
    /// Neck edge, 1 mm in from the far side
    NeckEnd,
    /// Far edge, x = width
    End,
}

/// Height above the bottom frame edge.
#[derive(Debug, Clone, Copy)]
enum Up {
    Ground,
    /// 1 mm below the top, where the neck ring starts
    Shoulder,
    Top,
}

/// Distance outward from the panel face.
#[derive(Debug, Clone, Copy)]
enum Out {
    Neck,
    Foot,
    Crest,
}

type Corner = (Across, Up, Out);

use Across::{End, NeckEnd, NeckStart, Start};
use Out::{Crest, Foot, Neck};
use Up::{Ground, Shoulder, Top};

/// One wedge half, front orientation.
const HALF: [[Corner; 3]; HALF_TRIANGLES] = [
    // Near side
    [(Start, Ground, Neck), (Start, Ground, Foot), (Start, Top, Crest)],
    [(Start, Top, Crest), (Start, Top, Neck), (Start, Shoulder, Neck)],
    [(Start, Top, Crest), (Start, Shoulder, Neck), (Start, Ground, Neck)],
    // Far side
    [(End, Top, Crest), (End, Ground, Foot), (End, Ground, Neck)],
    [(End, Shoulder, Neck), (End, Top, Neck), (End, Top, Crest)],
    [(End, Ground, Neck), (End, Shoulder, Neck), (End, Top, Crest)],
    // Top
    [(NeckStart, Top, Neck), (Start, Top, Neck), (Start, Top, Crest)],
    [(Start, Top, Crest), (End, Top, Crest), (End, Top, Neck)],
    [(NeckEnd, Top, Neck), (NeckStart, Top, Neck), (Start, Top, Crest)],
    [(Start, Top, Crest), (End, Top, Neck), (NeckEnd, Top, Neck)],
    // Base
    [(Start, Ground, Foot), (Start, Ground, Neck), (End, Ground, Neck)],
    [(Start, Ground, Foot), (End, Ground, Neck), (End, Ground, Foot)],
    // Slope
    [(Start, Top, Crest), (Start, Ground, Foot), (End, Ground, Foot)],
    [(Start, Top, Crest), (End, Ground, Foot), (End, Top, Crest)],
    // Neck ring
    [(NeckStart, Shoulder, Neck), (NeckStart, Top, Neck), (NeckEnd, Top, Neck)],
    [(NeckStart, Shoulder, Neck), (NeckEnd, Top, Neck), (NeckEnd, Shoulder, Neck)],
];

// =============================================================================
// STABILIZER
// =============================================================================

/// Dimensions of the two stabilizer feet for one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stabilizer {
    /// Model width; the second foot sits flush with the right edge.
    pub model_width: f64,
    /// Foot width along x: `min(frame_border, 4)`.
    pub width: f64,
    /// Foot height along y: `total_height * stabilizer_height_factor`.
    pub height: f64,
    /// Outward offset of the neck ring, 1 mm for breakaway feet and 0 for
    /// permanent ones.
    pub neck_offset: f64,
    /// Front panel face, `total_thickness - min_thickness`.
    pub front: f64,
    /// Back panel face, `-min_thickness`.
    pub back: f64,
}

impl Stabilizer {
    /// Returns the feet for a model `total_height` tall, or `None` when
    /// stabilizers are disabled or the model does not exceed the threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use config::MeshConfig;
    /// use litho_mesh::stabilizer::Stabilizer;
    ///
    /// let config = MeshConfig::default();
    /// assert!(Stabilizer::new(&config, 60.0).is_none());
    /// assert!(Stabilizer::new(&config, 60.5).is_some());
    /// ```
    pub fn new(config: &MeshConfig, total_height: f64) -> Option<Self> {
        if !config.enable_stabilizers || total_height <= config.stabilizer_threshold {
            return None;
        }

        let z_delta = if config.permanent_stabilizers {
            STABILIZER_NECK
        } else {
            0.0
        };

        Some(Self {
            model_width: config.width,
            width: config.frame_border.min(STABILIZER_MAX_WIDTH),
            height: total_height * config.stabilizer_height_factor,
            neck_offset: STABILIZER_NECK - z_delta,
            front: config.relief_depth(),
            back: -config.min_thickness,
        })
    }

    /// Appends both feet to `buffer`.
    pub fn emit(&self, buffer: &mut TriangleBuffer) {
        debug!(
            width = self.width,
            height = self.height,
            neck_offset = self.neck_offset,
            "stabilizer dimensions"
        );

        for x0 in [0.0, self.model_width - self.width] {
            self.emit_half(x0, self.front, 1.0, buffer);
            self.emit_half(x0, self.back, -1.0, buffer);
        }
    }

    /// Emits one wedge at foot origin `x0`, anchored at `z0` and projecting
    /// in `direction` (+1 front, -1 back). The back half is mirrored across
    /// the foot's centre so its winding matches the front half.
    fn emit_half(&self, x0: f64, z0: f64, direction: f64, buffer: &mut TriangleBuffer) {
        let mirrored = direction < 0.0;

        let corner = |(across, up, out): Corner| {
            let x = match across {
                Start => 0.0,
                NeckStart => STABILIZER_NECK,
                NeckEnd => self.width - STABILIZER_NECK,
                End => self.width,
            };
            let x = if mirrored { self.width - x } else { x };
            let y = match up {
                Ground => 0.0,
                Shoulder => self.height - STABILIZER_NECK,
                Top => self.height,
            };
            let z = match out {
                Neck => self.neck_offset,
                Foot => self.height * STABILIZER_FOOT_RATIO,
                Crest => STABILIZER_CREST,
            };
            DVec3::new(x0 + x, y, z0 + direction * z)
        };

        for [a, b, c] in HALF {
            buffer.push_triangle(corner(a), corner(b), corner(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(permanent: bool) -> MeshConfig {
        MeshConfig {
            width: 100.0,
            frame_border: 6.0,
            permanent_stabilizers: permanent,
            ..MeshConfig::default()
        }
    }

    fn emitted(stabilizer: &Stabilizer) -> TriangleBuffer {
        let mut buffer = TriangleBuffer::new();
        stabilizer.emit(&mut buffer);
        buffer
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let config = config(false);
        assert!(Stabilizer::new(&config, config.stabilizer_threshold).is_none());
        assert!(Stabilizer::new(&config, config.stabilizer_threshold + 0.01).is_some());
    }

    #[test]
    fn test_disabled() {
        let config = MeshConfig {
            enable_stabilizers: false,
            ..config(false)
        };
        assert!(Stabilizer::new(&config, 500.0).is_none());
    }

    #[test]
    fn test_dimensions() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        assert_eq!(s.width, STABILIZER_MAX_WIDTH);
        assert_relative_eq!(s.height, 15.0);
        assert_eq!(s.neck_offset, 1.0);

        let narrow = MeshConfig {
            frame_border: 2.5,
            ..config(false)
        };
        assert_eq!(Stabilizer::new(&narrow, 100.0).unwrap().width, 2.5);
    }

    #[test]
    fn test_triangle_count() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        let buffer = emitted(&s);
        assert_eq!(buffer.triangle_count(), STABILIZER_TRIANGLES);
        assert_eq!(buffer.triangle_count(), 64);
    }

    #[test]
    fn test_feet_at_both_edges() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        let buffer = emitted(&s);
        let (min, max) = buffer.bounding_box();
        assert_eq!(min.x, 0.0);
        assert_eq!(max.x, 100.0);
        assert_eq!(min.y, 0.0);
        assert_relative_eq!(max.y, 15.0);

        // No vertex between the feet
        assert!(buffer
            .vertices()
            .iter()
            .all(|v| v.x <= s.width || v.x >= s.model_width - s.width));
    }

    #[test]
    fn test_halves_project_from_both_faces() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        let buffer = emitted(&s);
        let (min, max) = buffer.bounding_box();
        // Foot reach is height / 2 = 7.5 beyond each face
        assert_relative_eq!(max.z, s.front + 7.5, epsilon = 1e-9);
        assert_relative_eq!(min.z, s.back - 7.5, epsilon = 1e-9);
    }

    #[test]
    fn test_breakaway_neck_offset() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        let buffer = emitted(&s);
        let has = |z: f64| buffer.vertices().iter().any(|v| (v.z - z).abs() < 1e-9);

        assert!(has(s.front + 1.0));
        assert!(has(s.back - 1.0));
        assert!(!has(s.front));
        assert!(!has(s.back));
    }

    #[test]
    fn test_permanent_neck_is_flush() {
        let s = Stabilizer::new(&config(true), 100.0).unwrap();
        assert_eq!(s.neck_offset, 0.0);

        let buffer = emitted(&s);
        let has = |z: f64| buffer.vertices().iter().any(|v| (v.z - z).abs() < 1e-9);
        assert!(has(s.front));
        assert!(has(s.back));
        assert!(!has(s.front + 1.0));
        assert!(!has(s.back - 1.0));
    }

    #[test]
    fn test_back_half_mirrors_front() {
        let s = Stabilizer::new(&config(false), 100.0).unwrap();
        let mut front = TriangleBuffer::new();
        let mut back = TriangleBuffer::new();
        s.emit_half(0.0, 0.0, 1.0, &mut front);
        s.emit_half(0.0, 0.0, -1.0, &mut back);

        for (f, b) in front.vertices().iter().zip(back.vertices()) {
            assert_relative_eq!(b.x, s.width - f.x, epsilon = 1e-12);
            assert_eq!(b.y, f.y);
            assert_relative_eq!(b.z, -f.z, epsilon = 1e-12);
        }
    }
}
