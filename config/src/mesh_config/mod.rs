//! Physical parameters of one lithophane generation run.
//!
//! A [`MeshConfig`] is an immutable value handed to the mesh generator at
//! call time. It is serializable so a host application can persist it as
//! user preferences; missing keys fall back to the defaults in
//! [`crate::constants`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_FRAME_BORDER, DEFAULT_FRAME_SLOPE_FACTOR, DEFAULT_HANGER_COUNT,
    DEFAULT_MIN_THICKNESS, DEFAULT_STABILIZER_HEIGHT_FACTOR, DEFAULT_STABILIZER_THRESHOLD,
    DEFAULT_TOTAL_THICKNESS, DEFAULT_WIDTH,
};

/// Configuration for lithophane mesh generation.
///
/// All lengths are in millimetres.
///
/// # Examples
/// ```
/// use config::MeshConfig;
///
/// let config = MeshConfig {
///     width: 120.0,
///     enable_hangers: false,
///     ..MeshConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.relief_depth(), 3.2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Thinnest panel thickness (brightest pixels).
    pub min_thickness: f64,
    /// Thickest panel thickness (darkest pixels).
    pub total_thickness: f64,
    /// Width of the frame surrounding the relief.
    pub frame_border: f64,
    /// Total model width including the frame.
    pub width: f64,
    /// Fraction of the relief depth the inner bevel recedes inward, in (0, 1).
    pub frame_slope_factor: f64,

    /// Attach breakaway support feet to tall models.
    pub enable_stabilizers: bool,
    /// Join the feet solidly instead of through a thin breakaway neck.
    pub permanent_stabilizers: bool,
    /// Model height that must be exceeded before feet are attached.
    pub stabilizer_threshold: f64,
    /// Foot height as a fraction of the model height, in (0, 1).
    pub stabilizer_height_factor: f64,

    /// Attach hanging loops along the top edge.
    pub enable_hangers: bool,
    /// Number of hanging loops.
    pub hanger_count: u32,

    /// Reserved: segmented backside for bending. Currently inert.
    pub enable_segmentation: bool,
    /// Reserved: backside segment count. Currently inert.
    pub backside_segments: u32,
    /// Reserved: frame segment count. Currently inert.
    pub frame_segments: u32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            min_thickness: DEFAULT_MIN_THICKNESS,
            total_thickness: DEFAULT_TOTAL_THICKNESS,
            frame_border: DEFAULT_FRAME_BORDER,
            width: DEFAULT_WIDTH,
            frame_slope_factor: DEFAULT_FRAME_SLOPE_FACTOR,
            enable_stabilizers: true,
            permanent_stabilizers: false,
            stabilizer_threshold: DEFAULT_STABILIZER_THRESHOLD,
            stabilizer_height_factor: DEFAULT_STABILIZER_HEIGHT_FACTOR,
            enable_hangers: true,
            hanger_count: DEFAULT_HANGER_COUNT,
            enable_segmentation: false,
            backside_segments: 1,
            frame_segments: 1,
        }
    }
}

impl MeshConfig {
    /// Depth of the relief above the base datum: `total_thickness - min_thickness`.
    #[inline]
    pub fn relief_depth(&self) -> f64 {
        self.total_thickness - self.min_thickness
    }

    /// Checks that the geometric parameters describe a well-formed solid.
    ///
    /// Generation itself never calls this: out-of-range values silently
    /// produce self-intersecting or inverted geometry. Callers that need
    /// robust output should validate first.
    ///
    /// # Examples
    /// ```
    /// use config::{ConfigError, MeshConfig};
    ///
    /// let config = MeshConfig { frame_border: 150.0, ..MeshConfig::default() };
    /// assert_eq!(
    ///     config.validate(),
    ///     Err(ConfigError::InvalidFrameBorder { border: 150.0, width: 200.0 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Each check is phrased as the accepted range, so NaN falls outside it.
        let thickness_ok = self.min_thickness > 0.0 && self.total_thickness > self.min_thickness;
        if !thickness_ok {
            return Err(ConfigError::InvalidThickness {
                min: self.min_thickness,
                total: self.total_thickness,
            });
        }
        let width_ok = self.width > 0.0;
        if !width_ok {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        let border_ok = self.frame_border >= 0.0 && self.frame_border < self.width / 2.0;
        if !border_ok {
            return Err(ConfigError::InvalidFrameBorder {
                border: self.frame_border,
                width: self.width,
            });
        }
        check_unit_factor("frame_slope_factor", self.frame_slope_factor)?;
        check_unit_factor("stabilizer_height_factor", self.stabilizer_height_factor)?;
        if self.hanger_count == 0 {
            return Err(ConfigError::InvalidHangerCount(self.hanger_count));
        }
        Ok(())
    }
}

fn check_unit_factor(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { name, value })
    }
}

/// Error returned by [`MeshConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Thicknesses must satisfy `total > min > 0`.
    #[error("thickness must satisfy total > min > 0: min={min}, total={total}")]
    InvalidThickness { min: f64, total: f64 },

    /// Width must be positive.
    #[error("width must be positive: {0}")]
    InvalidWidth(f64),

    /// Border must fit twice inside the width.
    #[error("frame border must be in [0, width/2): border={border}, width={width}")]
    InvalidFrameBorder { border: f64, width: f64 },

    /// A ratio parameter fell outside the open unit interval.
    #[error("{name} must be in (0, 1): {value}")]
    FactorOutOfRange { name: &'static str, value: f64 },

    /// At least one hanger is required.
    #[error("hanger count must be >= 1: {0}")]
    InvalidHangerCount(u32),
}
