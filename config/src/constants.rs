//! # Configuration Constants
//!
//! Centralized constants for the lithophane pipeline. Default physical
//! parameters, fixed part dimensions, export layout values and progress
//! checkpoints are defined here.
//!
//! ## Categories
//!
//! - **Defaults**: Initial values of every [`crate::MeshConfig`] field
//! - **Surface**: Height sample range and parallel chunking
//! - **Parts**: Fixed stabilizer and hanger dimensions (mm)
//! - **Export**: File layout and packaging limits
//! - **Progress**: Checkpoints reported during generation

// =============================================================================
// DEFAULT PARAMETERS
// =============================================================================

/// Default thinnest panel thickness in millimetres.
///
/// A sample of 255 (white) produces a panel exactly this thick.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_MIN_THICKNESS, DEFAULT_TOTAL_THICKNESS};
///
/// assert!(DEFAULT_MIN_THICKNESS < DEFAULT_TOTAL_THICKNESS);
/// ```
pub const DEFAULT_MIN_THICKNESS: f64 = 0.8;

/// Default thickest panel thickness in millimetres (sample value 0).
pub const DEFAULT_TOTAL_THICKNESS: f64 = 4.0;

/// Default frame border width in millimetres.
pub const DEFAULT_FRAME_BORDER: f64 = 3.0;

/// Default total model width in millimetres, frame included.
pub const DEFAULT_WIDTH: f64 = 200.0;

/// Default fraction of the relief depth used as the inward bevel run.
pub const DEFAULT_FRAME_SLOPE_FACTOR: f64 = 0.75;

/// Default model height (mm) a lithophane must exceed before stabilizer
/// feet are attached.
pub const DEFAULT_STABILIZER_THRESHOLD: f64 = 60.0;

/// Default stabilizer height as a fraction of the total model height.
pub const DEFAULT_STABILIZER_HEIGHT_FACTOR: f64 = 0.15;

/// Default number of hanging loops along the top edge.
pub const DEFAULT_HANGER_COUNT: u32 = 2;

// =============================================================================
// SURFACE CONSTANTS
// =============================================================================

/// Largest height-grid sample value.
///
/// The relief depth factor divides the thickness range by this value so
/// that a full-scale sample spans the whole relief.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_SAMPLE_VALUE;
///
/// let depth_factor = (4.0 - 0.8) / MAX_SAMPLE_VALUE;
/// assert!((depth_factor * MAX_SAMPLE_VALUE - 3.2).abs() < 1e-12);
/// ```
pub const MAX_SAMPLE_VALUE: f64 = 255.0;

/// Minimum number of grid rows processed by one parallel task.
///
/// Rows are split dynamically across the worker pool; this is the smallest
/// split so that per-task overhead stays negligible against row work.
pub const SURFACE_ROW_CHUNK: usize = 32;

/// Vertices reserved per grid cell (surface pair plus its share of the walls).
pub const CAPACITY_VERTICES_PER_CELL: usize = 18;

/// Vertices reserved for the flat backside.
pub const CAPACITY_BACKSIDE_VERTICES: usize = 12;

/// Vertices reserved for the frame.
pub const CAPACITY_FRAME_VERTICES: usize = 500;

/// Vertices reserved for both stabilizer feet.
pub const CAPACITY_STABILIZER_VERTICES: usize = 1000;

/// Vertices reserved per hanger.
pub const CAPACITY_HANGER_VERTICES: usize = 300;

// =============================================================================
// PART DIMENSIONS
// =============================================================================

/// Upper bound on stabilizer foot width; narrower frames use the border width.
///
/// # Example
///
/// ```rust
/// use config::constants::STABILIZER_MAX_WIDTH;
///
/// let border: f64 = 10.0;
/// assert_eq!(border.min(STABILIZER_MAX_WIDTH), 4.0);
/// ```
pub const STABILIZER_MAX_WIDTH: f64 = 4.0;

/// Thickness of the breakaway neck, and its offset from the panel face.
pub const STABILIZER_NECK: f64 = 1.0;

/// Outward reach of a stabilizer half at its top edge.
pub const STABILIZER_CREST: f64 = 3.0;

/// Outward reach of a stabilizer half at its base, as a fraction of its height.
pub const STABILIZER_FOOT_RATIO: f64 = 0.5;

/// Width of one hanging loop.
pub const HANGER_WIDTH: f64 = 9.0;

/// Height of one hanging loop above the top frame edge.
pub const HANGER_HEIGHT: f64 = 3.0;

/// Thickness of one hanging loop along z.
pub const HANGER_DEPTH: f64 = 2.0;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Name written into file headers and comments.
pub const EXPORT_SIGNATURE: &str = "LithoMaker Export";

/// Solid and object name used by the text formats.
pub const EXPORT_OBJECT_NAME: &str = "lithophane";

/// Binary STL header size in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL triangle record (normal, 3 vertices, attribute).
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Significant digits of ASCII STL vertex coordinates.
pub const STL_ASCII_SIGNIFICANT_DIGITS: usize = 6;

/// Decimal places used both for vertex deduplication keys and for
/// coordinates written to OBJ and 3MF.
///
/// Two vertices whose coordinates agree to this many decimals are merged.
pub const DEDUP_DECIMALS: usize = 6;

/// Upper bound, in seconds, on waiting for an external archiver.
///
/// # Example
///
/// ```rust
/// use config::constants::ARCHIVE_TIMEOUT_SECS;
/// use std::time::Duration;
///
/// let timeout = Duration::from_secs(ARCHIVE_TIMEOUT_SECS);
/// assert_eq!(timeout.as_secs(), 30);
/// ```
pub const ARCHIVE_TIMEOUT_SECS: u64 = 30;

/// Poll interval while waiting for an external archiver to exit.
pub const ARCHIVE_POLL_INTERVAL_MS: u64 = 20;

// =============================================================================
// PROGRESS CHECKPOINTS
// =============================================================================

/// Total reported with every progress update.
pub const PROGRESS_TOTAL: u32 = 100;

/// Progress after the relief surface.
pub const PROGRESS_SURFACE: u32 = 50;

/// Progress after the backside.
pub const PROGRESS_BACKSIDE: u32 = 60;

/// Progress after the frame.
pub const PROGRESS_FRAME: u32 = 80;
