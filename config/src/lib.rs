//! # Config Crate
//!
//! Centralized configuration for the lithophane pipeline.
//! All magic numbers used by the mesh builders and exporters are defined
//! in [`constants`], and the physical parameters of a single generation run
//! live in [`MeshConfig`].
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_MIN_THICKNESS, SURFACE_ROW_CHUNK};
//! use config::MeshConfig;
//!
//! let config = MeshConfig::default();
//! assert_eq!(config.min_thickness, DEFAULT_MIN_THICKNESS);
//! assert!(SURFACE_ROW_CHUNK > 0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Values**: Configuration is passed by value, never read from globals
//! - **Opt-in Validation**: Generation never rejects a config; callers may
//!   call [`MeshConfig::validate`] first

pub mod constants;
pub mod mesh_config;

pub use mesh_config::{ConfigError, MeshConfig};
