//! # Lithophane Mesh
//!
//! Turns a grayscale height grid into a closed, printable lithophane mesh:
//! a relief panel whose thickness follows pixel darkness, surrounded by a
//! beveled frame, with optional stabilizer feet and hanging loops.
//!
//! ## Architecture
//!
//! ```text
//! HeightGrid + MeshConfig → MeshGenerator → TriangleBuffer → litho-export
//! ```
//!
//! ## Builders
//!
//! - **Surface**: relief plus closing walls, rows fanned out over rayon
//! - **Backside**: flat back plane
//! - **Frame**: beveled rectangular frame
//! - **Stabilizers**: breakaway feet for tall panels
//! - **Hangers**: loops along the top edge
//!
//! ## Usage
//!
//! ```rust
//! use config::MeshConfig;
//! use litho_mesh::{HeightGrid, MeshGenerator};
//!
//! let grid = HeightGrid::from_fn(16, 12, |x, y| (x * 16 + y) as u8).unwrap();
//! let mesh = MeshGenerator::new(MeshConfig::default()).generate(&grid);
//! assert!(mesh.is_well_formed());
//! ```

pub mod backside;
pub mod buffer;
pub mod error;
pub mod frame;
pub mod generator;
pub mod grid;
pub mod hanger;
pub mod scaling;
pub mod stabilizer;
pub mod surface;

pub use buffer::TriangleBuffer;
pub use error::MeshError;
pub use generator::MeshGenerator;
pub use grid::HeightGrid;
pub use scaling::Scaling;
