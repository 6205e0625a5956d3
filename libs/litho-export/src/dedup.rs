//! # Vertex Deduplication
//!
//! Collapses the unindexed triangle soup into shared vertices for the
//! indexed formats (OBJ, 3MF).
//!
//! Two points are the same vertex when their coordinates print identically
//! with [`DEDUP_DECIMALS`] fixed decimals. Vertices keep first-seen order.

use std::collections::HashMap;
use std::fmt::Write as _;

use config::constants::DEDUP_DECIMALS;
use glam::DVec3;
use litho_mesh::TriangleBuffer;

/// Shared vertices plus zero-based triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedTriangles {
    /// Unique vertices in first-seen order.
    pub vertices: Vec<DVec3>,
    /// One index triple per input triangle.
    pub triangles: Vec<[u32; 3]>,
}

impl IndexedTriangles {
    /// Indexes every complete triangle of `buffer`.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use litho_export::dedup::IndexedTriangles;
    /// use litho_mesh::TriangleBuffer;
    ///
    /// let mut buffer = TriangleBuffer::new();
    /// buffer.push_quad(DVec3::ZERO, DVec3::X, DVec3::ONE, DVec3::Y);
    ///
    /// let indexed = IndexedTriangles::from_buffer(&buffer);
    /// assert_eq!(indexed.vertices.len(), 4);
    /// assert_eq!(indexed.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    /// ```
    pub fn from_buffer(buffer: &TriangleBuffer) -> Self {
        let mut lookup: HashMap<String, u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut key = String::new();

        let mut index_of = |v: DVec3| {
            key.clear();
            let _ = write!(
                key,
                "{:.*}_{:.*}_{:.*}",
                DEDUP_DECIMALS, v.x, DEDUP_DECIMALS, v.y, DEDUP_DECIMALS, v.z
            );
            if let Some(&index) = lookup.get(key.as_str()) {
                return index;
            }
            let index = vertices.len() as u32;
            vertices.push(v);
            lookup.insert(key.clone(), index);
            index
        };

        let triangles = buffer
            .triangles()
            .map(|[a, b, c]| [index_of(a), index_of(b), index_of(c)])
            .collect();

        Self {
            vertices,
            triangles,
        }
    }
}
