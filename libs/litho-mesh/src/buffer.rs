//! # Triangle Buffer
//!
//! Unindexed triangle soup shared by every mesh builder and exporter.

use glam::DVec3;

/// An ordered sequence of points, implicitly grouped in runs of three.
///
/// Each consecutive triple is one triangle. No index or adjacency structure
/// is kept, winding is not globally consistent and normals are never
/// computed; consumers must recompute or tolerate zero normals.
///
/// All coordinates are f64 millimetres. Narrowing to f32 only happens when a
/// file format requires it.
///
/// # Example
///
/// ```rust
/// use litho_mesh::TriangleBuffer;
/// use glam::DVec3;
///
/// let mut buffer = TriangleBuffer::new();
/// buffer.push_triangle(DVec3::ZERO, DVec3::X, DVec3::Y);
/// assert_eq!(buffer.triangle_count(), 1);
/// assert_eq!(buffer.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleBuffer {
    /// Vertex positions, three per triangle
    vertices: Vec<DVec3>,
}

impl TriangleBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer with room for `vertex_capacity` points.
    pub fn with_capacity(vertex_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
        }
    }

    /// Wraps raw points without checking the length.
    ///
    /// Exporters reject buffers whose length is not a multiple of 3, so a
    /// malformed buffer can be represented but never serialized.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Self {
        Self { vertices }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the buffer holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of complete triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns true if the buffer is non-empty and its length is a multiple of 3.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.len() % 3 == 0
    }

    /// Appends one triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3) {
        self.vertices.extend_from_slice(&[a, b, c]);
    }

    /// Appends a quad as the fan `(a, b, c)`, `(a, c, d)`.
    #[inline]
    pub fn push_quad(&mut self, a: DVec3, b: DVec3, c: DVec3, d: DVec3) {
        self.vertices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    /// Moves all points of `other` to the end of this buffer.
    pub fn append(&mut self, other: &mut TriangleBuffer) {
        self.vertices.append(&mut other.vertices);
    }

    /// Appends raw points produced by a worker.
    pub fn extend_from_vertices(&mut self, vertices: Vec<DVec3>) {
        if self.vertices.is_empty() && self.vertices.capacity() < vertices.len() {
            self.vertices = vertices;
        } else {
            self.vertices.extend(vertices);
        }
    }

    /// Reserves room for at least `additional` more points.
    pub fn reserve(&mut self, additional: usize) {
        self.vertices.reserve(additional);
    }

    /// Returns a reference to the points.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Consumes the buffer, returning the points.
    pub fn into_vertices(self) -> Vec<DVec3> {
        self.vertices
    }

    /// Iterates over complete triangles. A trailing partial triangle is skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }
}
