mod build_platform;

pub use build_platform::BuildPlatform;

use std::ops::Range;

use crate::math::{Point3, Vector3, Vector4};

/// Tangent written for every vertex. The generator does not derive tangents
/// from UVs; `w` carries the handedness sign.
#[must_use]
pub fn placeholder_tangent() -> Vector4 {
    Vector4::new(1.0, 0.0, 0.0, -1.0)
}

/// Triangle ranges of the sections that make up a platform mesh.
///
/// Ranges index into [`MeshBuffer::indices`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshSections {
    /// Top and bottom cap triangles of solid sectors.
    pub caps: Range<usize>,
    /// Outer wall triangles of solid sectors.
    pub wall: Range<usize>,
    /// Triangles sealing the cut edges at hole boundaries.
    pub patches: Range<usize>,
}

/// Render-ready triangle mesh with per-vertex normals and tangents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Unit vertex normals.
    pub normals: Vec<Vector3>,
    /// Vertex tangents, see [`placeholder_tangent`].
    pub tangents: Vec<Vector4>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
    /// Where each section's triangles live in `indices`.
    pub sections: MeshSections,
}

impl MeshBuffer {
    /// Creates an empty buffer with room for the given counts.
    #[must_use]
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            tangents: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles),
            sections: MeshSections::default(),
        }
    }

    /// Appends a vertex and returns its index.
    ///
    /// The caller guarantees the final vertex count fits in `u32`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_vertex(&mut self, position: Point3, normal: Vector3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.tangents.push(placeholder_tangent());
        index
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.push([a, b, c]);
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Triangles of solid sectors (caps and wall).
    #[must_use]
    pub fn solid_triangle_count(&self) -> usize {
        self.sections.caps.len() + self.sections.wall.len()
    }

    /// Triangles sealing hole boundaries.
    #[must_use]
    pub fn patch_triangle_count(&self) -> usize {
        self.sections.patches.len()
    }

    /// Flat index stream, three entries per triangle.
    pub fn flat_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().flatten().copied()
    }

    /// Corner positions of triangle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or any of its vertex indices is out of range.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [Point3; 3] {
        let [a, b, c] = self.indices[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_sequential_indices() {
        let mut mesh = MeshBuffer::with_capacity(3, 1);
        let a = mesh.push_vertex(Point3::origin(), Vector3::y());
        let b = mesh.push_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::y());
        let c = mesh.push_vertex(Point3::new(0.0, 0.0, 1.0), Vector3::y());
        mesh.push_triangle(a, b, c);

        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.tangents, vec![placeholder_tangent(); 3]);
        assert_eq!(mesh.flat_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(mesh.triangle(0)[1], Point3::new(1.0, 0.0, 0.0));
    }
}
