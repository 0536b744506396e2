use crate::math::Point3;
use crate::tessellation::MeshBuffer;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// Computes the axis-aligned bounding box of a mesh.
pub struct BoundingBox<'a> {
    mesh: &'a MeshBuffer,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a MeshBuffer) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning `None` for a mesh without vertices.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb> {
        let (first, rest) = self.mesh.positions.split_first()?;
        let aabb = rest.iter().fold(
            Aabb {
                min: *first,
                max: *first,
            },
            |acc, p| Aabb {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        );
        Some(aabb)
    }
}
