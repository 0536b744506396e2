use crate::math::TOLERANCE;
use crate::tessellation::{placeholder_tangent, MeshBuffer};

/// Validates the structural consistency of a mesh buffer.
///
/// Checks that the per-vertex arrays line up, that every triangle names
/// existing vertices, that normals have unit length, that tangents carry the
/// placeholder value, and that the section ranges tile the index list.
pub struct IsValid<'a> {
    mesh: &'a MeshBuffer,
}

impl<'a> IsValid<'a> {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(mesh: &'a MeshBuffer) -> Self {
        Self { mesh }
    }

    /// Executes the validation, returning `true` if the mesh is valid.
    #[must_use]
    pub fn execute(&self) -> bool {
        let mesh = self.mesh;
        let count = mesh.positions.len();
        if mesh.normals.len() != count || mesh.tangents.len() != count {
            return false;
        }
        if !mesh.flat_indices().all(|i| (i as usize) < count) {
            return false;
        }
        if !mesh
            .normals
            .iter()
            .all(|n| (n.norm() - 1.0).abs() < TOLERANCE)
        {
            return false;
        }
        let tangent = placeholder_tangent();
        if mesh.tangents.iter().any(|t| *t != tangent) {
            return false;
        }

        let sections = &mesh.sections;
        sections.caps.start == 0
            && sections.caps.end == sections.wall.start
            && sections.wall.end == sections.patches.start
            && sections.patches.end == mesh.triangle_count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::platform::PlatformSpec;
    use crate::tessellation::BuildPlatform;

    fn built() -> MeshBuffer {
        let spec = PlatformSpec::new(12, 0.3, 2.0).with_hole(3, 2).with_hole(8, 3);
        BuildPlatform::new(&spec).execute().unwrap()
    }

    #[test]
    fn built_mesh_is_valid() {
        assert!(IsValid::new(&built()).execute());
        let full = PlatformSpec::new(12, 0.3, 2.0).with_hole(0, 12);
        assert!(IsValid::new(&BuildPlatform::new(&full).execute().unwrap()).execute());
    }

    #[test]
    fn out_of_range_index_is_invalid() {
        let mut mesh = built();
        let count = u32::try_from(mesh.vertex_count()).unwrap();
        mesh.indices[0][1] = count;
        assert!(!IsValid::new(&mesh).execute());
    }

    #[test]
    fn mismatched_arrays_are_invalid() {
        let mut mesh = built();
        mesh.normals.pop();
        assert!(!IsValid::new(&mesh).execute());
    }

    #[test]
    fn unnormalized_normal_is_invalid() {
        let mut mesh = built();
        mesh.normals[4] = Vector3::new(0.0, 5.0, 0.0);
        assert!(!IsValid::new(&mesh).execute());
    }

    #[test]
    fn stray_triangle_breaks_sections() {
        let mut mesh = built();
        mesh.push_vertex(Point3::origin(), Vector3::y());
        mesh.push_triangle(0, 1, 2);
        assert!(!IsValid::new(&mesh).execute());
    }
}
