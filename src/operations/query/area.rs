use crate::tessellation::MeshBuffer;

/// Computes the total surface area of a mesh by summing its triangle areas.
pub struct Area<'a> {
    mesh: &'a MeshBuffer,
}

impl<'a> Area<'a> {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(mesh: &'a MeshBuffer) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the total surface area.
    ///
    /// # Panics
    ///
    /// Panics if a triangle references a vertex out of range; check with
    /// [`IsValid`](super::IsValid) first for untrusted buffers.
    #[must_use]
    pub fn execute(&self) -> f32 {
        (0..self.mesh.triangle_count())
            .map(|t| {
                let [v0, v1, v2] = self.mesh.triangle(t);
                (v1 - v0).cross(&(v2 - v0)).norm() * 0.5
            })
            .sum()
    }
}
