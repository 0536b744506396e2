use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::operations::query::{ClassifyHit, HitResult, IntervalWrap};
use crate::tessellation::{BuildPlatform, MeshBuffer};

use super::PlatformSpec;

/// A platform's current spec together with its last built mesh.
///
/// The owning application assigns a new spec whenever the layout changes;
/// the mesh is rebuilt from scratch only when the spec actually differs.
/// Built meshes are shared behind an [`Arc`], so a consumer holding an older
/// mesh keeps a consistent buffer across rebuilds.
#[derive(Debug, Clone)]
pub struct PlatformMesh {
    spec: PlatformSpec,
    mesh: Arc<MeshBuffer>,
    wrap: IntervalWrap,
}

impl PlatformMesh {
    /// Builds the mesh for `spec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec cannot be built.
    pub fn new(spec: PlatformSpec) -> Result<Self> {
        let mesh = BuildPlatform::new(&spec).execute()?;
        Ok(Self {
            spec,
            mesh: Arc::new(mesh),
            wrap: IntervalWrap::default(),
        })
    }

    /// Sets how hit queries compare holes that cross angle zero.
    #[must_use]
    pub fn with_wrap(mut self, wrap: IntervalWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// The spec the current mesh was built from.
    #[must_use]
    pub fn spec(&self) -> &PlatformSpec {
        &self.spec
    }

    /// Shared handle to the current mesh.
    #[must_use]
    pub fn mesh(&self) -> Arc<MeshBuffer> {
        Arc::clone(&self.mesh)
    }

    /// Assigns a new spec, rebuilding the mesh if it changed.
    ///
    /// Returns `true` if a rebuild happened. On error the previous spec and
    /// mesh are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the new spec cannot be built.
    pub fn set_spec(&mut self, spec: PlatformSpec) -> Result<bool> {
        if spec == self.spec {
            return Ok(false);
        }
        let mesh = BuildPlatform::new(&spec).execute()?;
        debug!(
            holes = spec.holes.len(),
            vertices = mesh.vertex_count(),
            "rebuilt platform mesh"
        );
        self.spec = spec;
        self.mesh = Arc::new(mesh);
        Ok(true)
    }

    /// Classifies the sector under the falling object at `orientation`.
    #[must_use]
    pub fn check_hit(&self, orientation: f32) -> HitResult {
        ClassifyHit::new(&self.spec, orientation)
            .with_wrap(self.wrap)
            .execute()
    }
}
