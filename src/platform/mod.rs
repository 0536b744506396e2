//! Platform description: the parametric input shared by the mesh builder and
//! the hit classifier.

mod platform_mesh;
mod sector_mask;
mod spec;

pub use platform_mesh::PlatformMesh;
pub use sector_mask::SectorMask;
pub use spec::{HoleSpan, PlatformSpec};
