pub mod error;
pub mod math;
pub mod operations;
pub mod platform;
pub mod tessellation;

pub use error::{PlatemeshError, Result};
pub use operations::query::{ClassifyHit, HitOutcome, HitResult, IntervalWrap};
pub use platform::{HoleSpan, PlatformMesh, PlatformSpec, SectorMask};
pub use tessellation::{BuildPlatform, MeshBuffer, MeshSections};
