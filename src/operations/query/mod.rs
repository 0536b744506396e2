mod area;
mod bounding_box;
mod classify_hit;
mod is_closed;
mod is_valid;

pub use area::Area;
pub use bounding_box::{Aabb, BoundingBox};
pub use classify_hit::{ClassifyHit, HitOutcome, HitResult, IntervalWrap, QUERY_REFERENCE_OFFSET};
pub use is_closed::IsClosed;
pub use is_valid::IsValid;
