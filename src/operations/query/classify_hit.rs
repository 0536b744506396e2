use std::f32::consts::{FRAC_PI_2, TAU};

use tracing::trace;

use crate::math::angle::{sector_angle, sector_step, wrap_angle};
use crate::math::ANGLE_TOLERANCE;
use crate::platform::{HoleSpan, PlatformSpec};

/// Quarter turn between the mesh's angle-zero axis and the point directly
/// below the falling object.
pub const QUERY_REFERENCE_OFFSET: f32 = FRAC_PI_2;

/// How hole intervals that run past `2π` are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntervalWrap {
    /// Compare on the ring, so a hole crossing angle zero matches on both
    /// sides of it.
    #[default]
    Wrapped,
    /// Compare against `[start·step, (start + span)·step]` literally. The part
    /// of a hole beyond `2π` never matches.
    Unwrapped,
}

/// Outcome of a hit query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitResult {
    /// The query direction lands on solid material.
    pub collision_hit: bool,
    /// Reserved for hazard sectors; never set by this crate.
    pub death: bool,
}

/// What the falling object should do with a [`HitResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Solid material below; the object bounces back up.
    Bounce,
    /// Open sector below; the object falls through.
    PassThrough,
    /// Hazard sector below.
    Death,
}

impl HitResult {
    /// Resolves the flags, with `death` taking precedence over a collision.
    #[must_use]
    pub fn outcome(&self) -> HitOutcome {
        if self.death {
            HitOutcome::Death
        } else if self.collision_hit {
            HitOutcome::Bounce
        } else {
            HitOutcome::PassThrough
        }
    }
}

/// Decides whether the sector under the falling object is solid or open.
///
/// The orientation is the platform's spin around its vertical axis in
/// radians. Any finite or infinite value is accepted; non-finite values
/// classify as a collision.
pub struct ClassifyHit<'a> {
    spec: &'a PlatformSpec,
    orientation: f32,
    wrap: IntervalWrap,
}

impl<'a> ClassifyHit<'a> {
    /// Creates a new `ClassifyHit` query.
    #[must_use]
    pub fn new(spec: &'a PlatformSpec, orientation: f32) -> Self {
        Self {
            spec,
            orientation,
            wrap: IntervalWrap::default(),
        }
    }

    /// Sets how wrapping hole intervals are compared.
    #[must_use]
    pub fn with_wrap(mut self, wrap: IntervalWrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Query direction in the mesh frame, in `[0, 2π)`.
    #[must_use]
    pub fn query_angle(&self) -> f32 {
        wrap_angle(self.orientation - QUERY_REFERENCE_OFFSET)
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> HitResult {
        let hole = self.matching_hole();
        trace!(
            orientation = self.orientation,
            query = self.query_angle(),
            ?hole,
            "classified platform hit"
        );
        HitResult {
            collision_hit: hole.is_none(),
            death: false,
        }
    }

    /// Index of the first hole containing the query direction.
    #[must_use]
    pub fn matching_hole(&self) -> Option<usize> {
        let n = self.spec.segment_count;
        if n == 0 {
            return None;
        }
        let query = self.query_angle();
        self.spec
            .holes
            .iter()
            .position(|hole| match self.wrap {
                IntervalWrap::Wrapped => contains_wrapped(hole, n, query),
                IntervalWrap::Unwrapped => contains_unwrapped(hole, n, query),
            })
    }

    /// Sector under the falling object, or `None` for an empty ring or a
    /// non-finite orientation.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sector_below(&self) -> Option<u32> {
        let n = self.spec.segment_count;
        let query = self.query_angle();
        if n == 0 || !query.is_finite() {
            return None;
        }
        let sector = (query / sector_step(n)).floor() as u32;
        Some(sector.min(n - 1))
    }
}

/// Slack added to each side of a hole interval, capped to a small fraction of
/// a sector so it never reaches into the neighbouring solid sector.
fn boundary_slack(segment_count: u32) -> f32 {
    ANGLE_TOLERANCE.min(sector_step(segment_count) * 1e-3)
}

fn contains_unwrapped(hole: &HoleSpan, segment_count: u32, query: f32) -> bool {
    let lo = sector_angle(hole.start_segment, segment_count);
    let hi = sector_angle(
        hole.start_segment.saturating_add(hole.segment_span),
        segment_count,
    );
    let slack = boundary_slack(segment_count);
    query >= lo - slack && query <= hi + slack
}

#[allow(clippy::cast_precision_loss)]
fn contains_wrapped(hole: &HoleSpan, segment_count: u32, query: f32) -> bool {
    let lo = sector_angle(hole.start_on_ring(segment_count), segment_count);
    let width = hole.segment_span as f32 * sector_step(segment_count);
    let offset = wrap_angle(query - lo);
    // just below `lo` wraps to almost a full turn
    let slack = boundary_slack(segment_count);
    offset <= width + slack || offset >= TAU - slack
}
