use crate::error::{LayoutError, ParameterError, Result};

/// Segment count of the stock platform.
pub const DEFAULT_SEGMENT_COUNT: u32 = 64;

/// Slab thickness of the stock platform.
pub const DEFAULT_HEIGHT: f32 = 0.2;

/// Outer radius of the stock platform.
pub const DEFAULT_RADIUS: f32 = 5.0;

/// A contiguous run of removed sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleSpan {
    /// First removed sector, taken modulo the segment count.
    pub start_segment: u32,
    /// Number of consecutive removed sectors.
    pub segment_span: u32,
}

impl HoleSpan {
    /// Creates a new hole span.
    #[must_use]
    pub fn new(start_segment: u32, segment_span: u32) -> Self {
        Self {
            start_segment,
            segment_span,
        }
    }

    /// Sector index of the first removed sector, reduced onto the ring.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero.
    #[must_use]
    pub fn start_on_ring(&self, segment_count: u32) -> u32 {
        self.start_segment % segment_count
    }

    /// Sector index of the boundary that closes the hole, reduced onto the
    /// ring. For a full-ring hole this coincides with the start.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero.
    #[must_use]
    pub fn end_segment(&self, segment_count: u32) -> u32 {
        ring_index(self.start_segment, self.segment_span, segment_count)
    }

    /// Returns `true` if `sector` is removed by this hole.
    ///
    /// # Panics
    ///
    /// Panics if `segment_count` is zero.
    #[must_use]
    pub fn covers(&self, sector: u32, segment_count: u32) -> bool {
        let n = u64::from(segment_count);
        let start = u64::from(self.start_on_ring(segment_count));
        let offset = (u64::from(sector % segment_count) + n - start) % n;
        offset < u64::from(self.segment_span)
    }

    /// Iterates the removed sectors in order, wrapping around the ring.
    ///
    /// # Panics
    ///
    /// The iterator panics on its first item if `segment_count` is zero.
    pub fn sectors(&self, segment_count: u32) -> impl Iterator<Item = u32> {
        let start = self.start_segment;
        (0..self.segment_span).map(move |k| ring_index(start, k, segment_count))
    }
}

/// Parametric description of one perforated platform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlatformSpec {
    /// Angular resolution; the disc is divided into this many sectors.
    pub segment_count: u32,
    /// Vertical thickness of the slab.
    pub height: f32,
    /// Outer radius of the disc.
    pub radius: f32,
    /// Angular cut-outs.
    pub holes: Vec<HoleSpan>,
}

impl Default for PlatformSpec {
    fn default() -> Self {
        Self {
            segment_count: DEFAULT_SEGMENT_COUNT,
            height: DEFAULT_HEIGHT,
            radius: DEFAULT_RADIUS,
            holes: Vec::new(),
        }
    }
}

impl PlatformSpec {
    /// Creates a platform without holes.
    #[must_use]
    pub fn new(segment_count: u32, height: f32, radius: f32) -> Self {
        Self {
            segment_count,
            height,
            radius,
            holes: Vec::new(),
        }
    }

    /// Adds a hole to the layout.
    #[must_use]
    pub fn with_hole(mut self, start_segment: u32, segment_span: u32) -> Self {
        self.holes.push(HoleSpan::new(start_segment, segment_span));
        self
    }

    /// Replaces the hole layout.
    #[must_use]
    pub fn with_holes(mut self, holes: impl IntoIterator<Item = HoleSpan>) -> Self {
        self.holes = holes.into_iter().collect();
        self
    }

    /// Checks the parameters and the hole layout.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] for a segment count below 3, a radius or
    /// height that is not a positive finite number, or an empty hole.
    /// Returns [`LayoutError`] for a hole wider than the ring or for two holes
    /// sharing a sector.
    pub fn validate(&self) -> Result<()> {
        self.validate_parameters()?;
        self.validate_layout()?;
        Ok(())
    }

    fn validate_parameters(&self) -> std::result::Result<(), ParameterError> {
        if self.segment_count < 3 {
            return Err(ParameterError::TooFewSegments(self.segment_count));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ParameterError::NonPositiveRadius(self.radius));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ParameterError::NonPositiveHeight(self.height));
        }
        if let Some(index) = self.holes.iter().position(|h| h.segment_span < 1) {
            return Err(ParameterError::EmptyHole { index });
        }
        Ok(())
    }

    fn validate_layout(&self) -> std::result::Result<(), LayoutError> {
        let n = self.segment_count;
        for (index, hole) in self.holes.iter().enumerate() {
            if hole.segment_span > n {
                return Err(LayoutError::HoleExceedsRing {
                    index,
                    span: hole.segment_span,
                    segment_count: n,
                });
            }
        }

        // Reduced intervals sorted by start; on a ring without overlaps each
        // interval ends before the next one starts, and the last one ends
        // before the first one comes around again.
        let mut spans: Vec<(u32, u32, usize)> = self
            .holes
            .iter()
            .enumerate()
            .map(|(index, hole)| (hole.start_on_ring(n), hole.segment_span, index))
            .collect();
        spans.sort_unstable();

        let end = |(start, span, _): (u32, u32, usize)| u64::from(start) + u64::from(span);
        let overlap = |a: usize, b: usize, sector: u32| LayoutError::OverlappingHoles {
            first: a.min(b),
            second: a.max(b),
            sector,
        };
        for pair in spans.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if end(a) > u64::from(b.0) {
                return Err(overlap(a.2, b.2, b.0));
            }
        }
        if let (Some(&first), Some(&last)) = (spans.first(), spans.last()) {
            if first.2 != last.2 && end(last) > u64::from(n) + u64::from(first.0) {
                return Err(overlap(last.2, first.2, first.0));
            }
        }
        Ok(())
    }
}

/// `(start + offset) mod segment_count` without overflowing `u32`.
#[allow(clippy::cast_possible_truncation)]
fn ring_index(start: u32, offset: u32, segment_count: u32) -> u32 {
    ((u64::from(start) + u64::from(offset)) % u64::from(segment_count)) as u32
}
