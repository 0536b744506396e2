use thiserror::Error;

/// Top-level error type for platform mesh generation.
#[derive(Debug, Error)]
pub enum PlatemeshError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised by out-of-range platform parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("segment count {0} is below the minimum of 3")]
    TooFewSegments(u32),

    #[error("platform radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("platform height must be positive, got {0}")]
    NonPositiveHeight(f32),

    #[error("hole {index} removes no segments")]
    EmptyHole { index: usize },
}

/// Errors raised by hole layouts that cannot be cut into the sector ring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("holes {first} and {second} both remove sector {sector}")]
    OverlappingHoles {
        first: usize,
        second: usize,
        sector: u32,
    },

    #[error("hole {index} spans {span} segments but the ring only has {segment_count}")]
    HoleExceedsRing {
        index: usize,
        span: u32,
        segment_count: u32,
    },
}

/// Errors related to tessellation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TessellationError {
    #[error("mesh needs {0} vertices, more than a u32 index can address")]
    IndexOverflow(u64),
}

/// Convenience type alias for results using [`PlatemeshError`].
pub type Result<T> = std::result::Result<T, PlatemeshError>;
