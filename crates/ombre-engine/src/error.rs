use std::fmt;

/// Errors produced while validating or rendering a gradient.
///
/// An empty raster is not an error; [`render`](crate::raster::render) reports
/// it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientError {
    /// The descriptor violates a structural precondition (empty color list,
    /// location count not matching color count, non-finite input).
    InvalidDescriptor { reason: String },
    /// The pixel buffer for a `width × height` raster could not be allocated.
    Allocation { width: u32, height: u32 },
    /// A dedicated worker pool for row-parallel shading could not be built.
    ThreadPool(String),
}

impl GradientError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor { reason: reason.into() }
    }
}

impl fmt::Display for GradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDescriptor { reason } => write!(f, "invalid gradient descriptor: {reason}"),
            Self::Allocation { width, height } => {
                write!(f, "cannot allocate a {width}x{height} pixel buffer")
            }
            Self::ThreadPool(msg) => write!(f, "failed to build render thread pool: {msg}"),
        }
    }
}

impl std::error::Error for GradientError {}
