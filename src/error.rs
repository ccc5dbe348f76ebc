use thiserror::Error;

/// Top-level error type for the Pathlis geometry kernel.
#[derive(Debug, Error)]
pub enum PathlisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Errors related to geometric representation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid bezier curve at point {index}: missing control point")]
    InvalidBezier { index: usize },
}

/// Errors related to the segment structure of a path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("path must start with a move segment")]
    MissingMove,

    #[error("segment {index} follows a close segment but is not a move")]
    SegmentAfterClose { index: usize },
}

/// Convenience type alias for results using [`PathlisError`].
pub type Result<T> = std::result::Result<T, PathlisError>;
