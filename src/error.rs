use thiserror::Error;

/// Rejected wall data. Raised only while the wall set is being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidGeometry {
    #[error("corner tuples must all have the same arity (2, 3 or 4), got {arities:?}")]
    ArityMismatch { arities: [usize; 4] },
    #[error("corners must be supplied in clockwise order")]
    NotClockwise,
    #[error("corners of arity {arity} need a shared height (flat top or bottom/top pair)")]
    MissingHeight { arity: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("wall #{index} in layout is invalid: {source}")]
pub struct LayoutError {
    pub index: usize,
    #[source]
    pub source: InvalidGeometry,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Parse { var: &'static str, value: String },
    #[error("{var}: {value:?} is out of range")]
    OutOfRange { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[source] winit::error::OsError),
    #[error("softbuffer: {0}")]
    Surface(#[source] softbuffer::SoftBufferError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] winit::error::EventLoopError),
}
