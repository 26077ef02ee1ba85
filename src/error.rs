use thiserror::Error;

/// Top-level error type for the tour application.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no chapter is mounted at `{0}`")]
    UnknownRoute(String),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("GPU setup failed: {0}")]
    Gpu(String),
}

/// Errors raised while tessellating a parametric surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("surface needs at least {min} segments along {axis}, got {got}")]
    TooFewSegments {
        axis: &'static str,
        got: usize,
        min: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
