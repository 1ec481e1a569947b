use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Unrecognized direction {0:?}")]
    InvalidDirection(String),
}
