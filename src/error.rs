//! Error types for maze generation and search.

use grid_util::point::Point;
use thiserror::Error;

/// Failure conditions of the generator and the solvers. An unreachable goal is not one of them:
/// searches report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("invalid dimensions {width}x{height}: both sides must be at least 2")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{point} lies outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("exit not reachable from entry after {attempts} attempts")]
    Unsolvable { attempts: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
