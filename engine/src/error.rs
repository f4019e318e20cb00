//! FILENAME: engine/src/error.rs
//! PURPOSE: Crate-level error types for the `Sheet` facade.
//! CONTEXT: One crate-level error enum composing narrower ones via
//! `#[from]`: `SetCellError` is the single error type `Sheet::set_cell`
//! returns so callers match one type instead of juggling
//! `InvalidPositionError`/`parser::ParseError`/`CircularDependencyError`
//! separately.

use crate::dependency_graph::CircularDependencyError;
use parser::{ParseError, Position};
use thiserror::Error;

/// Any public `Sheet` operation was given a `Position` outside the valid
/// `0..16384` row/column range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("position {0:?} is out of the valid 16384x16384 range")]
pub struct InvalidPositionError(pub Position);

/// The composed error `Sheet::set_cell` returns.
#[derive(Debug, Error)]
pub enum SetCellError {
    #[error(transparent)]
    InvalidPosition(#[from] InvalidPositionError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    CircularDependency(#[from] CircularDependencyError),
}
