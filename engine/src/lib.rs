//! FILENAME: engine/src/lib.rs
//! PURPOSE: Calcula's in-memory calculation core — dependency graph, cell
//! model, formula evaluator, and the `Sheet` facade that ties them together.
//! CONTEXT: Depends on `parser` for `Position`/`Expression`; has no
//! persistence, UI, or multi-sheet workbook layer — those live (or would
//! live) in separate crates above this one.

mod cell;
mod dependency_graph;
mod error;
mod evaluator;
mod sheet;

pub use cell::{Cell, CellValue, FormulaError};
pub use dependency_graph::{CircularDependencyError, DependencyGraph};
pub use error::{InvalidPositionError, SetCellError};
pub use evaluator::CellLookup;
pub use sheet::Sheet;

pub use parser::{Position, Size};
