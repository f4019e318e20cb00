//! FILENAME: engine/src/cell.rs
//! PURPOSE: The polymorphic cell body — Empty / Text / Formula — and the
//! value types a cell can hold or produce.
//! CONTEXT: A `Cell` never touches the `Sheet`/`DependencyGraph` directly;
//! evaluation and cache population take the lookup context as an explicit
//! parameter instead of a stored back-reference, so ownership stays with the
//! `Sheet` that holds the cell table.

use crate::evaluator::{self, CellLookup};
use parser::{format_number, Expression, ParseError, Position};
use std::cell::RefCell;
use std::fmt;

/// The three categories of in-band formula evaluation error. Unlike
/// `ParseError`/`CircularDependencyError`, this is never raised as an
/// exception — it is returned as a cell's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FormulaError {
    /// An invalid or out-of-range cell reference.
    Ref,
    /// An operand did not resolve to a number.
    Value,
    /// Division by zero, or any non-finite (±∞/NaN) arithmetic result.
    Div0,
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Div0 => "#DIV/0!",
        };
        write!(f, "{s}")
    }
}

/// A cell's computed or stored value: exactly one of text, a finite number,
/// or a formula error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// The body of a spreadsheet cell, classified from its set text.
///
/// A tagged variant with fixed, disjoint membership is preferred here over
/// an abstract-base hierarchy: there are exactly three shapes and dispatch
/// is a plain match.
pub enum Cell {
    Empty,
    Text(String),
    Formula {
        expr: Expression,
        canonical: String,
        refs: Vec<Position>,
        cache: RefCell<Option<CellValue>>,
    },
}

impl Cell {
    /// Classifies raw input text into a `Cell` variant, parsing it as a
    /// formula when it begins with `=` and has more than one character.
    /// Performs no graph interaction — callers (the `Sheet`) are
    /// responsible for validating the resulting references against the
    /// `DependencyGraph` before committing this cell to the table.
    pub fn classify(text: &str) -> Result<Cell, ParseError> {
        if text.is_empty() {
            return Ok(Cell::Empty);
        }
        if text == "=" {
            return Ok(Cell::Text(text.to_string()));
        }
        if let Some(source) = text.strip_prefix('=') {
            let expr = parser::parse(source)?;
            let canonical = expr.to_canonical_string();
            let refs = expr.referenced_cells();
            return Ok(Cell::Formula {
                expr,
                canonical,
                refs,
                cache: RefCell::new(None),
            });
        }
        Ok(Cell::Text(text.to_string()))
    }

    /// The stored text, verbatim for Empty/Text, or `=` + canonical
    /// re-serialization for Formula.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Formula { canonical, .. } => format!("={canonical}"),
        }
    }

    /// The cell's value: evaluates and caches on first read for Formula
    /// cells, returns the memoized value afterward until purged.
    pub fn value(&self, lookup: &impl CellLookup) -> CellValue {
        match self {
            Cell::Empty => CellValue::Text(String::new()),
            Cell::Text(s) => CellValue::Text(strip_leading_apostrophe(s)),
            Cell::Formula { expr, cache, .. } => {
                if let Some(cached) = cache.borrow().as_ref() {
                    return cached.clone();
                }
                let value = match evaluator::evaluate(expr, lookup) {
                    Ok(n) => CellValue::Number(n),
                    Err(e) => CellValue::Error(e),
                };
                *cache.borrow_mut() = Some(value.clone());
                value
            }
        }
    }

    /// Positions this cell's formula reads, in first-appearance order;
    /// empty for non-formula cells.
    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            Cell::Formula { refs, .. } => refs,
            _ => &[],
        }
    }

    /// Drops the memoized formula value, if any. A no-op for Empty/Text.
    pub fn purge_cache(&self) {
        if let Cell::Formula { cache, .. } = self {
            *cache.borrow_mut() = None;
        }
    }
}

fn strip_leading_apostrophe(s: &str) -> String {
    match s.strip_prefix('\'') {
        Some(rest) => rest.to_string(),
        None => s.to_string(),
    }
}
