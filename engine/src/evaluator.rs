//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Walks a parsed `Expression` tree against a sheet, producing a
//! number or a structured `FormulaError`.
//! CONTEXT: Cell references are resolved through the `CellLookup` trait
//! rather than a stored back-reference to the owning `Sheet` — `Sheet`
//! implements it directly, so evaluation recurses `Sheet -> Cell ->
//! evaluator -> Sheet` without any cell holding a pointer back to its table.

use crate::cell::FormulaError;
use parser::{BinaryOperator, Expression, Position, UnaryOperator};

/// Resolves a cell reference to the number an arithmetic operand should see:
/// `0.0` for an absent or Empty cell, the parsed value for a Text cell whose
/// text is a finite decimal number (a `Value` error otherwise), or the
/// recursively evaluated result for a Formula cell.
pub trait CellLookup {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError>;
}

/// Evaluates `expr` against `lookup`, following spec's per-node semantics:
/// literals evaluate to themselves; references resolve through `lookup`;
/// errors propagate left-to-right, first error in post-order wins; any
/// non-finite (±∞/NaN) arithmetic result reports `Div0`.
pub fn evaluate(expr: &Expression, lookup: &impl CellLookup) -> Result<f64, FormulaError> {
    match expr {
        Expression::Number(n) => Ok(*n),

        Expression::CellRef(pos) => {
            if !pos.is_valid() {
                return Err(FormulaError::Ref);
            }
            lookup.resolve(*pos)
        }

        Expression::Unary { op, operand } => {
            let value = evaluate(operand, lookup)?;
            let result = match op {
                UnaryOperator::Plus => value,
                UnaryOperator::Negate => -value,
            };
            check_finite(result)
        }

        Expression::Binary { op, left, right } => {
            let left_value = evaluate(left, lookup)?;
            let right_value = evaluate(right, lookup)?;

            if matches!(op, BinaryOperator::Divide) && right_value == 0.0 {
                return Err(FormulaError::Div0);
            }

            let result = match op {
                BinaryOperator::Add => left_value + right_value,
                BinaryOperator::Subtract => left_value - right_value,
                BinaryOperator::Multiply => left_value * right_value,
                BinaryOperator::Divide => left_value / right_value,
            };
            check_finite(result)
        }
    }
}

fn check_finite(n: f64) -> Result<f64, FormulaError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::Div0)
    }
}
