//! FILENAME: parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. `engine`'s evaluator then
//! traverses this tree against a sheet to compute a result; this crate only
//! knows how to parse and re-print it.
//!
//! SUPPORTED EXPRESSIONS:
//! - Numeric literals (decimal, optional fractional part)
//! - Cell references in A1 form: A1, AA100, …
//! - Binary operations: +, -, *, /
//! - Unary operations: +, - (negation)
//! - Parenthesized sub-expressions

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// A parsed formula expression tree.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Expression {
    Number(f64),
    CellRef(Position),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

/// Binary arithmetic operators, in precedence order (lowest first).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Unary arithmetic operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl BinaryOperator {
    /// Higher binds tighter. `* /` bind tighter than `+ -`.
    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl UnaryOperator {
    fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Negate => '-',
        }
    }
}

impl Expression {
    /// Returns the positions this expression (and its sub-expressions)
    /// reference, in order of first appearance in the source text, without
    /// duplicates.
    pub fn referenced_cells(&self) -> Vec<Position> {
        let mut out = Vec::new();
        self.collect_refs(&mut out);
        out
    }

    fn collect_refs(&self, out: &mut Vec<Position>) {
        match self {
            Expression::Number(_) => {}
            Expression::CellRef(pos) => {
                if !out.contains(pos) {
                    out.push(*pos);
                }
            }
            Expression::Unary { operand, .. } => operand.collect_refs(out),
            Expression::Binary { left, right, .. } => {
                left.collect_refs(out);
                right.collect_refs(out);
            }
        }
    }

    /// Re-serializes the tree to a canonical string: no superfluous
    /// whitespace, parentheses only where precedence/associativity require
    /// them, numbers in their shortest round-trip form.
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Expression::Number(n) => out.push_str(&format_number(*n)),
            Expression::CellRef(pos) => out.push_str(&pos.to_a1()),
            Expression::Unary { op, operand } => {
                out.push(op.symbol());
                // Unary binds to a single primary: any binary child must be
                // parenthesized, or `-1+2` would re-parse as `(-1)+2` instead
                // of `-(1+2)`.
                let needs_parens = matches!(**operand, Expression::Binary { .. });
                Self::write_operand(operand, out, needs_parens);
            }
            Expression::Binary { op, left, right } => {
                // Left-associative: the left child only needs parens if it
                // binds more loosely than this operator.
                let left_needs_parens = match &**left {
                    Expression::Binary { op: lop, .. } => lop.precedence() < op.precedence(),
                    _ => false,
                };
                Self::write_operand(left, out, left_needs_parens);
                out.push(op.symbol());
                // The right child needs parens if it binds more loosely OR
                // equally (equal precedence on the right changes grouping
                // under left-associativity: `1-(2-3) != 1-2-3`).
                let right_needs_parens = match &**right {
                    Expression::Binary { op: rop, .. } => rop.precedence() <= op.precedence(),
                    _ => false,
                };
                Self::write_operand(right, out, right_needs_parens);
            }
        }
    }

    fn write_operand(operand: &Expression, out: &mut String, needs_parens: bool) {
        if needs_parens {
            out.push('(');
            operand.write_canonical(out);
            out.push(')');
        } else {
            operand.write_canonical(out);
        }
    }
}

/// Formats an `f64` in its shortest round-trip decimal form, matching what
/// the lexer would re-parse back to the same value. Shared with `engine`'s
/// `CellValue` display so a formula's numeric result prints the same way a
/// literal in its own source text would.
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}
