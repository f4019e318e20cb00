//! Integration tests for formula evaluation semantics (spec §4.3, §8 boundary
//! behaviors).

use engine::{CellValue, FormulaError, Position, Sheet};
use pretty_assertions::assert_eq;

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn reference_to_absent_cell_is_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=Z99+1").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Number(1.0));
}

#[test]
fn reference_to_empty_cell_is_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(1, 0), "=A1").unwrap(); // materializes A1 as Empty
    assert_eq!(sheet.get_value(p(1, 0)).unwrap(), CellValue::Number(0.0));
}

#[test]
fn division_by_zero_literal_is_div0() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=1/0").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Error(FormulaError::Div0));
}

#[test]
fn division_by_an_empty_reference_is_div0() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=1/B1").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Error(FormulaError::Div0));
}

#[test]
fn non_numeric_text_reference_is_value_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(1, 0), "oops").unwrap();
    sheet.set_cell(p(0, 0), "=A2+1").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Error(FormulaError::Value));
}

#[test]
fn numeric_text_reference_coerces_to_a_number() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(1, 0), "42").unwrap();
    sheet.set_cell(p(0, 0), "=A2+1").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Number(43.0));
}

#[test]
fn error_in_a_referenced_formula_propagates() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=1/0").unwrap();
    sheet.set_cell(p(1, 0), "=A1+1").unwrap();
    assert_eq!(sheet.get_value(p(1, 0)).unwrap(), CellValue::Error(FormulaError::Div0));
}

#[test]
fn out_of_range_reference_is_a_parse_time_error_not_a_runtime_one() {
    let mut sheet = Sheet::new();
    assert!(sheet.set_cell(p(0, 0), "=A16385").is_err());
}

#[test]
fn setting_single_equals_sign_yields_a_text_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=").unwrap();
    assert_eq!(sheet.get_text(p(0, 0)).unwrap(), "=");
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), CellValue::Text("=".to_string()));
}
