//! Integration tests for `Sheet`'s set/get/clear lifecycle and printable
//! bounding box (spec §4.6, §8 invariant 3, scenario S2).

use engine::{CellValue, Position, Sheet, Size};
use pretty_assertions::assert_eq;

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn printable_size_is_zero_for_an_empty_sheet() {
    let sheet = Sheet::new();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn scenario_s2_print_and_shrink_on_clear() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(1, 0), "meow").unwrap();
    sheet.set_cell(p(1, 1), "=1+2").unwrap();
    sheet.set_cell(p(0, 0), "=1/0").unwrap();

    assert_eq!(sheet.printable_size(), Size::new(2, 2));

    let mut texts = String::new();
    sheet.print_texts(&mut texts).unwrap();
    assert_eq!(texts, "=1/0\t\nmeow\t=1+2\n");

    let mut values = String::new();
    sheet.print_values(&mut values).unwrap();
    assert_eq!(values, "#DIV/0!\t\nmeow\t3\n");

    sheet.clear_cell(p(1, 1)).unwrap();
    assert_eq!(sheet.printable_size(), Size::new(2, 1));
}

#[test]
fn materialized_placeholders_do_not_extend_printable_size() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=Z1000").unwrap();
    // Z1000 is materialized as an Empty placeholder; it must not extend the
    // bounding box past A1's own row/col.
    assert_eq!(sheet.printable_size(), Size::new(1, 1));
}

#[test]
fn clearing_an_absent_cell_is_a_no_op() {
    let mut sheet = Sheet::new();
    assert!(sheet.clear_cell(p(10, 10)).is_ok());
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn law_inverse_set_then_clear_restores_prior_observable_state() {
    let mut sheet = Sheet::new();
    assert_eq!(sheet.printable_size(), Size::new(0, 0));

    sheet.set_cell(p(4, 4), "hello").unwrap();
    sheet.clear_cell(p(4, 4)).unwrap();

    assert!(sheet.get_cell(p(4, 4)).unwrap().is_none());
    assert_eq!(sheet.printable_size(), Size::new(0, 0));
}

#[test]
fn law_idempotence_of_set_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "=1+2").unwrap();
    let first = sheet.get_value(p(0, 0)).unwrap();
    sheet.set_cell(p(0, 0), "=1+2").unwrap();
    assert_eq!(sheet.get_value(p(0, 0)).unwrap(), first);
}

#[test]
fn clearing_a_cell_others_depend_on_leaves_them_reading_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(p(0, 0), "5").unwrap();
    sheet.set_cell(p(1, 0), "=A1+1").unwrap();
    assert_eq!(sheet.get_value(p(1, 0)).unwrap(), CellValue::Number(6.0));

    sheet.clear_cell(p(0, 0)).unwrap();
    assert_eq!(sheet.get_value(p(1, 0)).unwrap(), CellValue::Number(1.0));

    // Re-populating A1 must still invalidate B1's cache.
    sheet.set_cell(p(0, 0), "100").unwrap();
    assert_eq!(sheet.get_value(p(1, 0)).unwrap(), CellValue::Number(101.0));
}
