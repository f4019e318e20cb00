//! FILENAME: engine/src/sheet.rs
//! PURPOSE: The public facade — owns the cell table and the dependency
//! graph, exposes set/get/clear, and tracks the printable bounding box.
//! CONTEXT: This is the only type users of the crate construct directly.
//! It coordinates `Cell::classify` and `DependencyGraph::update_cell` so
//! that a rejected edit (parse failure or cycle) leaves the table exactly
//! as it was — every public operation either fully commits or leaves no
//! observable trace.

use crate::cell::{Cell, CellValue, FormulaError};
use crate::dependency_graph::DependencyGraph;
use crate::error::{InvalidPositionError, SetCellError};
use crate::evaluator::CellLookup;
use log::{debug, warn};
use parser::{Position, Size};
use std::collections::HashMap;
use std::fmt;

/// An in-memory spreadsheet: a sparse table of cells plus the dependency
/// graph that keeps their formula caches consistent.
#[derive(Default)]
pub struct Sheet {
    table: HashMap<Position, Cell>,
    graph: DependencyGraph,
    max_row: i32,
    max_col: i32,
    has_content: bool,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    /// Sets the text at `pos`. A no-op if the cell's current text already
    /// equals `text`. Classifies and parses the new text, then asks the
    /// graph to accept the resulting reference set before committing
    /// anything — a parse failure or rejected cycle leaves the sheet
    /// unchanged.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), SetCellError> {
        self.check_valid(pos)?;

        let existing_text = self.table.get(&pos).map(Cell::text).unwrap_or_default();
        if existing_text == text {
            return Ok(());
        }

        let new_cell = Cell::classify(text)?;
        let new_refs = new_cell.referenced_cells().to_vec();

        let purge_list = self.graph.update_cell(pos, &new_refs).map_err(|e| {
            warn!("rejected formula at {pos}: {e}");
            e
        })?;

        debug!("set_cell {pos}: {} reference(s), {} cache(s) to purge", new_refs.len(), purge_list.len());

        self.table.insert(pos, new_cell);
        for q in &new_refs {
            self.table.entry(*q).or_insert(Cell::Empty);
        }

        for q in &purge_list {
            if let Some(cell) = self.table.get(q) {
                cell.purge_cache();
            }
        }

        self.recompute_printable_size();
        Ok(())
    }

    /// Returns the cell stored at `pos`, or `None` if nothing was ever set
    /// (or materialized as a placeholder) there.
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>, InvalidPositionError> {
        self.check_valid(pos)?;
        Ok(self.table.get(&pos))
    }

    /// The cell's value: `""` for an absent or Empty cell, the text
    /// (leading apostrophe stripped) for Text, the (cached) evaluation for
    /// Formula.
    pub fn get_value(&self, pos: Position) -> Result<CellValue, InvalidPositionError> {
        self.check_valid(pos)?;
        Ok(match self.table.get(&pos) {
            Some(cell) => cell.value(self),
            None => CellValue::Text(String::new()),
        })
    }

    /// The cell's stored text, `""` if absent or Empty.
    pub fn get_text(&self, pos: Position) -> Result<String, InvalidPositionError> {
        self.check_valid(pos)?;
        Ok(self.table.get(&pos).map(Cell::text).unwrap_or_default())
    }

    /// Removes the cell at `pos`. A no-op if nothing is stored there.
    /// Dependants of `pos` keep their registered edge against it — a later
    /// `set_cell` at the same position still triggers their invalidation —
    /// so only `pos`'s own out-edges are cleared here.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), InvalidPositionError> {
        self.check_valid(pos)?;
        if !self.table.contains_key(&pos) {
            return Ok(());
        }

        let purge_list = self
            .graph
            .update_cell(pos, &[])
            .expect("clearing a cell's own references cannot introduce a cycle");

        self.table.remove(&pos);
        for q in &purge_list {
            if let Some(cell) = self.table.get(q) {
                cell.purge_cache();
            }
        }

        self.recompute_printable_size();
        debug!("clear_cell {pos}");
        Ok(())
    }

    /// The minimal bounding box over cells with non-empty text; `(0, 0)` if
    /// none exist.
    pub fn printable_size(&self) -> Size {
        if self.has_content {
            Size::new(self.max_row + 1, self.max_col + 1)
        } else {
            Size::new(0, 0)
        }
    }

    /// Writes `GetValue()` for every cell in the printable box, row-major,
    /// tab-separated, each row terminated by `\n`.
    pub fn print_values<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        self.print_rows(sink, |pos| {
            self.table
                .get(&pos)
                .map(|cell| cell.value(self).to_string())
                .unwrap_or_default()
        })
    }

    /// Writes `GetText()` for every cell in the printable box, row-major,
    /// tab-separated, each row terminated by `\n`.
    pub fn print_texts<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        self.print_rows(sink, |pos| {
            self.table.get(&pos).map(Cell::text).unwrap_or_default()
        })
    }

    fn print_rows<W: fmt::Write>(
        &self,
        sink: &mut W,
        mut field: impl FnMut(Position) -> String,
    ) -> fmt::Result {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    write!(sink, "\t")?;
                }
                write!(sink, "{}", field(Position::new(row, col)))?;
            }
            writeln!(sink)?;
        }
        Ok(())
    }

    fn check_valid(&self, pos: Position) -> Result<(), InvalidPositionError> {
        if pos.is_valid() {
            Ok(())
        } else {
            Err(InvalidPositionError(pos))
        }
    }

    /// Rescans the table for the bounding box of non-empty-text cells.
    /// Run after every mutation rather than incrementally extended/shrunk,
    /// since a clear (or an overwrite to empty text) can shrink the box in
    /// a way a pure extension cannot express.
    fn recompute_printable_size(&mut self) {
        let mut max_row = 0;
        let mut max_col = 0;
        let mut has_content = false;

        for (pos, cell) in &self.table {
            if !cell.text().is_empty() {
                has_content = true;
                max_row = max_row.max(pos.row);
                max_col = max_col.max(pos.col);
            }
        }

        self.max_row = max_row;
        self.max_col = max_col;
        self.has_content = has_content;
    }
}

impl CellLookup for Sheet {
    fn resolve(&self, pos: Position) -> Result<f64, FormulaError> {
        match self.table.get(&pos) {
            None | Some(Cell::Empty) => Ok(0.0),
            Some(Cell::Text(text)) => {
                let stripped = text.strip_prefix('\'').unwrap_or(text);
                stripped
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or(FormulaError::Value)
            }
            Some(formula @ Cell::Formula { .. }) => match formula.value(self) {
                CellValue::Number(n) => Ok(n),
                CellValue::Error(e) => Err(e),
                CellValue::Text(_) => unreachable!("formula cells never evaluate to text"),
            },
        }
    }
}
