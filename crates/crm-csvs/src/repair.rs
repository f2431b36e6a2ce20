//! Repair instructions collected during a read-only validation pass and
//! applied to a table in one batch before it is written back.

use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// Zero-based index into `Table::rows`
    pub row_index: usize,
    pub field: String,
    pub value: String,
}

impl Repair {
    pub fn new(row_index: usize, field: &str, value: impl Into<String>) -> Self {
        Self {
            row_index,
            field: field.to_string(),
            value: value.into(),
        }
    }
}

/// Apply every repair to `table`, adding missing columns to the header.
/// Returns the number of repairs that landed on an existing row.
pub fn apply_repairs(table: &mut Table, repairs: &[Repair]) -> usize {
    let mut applied = 0;
    for repair in repairs {
        table.ensure_column(&repair.field);
        if let Some(row) = table.rows.get_mut(repair.row_index) {
            row.set(&repair.field, repair.value.clone());
            applied += 1;
        }
    }
    applied
}
