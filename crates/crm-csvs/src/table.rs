/*!
# Table Store

Loads CRM tables from the fixed directory layout into ordered rows and writes
them back after repairs. A missing file is [`TableLoad::Missing`]; a zero-byte
or header-only file is a loaded table with no rows.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::EntityKind,
};
use csv::{ReaderBuilder, Writer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Data rows start on line 2 of the file, after the header.
pub const HEADER_OFFSET: usize = 2;

// ================================================================================================
// Rows and Tables
// ================================================================================================

/// A single data row, keyed by column name. Cells that were not present in the
/// file (short rows) are simply absent. Cells under a blank header are kept by
/// column position, and fields past the end of the header are kept as overflow,
/// so nothing read is lost on a rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, String>,
    unnamed: BTreeMap<usize, String>,
    overflow: Vec<String>,
}

impl Row {
    /// Build a row from `(field, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Trimmed value of `field`, or `None` when the cell is absent or blank
    pub fn get(&self, field: &str) -> Option<&str> {
        self.cells
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Untrimmed cell content, exactly as read
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.cells.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.cells.insert(field.to_string(), value.into());
    }

    /// Cell in a column whose header is blank
    pub fn unnamed(&self, column: usize) -> Option<&str> {
        self.unnamed.get(&column).map(String::as_str)
    }

    /// Fields beyond the last header column
    pub fn overflow(&self) -> &[String] {
        &self.overflow
    }
}

/// An ordered table: header columns plus data rows in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.headers.iter().any(|h| h == field)
    }

    /// Ensure `field` is a column, appending it to the header if needed
    pub fn ensure_column(&mut self, field: &str) {
        if !self.has_column(field) {
            self.headers.push(field.to_string());
        }
    }

    /// Rows paired with the line number used in messages
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row_number(i), row))
    }
}

/// Line number of the data row at `index`
pub fn row_number(index: usize) -> usize {
    index + HEADER_OFFSET
}

// ================================================================================================
// Optional Tables and Reference Sets
// ================================================================================================

/// Result of looking up a table on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLoad {
    Missing,
    Loaded(Table),
}

impl TableLoad {
    pub fn table(&self) -> Option<&Table> {
        match self {
            TableLoad::Missing => None,
            TableLoad::Loaded(table) => Some(table),
        }
    }
}

/// Identifiers that a foreign key may point at.
///
/// `Unverifiable` means the referenced table is missing, empty, unreadable or
/// lacks its identifier column. Reference checks against it always pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReferenceSet {
    #[default]
    Unverifiable,
    Known(HashSet<String>),
}

impl ReferenceSet {
    pub fn from_table(load: &TableLoad, id_field: &str) -> Self {
        match load.table() {
            Some(table) if !table.is_empty() && table.has_column(id_field) => ReferenceSet::Known(
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(id_field))
                    .map(str::to_string)
                    .collect(),
            ),
            _ => ReferenceSet::Unverifiable,
        }
    }

    /// True only when the set is known and does not contain `value`
    pub fn is_dangling(&self, value: &str) -> bool {
        match self {
            ReferenceSet::Unverifiable => false,
            ReferenceSet::Known(ids) => !ids.contains(value),
        }
    }
}

// ================================================================================================
// CSV Reading & Writing
// ================================================================================================

/// Read a table from any reader
pub fn read_table<R: Read>(reader: R) -> CsvResult<Table> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut seen = HashSet::new();
    for header in &headers {
        if !header.is_empty() && !seen.insert(header.as_str()) {
            return Err(CsvError::InvalidFormat(format!(
                "duplicate column '{}'",
                header
            )));
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = Row::default();
        for (column, value) in record.iter().enumerate() {
            match headers.get(column) {
                Some(header) if !header.is_empty() => row.set(header, value),
                Some(_) => {
                    row.unnamed.insert(column, value.to_string());
                }
                None => row.overflow.push(value.to_string()),
            }
        }
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

/// Write a table to a CSV file, header first, columns in header order.
///
/// Tables with rows longer than the header are refused before the file is
/// touched: their extra fields have no column to be written back under.
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> CsvResult<()> {
    if let Some((index, row)) = table
        .rows
        .iter()
        .enumerate()
        .find(|(_, row)| !row.overflow.is_empty())
    {
        return Err(CsvError::InvalidFormat(format!(
            "row {} has {} field(s) beyond the header",
            row_number(index),
            row.overflow.len()
        )));
    }

    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    if !table.headers.is_empty() {
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(table.headers.iter().enumerate().map(|(column, header)| {
                if header.is_empty() {
                    row.unnamed(column).unwrap_or("")
                } else {
                    row.raw(header).unwrap_or("")
                }
            }))?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// The CRM tables under one root directory.
#[derive(Debug, Clone)]
pub struct TableStore {
    root: PathBuf,
}

impl TableStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, kind: EntityKind) -> PathBuf {
        kind.path_under(&self.root)
    }

    /// Load a table fresh from disk
    pub fn load(&self, kind: EntityKind) -> CsvResult<TableLoad> {
        let path = self.path(kind);
        if !path.exists() {
            debug!("{} not present at {}", kind, path.display());
            return Ok(TableLoad::Missing);
        }

        let table = read_table(File::open(&path)?)?;
        debug!("Loaded {} rows from {}", table.rows.len(), path.display());
        Ok(TableLoad::Loaded(table))
    }

    /// Identifiers of `kind`, or `Unverifiable` if they cannot be read
    pub fn reference_set(&self, kind: EntityKind) -> CsvResult<ReferenceSet> {
        let load = self.load(kind)?;
        Ok(ReferenceSet::from_table(&load, kind.id_field()))
    }

    /// Rewrite a table in place
    pub fn save(&self, kind: EntityKind, table: &Table) -> CsvResult<()> {
        let path = self.path(kind);
        write_table(&path, table)?;
        debug!("Wrote {} rows to {}", table.rows.len(), path.display());
        Ok(())
    }
}

// ================================================================================================
// Tests
// ================================================================================================
