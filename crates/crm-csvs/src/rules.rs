//! Stateless field rules shared by every entity validator.

use crate::schemas::{EntityKind, INJECTION_CHARS, TEXT_FIELDS};
use crate::table::Table;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Present and non-blank
pub fn required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Full-string match against the entity's identifier pattern. Entities
/// without a pattern accept any identifier.
pub fn matches_id_pattern(value: &str, kind: EntityKind) -> bool {
    kind.id_pattern().map_or(true, |re| re.is_match(value))
}

/// Outcome of checking a date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCheck {
    Valid,
    /// Not shaped like `YYYY-MM-DD`
    BadFormat,
    /// Well shaped but not on the calendar, e.g. `2024-04-31`
    NotACalendarDate,
}

pub fn check_date(value: &str) -> DateCheck {
    if !DATE_RE.is_match(value) {
        DateCheck::BadFormat
    } else if NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
        DateCheck::NotACalendarDate
    } else {
        DateCheck::Valid
    }
}

pub fn is_valid_date(value: &str) -> bool {
    check_date(value) == DateCheck::Valid
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Case-insensitive membership after trimming
pub fn in_enum(value: &str, allowed: &[&str]) -> bool {
    let value = value.trim();
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}

// ================================================================================================
// Formula Injection
// ================================================================================================

/// A free-text cell whose first character a spreadsheet could treat as a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionFinding {
    pub table: String,
    pub row: usize,
    pub field: String,
    pub character: char,
}

impl fmt::Display for InjectionFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {}: '{}' starts with '{}' (possible CSV formula injection)",
            self.table,
            self.row,
            self.field,
            self.character.escape_default()
        )
    }
}

/// First character of `value` if it opens a formula. Only spaces are skipped,
/// so a leading tab or carriage return is itself reported.
pub fn injection_lead(value: &str) -> Option<char> {
    value
        .trim_start_matches(' ')
        .chars()
        .next()
        .filter(|c| INJECTION_CHARS.contains(c))
}

/// Scan every free-text column of `table`, column by column in header order
pub fn injection_scan(table_name: &str, table: &Table) -> Vec<InjectionFinding> {
    let mut findings = Vec::new();

    for field in table.headers.iter().filter(|h| TEXT_FIELDS.contains(&h.as_str())) {
        for (row_num, row) in table.numbered_rows() {
            let Some(value) = row.raw(field) else {
                continue;
            };
            if let Some(character) = injection_lead(value) {
                findings.push(InjectionFinding {
                    table: table_name.to_string(),
                    row: row_num,
                    field: field.clone(),
                    character,
                });
            }
        }
    }

    findings
}

// ================================================================================================
// Tests
// ================================================================================================
