/*!
# Entity Validators

One validator per CRM table. Each is a pure function of its own table, the
identifier sets of the tables it references and the run configuration. It
returns its findings in row order and, in fix mode, the repairs it wants
applied. Within a row, findings follow a fixed order: identifier, required
fields, enumerations, formats, dates, references, business rules. Duplicate
identifier findings come last, one per duplicated value.
*/

mod activities;
mod clients;
mod deals;
mod leads;
mod organizations;
mod partners;
mod people;
mod products;

use crate::{
    config::ValidatorConfig,
    repair::Repair,
    rules::{self, DateCheck},
    schemas::{EntityKind, DATE_FIELDS, LAST_UPDATED},
    table::{row_number, ReferenceSet, Row, Table},
};
use std::collections::HashMap;

/// Findings and repairs produced by one entity validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityOutcome {
    pub errors: Vec<String>,
    pub repairs: Vec<Repair>,
}

/// Identifier sets of the referenced tables. Tables that were not loaded stay
/// `Unverifiable`.
#[derive(Debug, Clone, Default)]
pub struct References {
    pub organizations: ReferenceSet,
    pub people: ReferenceSet,
    pub products: ReferenceSet,
    pub clients: ReferenceSet,
}

impl References {
    pub fn insert(&mut self, kind: EntityKind, set: ReferenceSet) {
        match kind {
            EntityKind::Organization => self.organizations = set,
            EntityKind::Person => self.people = set,
            EntityKind::Product => self.products = set,
            EntityKind::Client => self.clients = set,
            _ => {}
        }
    }
}

/// Tables whose identifiers `kind` refers to
pub fn referenced_kinds(kind: EntityKind) -> &'static [EntityKind] {
    match kind {
        EntityKind::Organization | EntityKind::Product => &[],
        EntityKind::Person => &[EntityKind::Organization],
        EntityKind::Activity => &[
            EntityKind::Person,
            EntityKind::Organization,
            EntityKind::Product,
        ],
        EntityKind::Lead | EntityKind::Client | EntityKind::Partner => &[
            EntityKind::Organization,
            EntityKind::Product,
            EntityKind::Person,
        ],
        EntityKind::Deal => &[EntityKind::Client],
    }
}

/// Run the validator for `kind`
pub fn validate_entity(
    kind: EntityKind,
    table: &Table,
    refs: &References,
    config: &ValidatorConfig,
) -> EntityOutcome {
    match kind {
        EntityKind::Organization => organizations::validate(table, config),
        EntityKind::Person => people::validate(table, refs, config),
        EntityKind::Product => products::validate(table, config),
        EntityKind::Activity => activities::validate(table, refs, config),
        EntityKind::Lead => leads::validate(table, refs, config),
        EntityKind::Client => clients::validate(table, refs, config),
        EntityKind::Partner => partners::validate(table, refs, config),
        EntityKind::Deal => deals::validate(table, refs, config),
    }
}

// ================================================================================================
// Shared Row Checks
// ================================================================================================

/// Check helpers for one row, appending to the entity's outcome.
pub(crate) struct RowChecker<'a> {
    kind: EntityKind,
    index: usize,
    row: &'a Row,
    config: &'a ValidatorConfig,
    outcome: &'a mut EntityOutcome,
}

impl<'a> RowChecker<'a> {
    pub fn new(
        kind: EntityKind,
        index: usize,
        row: &'a Row,
        config: &'a ValidatorConfig,
        outcome: &'a mut EntityOutcome,
    ) -> Self {
        Self {
            kind,
            index,
            row,
            config,
            outcome,
        }
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    pub fn config(&self) -> &'a ValidatorConfig {
        self.config
    }

    pub fn error(&mut self, message: impl std::fmt::Display) {
        self.outcome
            .errors
            .push(format!("Row {}: {}", row_number(self.index), message));
    }

    /// Identifier present and, where the entity has one, matching its pattern
    pub fn identifier(&mut self) {
        let field = self.kind.id_field();
        match self.row.get(field) {
            None => self.error(format_args!("{} missing", field)),
            Some(value) if !rules::matches_id_pattern(value, self.kind) => {
                let pattern = self.kind.id_pattern().map_or("", |re| re.as_str());
                self.error(format_args!(
                    "{} '{}' does not match expected format {}",
                    field, value, pattern
                ));
            }
            Some(_) => {}
        }
    }

    pub fn required(&mut self, field: &str) -> Option<&'a str> {
        let value = self.row.get(field);
        if !rules::required(value) {
            self.error(format_args!("{} missing", field));
        }
        value
    }

    /// Required `last_updated`. In fix mode on a fixable table, a missing value
    /// becomes a repair instead of a finding.
    pub fn last_updated(&mut self) {
        if rules::required(self.row.get(LAST_UPDATED)) {
            return;
        }
        if self.config.fix && self.kind.supports_timestamp_fix() {
            let today = self.config.today.format(rules::DATE_FORMAT).to_string();
            self.outcome
                .repairs
                .push(Repair::new(self.index, LAST_UPDATED, today));
        } else {
            self.error(format_args!("{} missing", LAST_UPDATED));
        }
    }

    /// Required foreign key. Absence and a dangling value each count as one finding.
    pub fn required_reference(&mut self, field: &str, refs: &ReferenceSet) {
        match self.row.get(field) {
            None => self.error(format_args!("{} missing", field)),
            Some(value) => self.resolve(field, value, refs),
        }
    }

    /// Enumerated value on a field whose presence is checked elsewhere
    pub fn enumerated(&mut self, field: &str, allowed: &[&str]) {
        if let Some(value) = self.row.get(field) {
            if !rules::in_enum(value, allowed) {
                self.error(format_args!("invalid {} '{}'", field, value));
            }
        }
    }

    /// Enumerated value on an optional field, skipped unless enums are strict
    pub fn optional_enumerated(&mut self, field: &str, allowed: &[&str]) {
        if self.config.profile.strict_enums {
            self.enumerated(field, allowed);
        }
    }

    pub fn email(&mut self, field: &str) {
        if let Some(value) = self.row.get(field) {
            if !rules::is_valid_email(value) {
                self.error(format_args!("{} '{}' does not match expected format", field, value));
            }
        }
    }

    /// Every known date field present in the row
    pub fn dates(&mut self) {
        for field in DATE_FIELDS {
            let Some(value) = self.row.get(field) else {
                continue;
            };
            match rules::check_date(value) {
                DateCheck::Valid => {}
                DateCheck::BadFormat => self.error(format_args!(
                    "{} '{}' does not match YYYY-MM-DD format",
                    field, value
                )),
                DateCheck::NotACalendarDate => {
                    self.error(format_args!("{} '{}' is not a valid date", field, value))
                }
            }
        }
    }

    /// Optional foreign key, checked only when present
    pub fn reference(&mut self, field: &str, refs: &ReferenceSet) {
        if let Some(value) = self.row.get(field) {
            self.resolve(field, value, refs);
        }
    }

    fn resolve(&mut self, field: &str, value: &str, refs: &ReferenceSet) {
        if self.config.profile.check_references && refs.is_dangling(value) {
            self.error(format_args!("{} '{}' not found", field, value));
        }
    }
}

/// Run `check` over every row, then append duplicate identifier findings
pub(crate) fn validate_rows<F>(
    kind: EntityKind,
    table: &Table,
    config: &ValidatorConfig,
    mut check: F,
) -> EntityOutcome
where
    F: FnMut(&mut RowChecker<'_>),
{
    let mut outcome = EntityOutcome::default();

    for (index, row) in table.rows.iter().enumerate() {
        let mut checker = RowChecker::new(kind, index, row, config, &mut outcome);
        check(&mut checker);
    }

    let id_field = kind.id_field();
    for id in duplicate_values(table, id_field) {
        outcome
            .errors
            .push(format!("Duplicate {}: {}", id_field, id));
    }

    outcome
}

/// Values of `field` that occur in more than one row, in order of first appearance
pub fn duplicate_values<'t>(table: &'t Table, field: &str) -> Vec<&'t str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for value in table.rows.iter().filter_map(|row| row.get(field)) {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    order.into_iter().filter(|v| counts[v] > 1).collect()
}
