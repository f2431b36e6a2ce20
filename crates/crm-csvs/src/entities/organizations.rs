use super::{validate_rows, EntityOutcome};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, COMPANY_SIZES, COMPANY_TYPES},
    table::Table,
};

pub(super) fn validate(table: &Table, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Organization, table, config, |check| {
        check.identifier();
        check.required("name");
        check.last_updated();

        check.optional_enumerated("type", COMPANY_TYPES);
        check.optional_enumerated("size", COMPANY_SIZES);

        check.dates();
    })
}
