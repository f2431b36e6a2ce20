use super::{validate_rows, EntityOutcome, References};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, PARTNERSHIP_TYPES, PARTNER_STATUSES},
    table::Table,
};

pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Partner, table, config, |check| {
        check.identifier();
        check.required_reference("company_id", &refs.organizations);
        check.required_reference("product_id", &refs.products);
        check.required("partnership_type");
        check.required("status");
        check.required("created_date");
        check.last_updated();

        check.enumerated("partnership_type", PARTNERSHIP_TYPES);
        check.enumerated("status", PARTNER_STATUSES);

        check.dates();

        check.reference("primary_contact_id", &refs.people);
    })
}
