use super::{validate_rows, EntityOutcome, References};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, CLIENT_STATUSES},
    table::Table,
};

pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Client, table, config, |check| {
        check.identifier();
        check.required_reference("company_id", &refs.organizations);
        check.required_reference("product_id", &refs.products);
        check.required("status");
        check.required("created_date");
        check.last_updated();

        check.enumerated("status", CLIENT_STATUSES);

        check.dates();

        check.reference("primary_contact_id", &refs.people);
    })
}
