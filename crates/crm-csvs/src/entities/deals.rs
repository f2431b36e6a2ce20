use super::{validate_rows, EntityOutcome, References};
use crate::{
    config::ValidatorConfig,
    rules,
    schemas::{EntityKind, CURRENCIES, DEAL_STAGES},
    table::Table,
};

pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Deal, table, config, |check| {
        check.identifier();
        check.required_reference("client_id", &refs.clients);
        check.required("name");
        check.required("value");
        check.required("currency");
        let stage = check.required("stage");
        check.required("created_date");

        check.enumerated("currency", CURRENCIES);
        check.enumerated("stage", DEAL_STAGES);

        check.dates();

        if check.config().profile.check_business_rules
            && stage.is_some_and(|s| s.eq_ignore_ascii_case("paid"))
            && !rules::required(check.row().get("invoice_date"))
        {
            check.error("paid deal must have invoice_date");
        }
    })
}
