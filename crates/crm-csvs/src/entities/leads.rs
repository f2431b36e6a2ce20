use super::{validate_rows, EntityOutcome, References};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, LEAD_PRIORITIES, LEAD_STAGES},
    table::Table,
};

pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Lead, table, config, |check| {
        check.identifier();
        check.required("stage");
        // Leads are outside fix mode, so a missing timestamp is always reported.
        check.last_updated();

        check.enumerated("stage", LEAD_STAGES);
        check.optional_enumerated("priority", LEAD_PRIORITIES);

        check.dates();

        check.reference("company_id", &refs.organizations);
        check.reference("product_id", &refs.products);
        check.reference("primary_contact_id", &refs.people);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{known, table};

    const HEADERS: &[&str] = &[
        "lead_id",
        "stage",
        "priority",
        "company_id",
        "product_id",
        "primary_contact_id",
        "next_action_date",
        "last_updated",
    ];

    fn refs() -> References {
        References {
            organizations: known(&["comp-acme"]),
            people: known(&["p-jane-1"]),
            products: known(&["prod-basic"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_lead() {
        let t = table(
            HEADERS,
            &[&["lead-acme-1", "Qualified", "high", "comp-acme", "prod-basic", "p-jane-1", "2024-07-01", "2024-06-01"]],
        );
        assert!(validate(&t, &refs(), &ValidatorConfig::default()).errors.is_empty());
    }

    #[test]
    fn test_missing_timestamp_reported_even_in_fix_mode() {
        let t = table(
            HEADERS,
            &[&["lead-acme-1", "new", "", "", "", "", "", ""]],
        );
        let outcome = validate(&t, &refs(), &ValidatorConfig::default().with_fix(true));
        assert_eq!(outcome.errors, vec!["Row 2: last_updated missing"]);
        assert!(outcome.repairs.is_empty());
    }

    #[test]
    fn test_invalid_stage_priority_and_contact() {
        let t = table(
            HEADERS,
            &[&["lead-acme", "cold", "urgent", "comp-acme", "prod-basic", "p-x-9", "2024-02-30", "2024-06-01"]],
        );
        let outcome = validate(&t, &refs(), &ValidatorConfig::default());
        assert_eq!(
            outcome.errors,
            vec![
                "Row 2: lead_id 'lead-acme' does not match expected format ^lead-[a-z0-9]+-\\d+$",
                "Row 2: invalid stage 'cold'",
                "Row 2: invalid priority 'urgent'",
                "Row 2: next_action_date '2024-02-30' is not a valid date",
                "Row 2: primary_contact_id 'p-x-9' not found",
            ]
        );
    }
}
