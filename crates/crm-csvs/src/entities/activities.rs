use super::{validate_rows, EntityOutcome, References};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, ACTIVITY_CHANNELS, ACTIVITY_DIRECTIONS, ACTIVITY_TYPES},
    table::Table,
};

/// Activity ids are free-form; only presence and uniqueness are checked.
pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Activity, table, config, |check| {
        check.identifier();
        check.required("type");
        check.required("channel");
        check.required("date");
        check.required("created_by");

        check.enumerated("type", ACTIVITY_TYPES);
        check.enumerated("channel", ACTIVITY_CHANNELS);
        check.optional_enumerated("direction", ACTIVITY_DIRECTIONS);

        check.dates();

        check.reference("person_id", &refs.people);
        check.reference("company_id", &refs.organizations);
        check.reference("product_id", &refs.products);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{known, table};

    const HEADERS: &[&str] = &[
        "activity_id",
        "type",
        "channel",
        "direction",
        "date",
        "created_by",
        "person_id",
        "company_id",
        "product_id",
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
    fn test_free_form_id_and_resolved_references() {
        let t = table(
            HEADERS,
            &[&["ACT 0001", "Call", "phone", "outbound", "2024-02-02", "sam", "p-jane-1", "comp-acme", "prod-basic"]],
        );
        assert!(validate(&t, &refs(), &ValidatorConfig::default()).errors.is_empty());
    }

    #[test]
    fn test_missing_enums_and_dangling_references() {
        let t = table(
            HEADERS,
            &[&["act-1", "", "fax", "sideways", "2024-02-02", "sam", "p-bob-2", "", "prod-gone"]],
        );
        let outcome = validate(&t, &refs(), &ValidatorConfig::default());
        assert_eq!(
            outcome.errors,
            vec![
                "Row 2: type missing",
                "Row 2: invalid channel 'fax'",
                "Row 2: invalid direction 'sideways'",
                "Row 2: person_id 'p-bob-2' not found",
                "Row 2: product_id 'prod-gone' not found",
            ]
        );
    }

    #[test]
    fn test_duplicate_activity_ids() {
        let row: &[&str] = &["act-1", "note", "mcp", "", "2024-02-02", "sam", "", "", ""];
        let t = table(HEADERS, &[row, row]);
        let outcome = validate(&t, &refs(), &ValidatorConfig::default());
        assert_eq!(outcome.errors, vec!["Duplicate activity_id: act-1"]);
    }
}
