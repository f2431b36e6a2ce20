use super::{validate_rows, EntityOutcome};
use crate::{
    config::ValidatorConfig,
    schemas::{EntityKind, PRODUCT_STATUSES, PRODUCT_TYPES},
    table::Table,
};

pub(super) fn validate(table: &Table, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Product, table, config, |check| {
        check.identifier();
        check.required("business_line");
        check.required("name");
        check.required("type");
        check.required("status");
        check.required("created_date");

        check.enumerated("type", PRODUCT_TYPES);
        check.enumerated("status", PRODUCT_STATUSES);

        check.dates();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::table;

    const HEADERS: &[&str] = &[
        "product_id",
        "business_line",
        "name",
        "type",
        "status",
        "created_date",
    ];

    #[test]
    fn test_valid_product() {
        let t = table(
            HEADERS,
            &[&["prod-training-basic", "education", "Basic", "service", "Active", "2023-09-01"]],
        );
        assert!(validate(&t, &ValidatorConfig::default()).errors.is_empty());
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let t = table(
            HEADERS,
            &[&["product-1", "", "Basic", "", "retired", "01-09-2023"]],
        );
        let outcome = validate(&t, &ValidatorConfig::default());
        assert_eq!(
            outcome.errors,
            vec![
                "Row 2: product_id 'product-1' does not match expected format ^prod-[a-z0-9-]+$",
                "Row 2: business_line missing",
                "Row 2: type missing",
                "Row 2: invalid status 'retired'",
                "Row 2: created_date '01-09-2023' does not match YYYY-MM-DD format",
            ]
        );
    }

    #[test]
    fn test_products_never_repaired() {
        let t = table(
            &["product_id", "business_line", "name", "type", "status", "created_date", "last_updated"],
            &[&["prod-a", "edu", "A", "service", "active", "2023-09-01", ""]],
        );
        let outcome = validate(&t, &ValidatorConfig::default().with_fix(true));
        assert!(outcome.errors.is_empty());
        assert!(outcome.repairs.is_empty());
    }
}
