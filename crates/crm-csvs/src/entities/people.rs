use super::{validate_rows, EntityOutcome, References};
use crate::{config::ValidatorConfig, rules, schemas::EntityKind, table::Table};

const CONTACT_FIELDS: [&str; 3] = ["email", "phone", "telegram_username"];

pub(super) fn validate(table: &Table, refs: &References, config: &ValidatorConfig) -> EntityOutcome {
    validate_rows(EntityKind::Person, table, config, |check| {
        check.identifier();
        check.required("first_name");
        check.last_updated();

        let row = check.row();
        if !CONTACT_FIELDS.iter().any(|f| rules::required(row.get(f))) {
            check.error("must have email OR phone OR telegram_username");
        }

        check.email("email");
        check.dates();
        check.reference("company_id", &refs.organizations);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::test_support::{known, table};

    const HEADERS: &[&str] = &[
        "person_id",
        "first_name",
        "email",
        "phone",
        "company_id",
        "last_updated",
    ];

    fn refs() -> References {
        References {
            organizations: known(&["comp-acme"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_reachable_person_passes() {
        let t = table(
            HEADERS,
            &[&["p-jane-1", "Jane", "jane@acme.io", "", "comp-acme", "2024-01-05"]],
        );
        assert!(validate(&t, &refs(), &ValidatorConfig::default()).errors.is_empty());
    }

    #[test]
    fn test_unreachable_person() {
        let t = table(HEADERS, &[&["p-jane-1", "Jane", "", " ", "", "2024-01-05"]]);
        let outcome = validate(&t, &refs(), &ValidatorConfig::default());
        assert_eq!(
            outcome.errors,
            vec!["Row 2: must have email OR phone OR telegram_username"]
        );
    }

    #[test]
    fn test_telegram_alone_is_enough() {
        let t = table(
            &["person_id", "first_name", "telegram_username", "last_updated"],
            &[&["p-jane-1", "Jane", "@jane", "2024-01-05"]],
        );
        assert!(validate(&t, &refs(), &ValidatorConfig::default()).errors.is_empty());
    }

    #[test]
    fn test_bad_email_and_unknown_company() {
        let t = table(
            HEADERS,
            &[&["p-jane-1", "Jane", "jane.acme.io", "", "comp-nope", "2024-01-05"]],
        );
        let outcome = validate(&t, &refs(), &ValidatorConfig::default());
        assert_eq!(
            outcome.errors,
            vec![
                "Row 2: email 'jane.acme.io' does not match expected format",
                "Row 2: company_id 'comp-nope' not found",
            ]
        );
    }

    #[test]
    fn test_unverifiable_company_is_skipped() {
        let t = table(
            HEADERS,
            &[&["p-jane-1", "Jane", "", "+1 555", "not even an id", "2024-01-05"]],
        );
        let outcome = validate(&t, &References::default(), &ValidatorConfig::default());
        assert!(outcome.errors.is_empty());
    }
}
