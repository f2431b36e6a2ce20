/*!
# CRM Table Definitions

The fixed set of CRM tables, their on-disk locations under the CRM root, the
identifier column of each table and the shared field vocabularies (date fields,
free-text fields, enumerations) that the validators draw from.
*/

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

// ================================================================================================
// Entity Kinds
// ================================================================================================

/// One of the eight CRM tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Organization,
    Person,
    Product,
    Activity,
    Lead,
    Client,
    Partner,
    Deal,
}

impl EntityKind {
    /// Validation order. Referenced tables come before the tables that reference them.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Organization,
        EntityKind::Person,
        EntityKind::Product,
        EntityKind::Activity,
        EntityKind::Lead,
        EntityKind::Client,
        EntityKind::Partner,
        EntityKind::Deal,
    ];

    /// Short table name used in report headings and injection findings
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Organization => "companies",
            EntityKind::Person => "people",
            EntityKind::Product => "products",
            EntityKind::Activity => "activities",
            EntityKind::Lead => "leads",
            EntityKind::Client => "clients",
            EntityKind::Partner => "partners",
            EntityKind::Deal => "deals",
        }
    }

    /// Location of the table relative to the CRM root, `/`-separated
    pub fn relative_path(self) -> &'static str {
        match self {
            EntityKind::Organization => "contacts/companies.csv",
            EntityKind::Person => "contacts/people.csv",
            EntityKind::Product => "products.csv",
            EntityKind::Activity => "activities.csv",
            EntityKind::Lead => "relationships/leads.csv",
            EntityKind::Client => "relationships/clients.csv",
            EntityKind::Partner => "relationships/partners.csv",
            EntityKind::Deal => "relationships/deals.csv",
        }
    }

    pub fn path_under(self, root: &Path) -> PathBuf {
        self.relative_path()
            .split('/')
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }

    /// Name of the identifier column
    pub fn id_field(self) -> &'static str {
        match self {
            EntityKind::Organization => "company_id",
            EntityKind::Person => "person_id",
            EntityKind::Product => "product_id",
            EntityKind::Activity => "activity_id",
            EntityKind::Lead => "lead_id",
            EntityKind::Client => "client_id",
            EntityKind::Partner => "partner_id",
            EntityKind::Deal => "deal_id",
        }
    }

    /// Identifier pattern, if the entity enforces one. Activity ids are free-form.
    pub fn id_pattern(self) -> Option<&'static Regex> {
        let pattern = match self {
            EntityKind::Organization => &*COMPANY_ID,
            EntityKind::Person => &*PERSON_ID,
            EntityKind::Product => &*PRODUCT_ID,
            EntityKind::Activity => return None,
            EntityKind::Lead => &*LEAD_ID,
            EntityKind::Client => &*CLIENT_ID,
            EntityKind::Partner => &*PARTNER_ID,
            EntityKind::Deal => &*DEAL_ID,
        };
        Some(pattern)
    }

    /// Whether fix mode may stamp a missing `last_updated` on this table.
    /// Leads carry the field too but are never repaired.
    pub fn supports_timestamp_fix(self) -> bool {
        matches!(
            self,
            EntityKind::Organization
                | EntityKind::Person
                | EntityKind::Client
                | EntityKind::Partner
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

// ================================================================================================
// Identifier Patterns
// ================================================================================================

fn anchored(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid identifier regex")
}

static COMPANY_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^comp-[a-z0-9-]+$"));
static PERSON_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^p-[a-z0-9]+-\d+$"));
static PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^prod-[a-z0-9-]+$"));
static LEAD_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^lead-[a-z0-9]+-\d+$"));
static CLIENT_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^cli-[a-z0-9]+-\d+$"));
static PARTNER_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^ptnr-[a-z0-9]+-\d+$"));
static DEAL_ID: LazyLock<Regex> = LazyLock::new(|| anchored(r"^deal-[a-z0-9]+-\d+$"));

// ================================================================================================
// Shared Field Vocabularies
// ================================================================================================

/// Fields that must hold a `YYYY-MM-DD` calendar date whenever present, in check order
pub const DATE_FIELDS: &[&str] = &[
    "created_date",
    "last_updated",
    "next_action_date",
    "date",
    "contract_start",
    "contract_end",
    "since",
    "delivered_date",
    "invoice_date",
    "paid_date",
    "last_contact",
];

/// Free-text fields scanned for spreadsheet formula injection
pub const TEXT_FIELDS: &[&str] = &[
    "name",
    "description",
    "notes",
    "subject",
    "next_action",
    "role",
    "revenue_share",
    "source",
    "invoice_number",
];

/// Leading characters a spreadsheet may interpret as the start of a formula
pub const INJECTION_CHARS: &[char] = &['=', '+', '-', '@', '\t', '\r'];

pub const LAST_UPDATED: &str = "last_updated";

pub const COMPANY_TYPES: &[&str] = &["company", "enterprise", "ngo", "individual"];
pub const COMPANY_SIZES: &[&str] = &["small", "medium", "enterprise", "individual"];

pub const PRODUCT_TYPES: &[&str] = &["service", "reseller", "community"];
pub const PRODUCT_STATUSES: &[&str] = &["active", "paused", "discontinued"];

pub const ACTIVITY_TYPES: &[&str] = &["call", "email", "meeting", "message", "note"];
pub const ACTIVITY_CHANNELS: &[&str] = &[
    "email",
    "telegram",
    "whatsapp",
    "phone",
    "in_person",
    "linkedin",
    "mcp",
];
pub const ACTIVITY_DIRECTIONS: &[&str] = &["inbound", "outbound"];

pub const LEAD_STAGES: &[&str] = &["new", "qualified", "proposal", "negotiation", "won", "lost"];
pub const LEAD_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

pub const CLIENT_STATUSES: &[&str] = &["active", "paused", "churned"];

pub const PARTNERSHIP_TYPES: &[&str] = &[
    "training_partner",
    "workforce_partner",
    "reseller_agreement",
    "referral_partner",
];
pub const PARTNER_STATUSES: &[&str] = &["active", "paused", "ended"];

pub const DEAL_STAGES: &[&str] = &[
    "proposal",
    "negotiation",
    "won",
    "in_progress",
    "delivered",
    "invoiced",
    "paid",
    "lost",
];
pub const CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "CAD", "AUD", "CHF", "JPY", "SGD", "PLN", "UAH", "SEK", "INR", "BRL",
];

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_but_activity_has_an_id_pattern() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.id_pattern().is_none(), kind == EntityKind::Activity);
        }
    }

    #[test]
    fn test_fixable_kinds() {
        let fixable: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|k| k.supports_timestamp_fix())
            .collect();
        assert_eq!(
            fixable,
            vec![
                EntityKind::Organization,
                EntityKind::Person,
                EntityKind::Client,
                EntityKind::Partner
            ]
        );
    }

    #[test]
    fn test_path_under_root() {
        let path = EntityKind::Deal.path_under(Path::new("/crm"));
        assert_eq!(path, Path::new("/crm").join("relationships").join("deals.csv"));
    }

    #[test]
    fn test_id_patterns_are_anchored() {
        let company = EntityKind::Organization.id_pattern().unwrap();
        assert!(company.is_match("comp-acme-corp"));
        assert!(!company.is_match("xcomp-acme"));
        assert!(!company.is_match("comp-ACME"));

        let person = EntityKind::Person.id_pattern().unwrap();
        assert!(person.is_match("p-jane-1"));
        assert!(!person.is_match("p-jane-doe-x"));
        assert_eq!(person.as_str(), r"^p-[a-z0-9]+-\d+$");
    }
}
