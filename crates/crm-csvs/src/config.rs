use chrono::{Local, NaiveDate};

/// Which optional check families run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckProfile {
    /// Resolve foreign keys against their referenced tables.
    /// Mandatory foreign-key fields are still required when this is off.
    pub check_references: bool,

    /// Cross-field business rules (paid deals need an invoice date)
    pub check_business_rules: bool,

    /// Validate enumerations on optional fields (company type/size,
    /// activity direction, lead priority). Required enumerations always run.
    pub strict_enums: bool,
}

impl Default for CheckProfile {
    fn default() -> Self {
        Self {
            check_references: true,
            check_business_rules: true,
            strict_enums: true,
        }
    }
}

/// Configuration for one validation run
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Stamp missing `last_updated` values and rewrite the affected tables
    pub fix: bool,

    /// Date written by repairs
    pub today: NaiveDate,

    pub profile: CheckProfile,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fix: false,
            today: Local::now().date_naive(),
            profile: CheckProfile::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_profile(mut self, profile: CheckProfile) -> Self {
        self.profile = profile;
        self
    }
}
