//! Validation report types

use crate::rules::InjectionFinding;
use crate::schemas::EntityKind;

/// Findings for a single table
#[derive(Debug, Clone, PartialEq)]
pub struct EntityReport {
    pub kind: EntityKind,
    pub errors: Vec<String>,
    /// Rows whose `last_updated` was stamped in fix mode
    pub repaired: usize,
}

impl EntityReport {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            errors: Vec::new(),
            repaired: 0,
        }
    }
}

/// A complete validation report, entities in validation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub entities: Vec<EntityReport>,
    pub injection: Vec<InjectionFinding>,
}

impl ValidationReport {
    pub fn total_issues(&self) -> usize {
        self.entities.iter().map(|e| e.errors.len()).sum::<usize>() + self.injection.len()
    }

    pub fn total_repaired(&self) -> usize {
        self.entities.iter().map(|e| e.repaired).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    /// Process exit status: 0 when clean, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_clean() {
            0
        } else {
            1
        }
    }

    pub fn entity(&self, kind: EntityKind) -> Option<&EntityReport> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    /// Every finding as text: entities in order, then the injection scan
    pub fn messages(&self) -> Vec<String> {
        self.entities
            .iter()
            .flat_map(|e| e.errors.iter().cloned())
            .chain(self.injection.iter().map(ToString::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_clean() {
        let report = ValidationReport::default();
        assert!(report.is_clean());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_totals_include_injection_findings() {
        let mut people = EntityReport::new(EntityKind::Person);
        people.errors.push("Row 2: first_name missing".into());
        people.repaired = 2;

        let report = ValidationReport {
            entities: vec![EntityReport::new(EntityKind::Organization), people],
            injection: vec![InjectionFinding {
                table: "companies".into(),
                row: 3,
                field: "notes".into(),
                character: '@',
            }],
        };

        assert_eq!(report.total_issues(), 2);
        assert_eq!(report.total_repaired(), 2);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(
            report.messages(),
            vec![
                "Row 2: first_name missing".to_string(),
                "companies row 3: 'notes' starts with '@' (possible CSV formula injection)"
                    .to_string(),
            ]
        );
    }
}
