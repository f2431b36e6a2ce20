/*!
# Validation Orchestrator

Runs the entity validators in dependency order (organizations, people,
products, activities, leads, clients, partners, deals), applies fix-mode
repairs, then scans every table for formula injection. The scan visits the
business tables first and the activity log last.

Every validator loads its own primary and referenced tables fresh from the
store. A table that cannot be found or read becomes a single finding for that
entity and the run moves on.
*/

use crate::{
    config::ValidatorConfig,
    entities::{self, References},
    repair::apply_repairs,
    report::{EntityReport, ValidationReport},
    rules::{self, InjectionFinding},
    schemas::EntityKind,
    table::{row_number, ReferenceSet, TableLoad, TableStore},
};
use tracing::{debug, info, warn};

/// Table order of the formula-injection scan
pub const INJECTION_SCAN_ORDER: [EntityKind; 8] = [
    EntityKind::Organization,
    EntityKind::Person,
    EntityKind::Product,
    EntityKind::Lead,
    EntityKind::Client,
    EntityKind::Partner,
    EntityKind::Deal,
    EntityKind::Activity,
];

pub struct Orchestrator {
    store: TableStore,
    config: ValidatorConfig,
}

impl Orchestrator {
    pub fn new(store: TableStore, config: ValidatorConfig) -> Self {
        Self { store, config }
    }

    /// Validate every table and run the injection scan
    pub fn run(&self) -> ValidationReport {
        info!(
            "Validating CRM tables under {} (fix: {})",
            self.store.root().display(),
            self.config.fix
        );

        let entities = EntityKind::ALL
            .into_iter()
            .map(|kind| self.validate_entity(kind))
            .collect();
        let injection = self.scan_injection();

        let report = ValidationReport {
            entities,
            injection,
        };
        info!(
            "Validation finished: {} issue(s), {} row(s) repaired",
            report.total_issues(),
            report.total_repaired()
        );
        report
    }

    /// Validate one table, applying and saving repairs in fix mode
    pub fn validate_entity(&self, kind: EntityKind) -> EntityReport {
        let mut report = EntityReport::new(kind);

        let mut table = match self.store.load(kind) {
            Ok(TableLoad::Loaded(table)) => table,
            Ok(TableLoad::Missing) => {
                report
                    .errors
                    .push(format!("{} not found", kind.relative_path()));
                return report;
            }
            Err(e) => {
                warn!("Failed to read {}: {}", kind.relative_path(), e);
                report
                    .errors
                    .push(format!("{} could not be read: {}", kind.relative_path(), e));
                return report;
            }
        };

        if table.is_empty() {
            debug!("{} has no rows", kind);
            return report;
        }

        let refs = self.load_references(kind);
        let outcome = entities::validate_entity(kind, &table, &refs, &self.config);
        debug!(
            "{}: {} finding(s), {} repair(s)",
            kind,
            outcome.errors.len(),
            outcome.repairs.len()
        );
        report.errors = outcome.errors;

        if !outcome.repairs.is_empty() {
            let applied = apply_repairs(&mut table, &outcome.repairs);
            match self.store.save(kind, &table) {
                Ok(()) => {
                    info!("Stamped last_updated on {} row(s) of {}", applied, kind);
                    report.repaired = applied;
                }
                Err(e) => {
                    warn!("Failed to save repairs to {}: {}", kind.relative_path(), e);
                    report.errors.extend(outcome.repairs.iter().map(|repair| {
                        format!("Row {}: {} missing", row_number(repair.row_index), repair.field)
                    }));
                    report
                        .errors
                        .push(format!("{} could not be saved: {}", kind.relative_path(), e));
                }
            }
        }

        report
    }

    /// Formula-injection findings across every table that exists and has rows
    pub fn scan_injection(&self) -> Vec<InjectionFinding> {
        let mut findings = Vec::new();

        for kind in INJECTION_SCAN_ORDER {
            match self.store.load(kind) {
                Ok(TableLoad::Loaded(table)) if !table.is_empty() => {
                    findings.extend(rules::injection_scan(kind.table_name(), &table));
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping injection scan of {}: {}", kind, e),
            }
        }

        findings
    }

    fn load_references(&self, kind: EntityKind) -> References {
        let mut refs = References::default();
        if !self.config.profile.check_references {
            return refs;
        }

        for &target in entities::referenced_kinds(kind) {
            let set = self.store.reference_set(target).unwrap_or_else(|e| {
                warn!(
                    "Cannot verify references from {} to {}: {}",
                    kind, target, e
                );
                ReferenceSet::Unverifiable
            });
            refs.insert(target, set);
        }

        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, kind: EntityKind, contents: &str) {
        let path = kind.path_under(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_missing_primary_table_is_one_finding() {
        let dir = TempDir::new().unwrap();
        let orchestrator = Orchestrator::new(TableStore::new(dir.path()), ValidatorConfig::default());

        let report = orchestrator.validate_entity(EntityKind::Deal);
        assert_eq!(report.errors, vec!["relationships/deals.csv not found"]);
    }

    #[test]
    fn test_header_only_table_is_clean() {
        let dir = TempDir::new().unwrap();
        write(&dir, EntityKind::Product, "product_id,name\n");
        let orchestrator = Orchestrator::new(TableStore::new(dir.path()), ValidatorConfig::default());

        assert!(orchestrator.validate_entity(EntityKind::Product).errors.is_empty());
    }

    #[test]
    fn test_unreadable_table_is_one_finding() {
        let dir = TempDir::new().unwrap();
        write(&dir, EntityKind::Product, "product_id,product_id\nprod-a,prod-a\n");
        let orchestrator = Orchestrator::new(TableStore::new(dir.path()), ValidatorConfig::default());

        let report = orchestrator.validate_entity(EntityKind::Product);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("products.csv could not be read"));
    }

    #[test]
    fn test_references_not_loaded_when_disabled() {
        let dir = TempDir::new().unwrap();
        write(&dir, EntityKind::Organization, "company_id,name\ncomp-a,A\n");
        write(
            &dir,
            EntityKind::Person,
            "person_id,first_name,phone,company_id,last_updated\np-a-1,Ann,1,comp-zzz,2024-01-01\n",
        );

        let strict = Orchestrator::new(TableStore::new(dir.path()), ValidatorConfig::default());
        assert_eq!(
            strict.validate_entity(EntityKind::Person).errors,
            vec!["Row 2: company_id 'comp-zzz' not found"]
        );

        let mut config = ValidatorConfig::default();
        config.profile.check_references = false;
        let lenient = Orchestrator::new(TableStore::new(dir.path()), config);
        assert!(lenient.validate_entity(EntityKind::Person).errors.is_empty());
    }

    #[test]
    fn test_injection_scan_visits_activities_last() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            EntityKind::Activity,
            "activity_id,type,subject\nact-1,call,=HYPERLINK()\n",
        );
        write(&dir, EntityKind::Lead, "lead_id,notes\nlead-a-1,+1 follow up\n");
        write(&dir, EntityKind::Organization, "company_id,name\ncomp-a,@Acme\n");
        let orchestrator = Orchestrator::new(TableStore::new(dir.path()), ValidatorConfig::default());

        let findings = orchestrator.scan_injection();
        let tables: Vec<&str> = findings.iter().map(|f| f.table.as_str()).collect();
        assert_eq!(tables, vec!["companies", "leads", "activities"]);
    }

    #[test]
    fn test_unsaved_repairs_are_reported_as_missing() {
        let dir = TempDir::new().unwrap();
        let original = "company_id,name,last_updated\ncomp-a,Acme,,EXTRA-DATA\n";
        write(&dir, EntityKind::Organization, original);
        let config = ValidatorConfig::default().with_fix(true);
        let orchestrator = Orchestrator::new(TableStore::new(dir.path()), config);

        let report = orchestrator.validate_entity(EntityKind::Organization);

        assert_eq!(report.repaired, 0);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0], "Row 2: last_updated missing");
        assert!(report.errors[1].starts_with("companies.csv could not be saved"));
        assert_eq!(
            fs::read_to_string(EntityKind::Organization.path_under(dir.path())).unwrap(),
            original
        );
    }
}
