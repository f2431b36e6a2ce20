/*!
# CRM CSV Validation

Validates the sales CRM tables (organizations, people, products, activities,
leads, clients, partners and deals) stored as CSV files under one root
directory.

## Table Layout

| Table | File |
|---|---|
| companies | `contacts/companies.csv` |
| people | `contacts/people.csv` |
| products | `products.csv` |
| activities | `activities.csv` |
| leads | `relationships/leads.csv` |
| clients | `relationships/clients.csv` |
| partners | `relationships/partners.csv` |
| deals | `relationships/deals.csv` |

## What Is Checked

- Required fields, identifier formats and identifier uniqueness
- Enumerations (case-insensitive), `YYYY-MM-DD` calendar dates and email format
- Foreign keys between tables. A reference is only checked when the
  referenced table exists and has rows.
- Business rules, e.g. a paid deal must carry an `invoice_date`
- Free-text cells that start like a spreadsheet formula

Findings are plain messages collected into a [`ValidationReport`]; none of
them stop the run. In fix mode a missing `last_updated` on companies, people,
clients and partners is stamped with today's date and the table is rewritten.

## Usage

```rust,no_run
use crm_csvs::{Orchestrator, TableStore, ValidatorConfig};

let orchestrator = Orchestrator::new(
    TableStore::new("sales/crm"),
    ValidatorConfig::default().with_fix(true),
);
let report = orchestrator.run();
for message in report.messages() {
    println!("{}", message);
}
std::process::exit(report.exit_code());
```
*/

pub mod config;
pub mod entities;
pub mod errors;
pub mod orchestrator;
pub mod repair;
pub mod report;
pub mod rules;
pub mod schemas;
pub mod table;

// Re-export main types for convenience
pub use config::{CheckProfile, ValidatorConfig};
pub use entities::{validate_entity, EntityOutcome, References};
pub use errors::{CsvError, CsvResult};
pub use orchestrator::Orchestrator;
pub use repair::{apply_repairs, Repair};
pub use report::{EntityReport, ValidationReport};
pub use rules::InjectionFinding;
pub use schemas::EntityKind;
pub use table::{ReferenceSet, Row, Table, TableLoad, TableStore};
