use chrono::NaiveDate;
use clap::Parser;
use crm_csvs::{CheckProfile, Orchestrator, TableStore, ValidatorConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod error;
mod output;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "crm-validate")]
#[command(about = "Validate the sales CRM CSV tables")]
#[command(version)]
struct Cli {
    /// Stamp today's date into missing last_updated fields and rewrite the tables
    #[arg(long)]
    fix: bool,

    /// Root directory of the CRM tables
    #[arg(long, default_value = "sales/crm")]
    crm_dir: PathBuf,

    /// Date used by --fix instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,

    /// Do not resolve foreign keys against referenced tables
    #[arg(long)]
    skip_references: bool,

    /// Do not check business rules such as invoice dates on paid deals
    #[arg(long)]
    skip_business_rules: bool,

    /// Only check enumerations on required fields
    #[arg(long)]
    lenient_enums: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn validator_config(&self) -> CliResult<ValidatorConfig> {
        let mut config = ValidatorConfig::default()
            .with_fix(self.fix)
            .with_profile(CheckProfile {
                check_references: !self.skip_references,
                check_business_rules: !self.skip_business_rules,
                strict_enums: !self.lenient_enums,
            });

        if let Some(today) = &self.today {
            let date = NaiveDate::parse_from_str(today, "%Y-%m-%d").map_err(|source| {
                CliError::InvalidDate {
                    value: today.clone(),
                    source,
                }
            })?;
            config = config.with_today(date);
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.crm_dir.is_dir() {
        warn!("CRM directory {} does not exist", cli.crm_dir.display());
    }

    let config = cli.validator_config()?;
    let orchestrator = Orchestrator::new(TableStore::new(cli.crm_dir.clone()), config);
    let report = orchestrator.run();

    output::write_report(&mut io::stdout().lock(), &report, cli.fix)?;

    Ok(ExitCode::from(report.exit_code() as u8))
}
