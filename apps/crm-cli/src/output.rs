use crm_csvs::ValidationReport;
use std::io::{self, Write};

/// Number of example messages printed per section
const PREVIEW_LIMIT: usize = 5;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(50))
}

fn write_section<W, I>(out: &mut W, messages: I) -> io::Result<()>
where
    W: Write,
    I: ExactSizeIterator<Item = String>,
{
    let total = messages.len();
    if total == 0 {
        return writeln!(out, "  OK");
    }

    writeln!(out, "  {} issues:", total)?;
    for message in messages.take(PREVIEW_LIMIT) {
        writeln!(out, "     - {}", message)?;
    }
    if total > PREVIEW_LIMIT {
        writeln!(out, "     ... and {} more", total - PREVIEW_LIMIT)?;
    }
    Ok(())
}

/// Print the human-readable report
pub fn write_report<W: Write>(out: &mut W, report: &ValidationReport, fix: bool) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "CRM VALIDATION REPORT")?;
    rule(out)?;

    for entity in &report.entities {
        writeln!(out)?;
        writeln!(out, "Validating {}...", entity.kind)?;
        write_section(out, entity.errors.iter().cloned())?;
        if entity.repaired > 0 {
            writeln!(out, "  fixed {} row(s)", entity.repaired)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Checking for CSV formula injection...")?;
    write_section(out, report.injection.iter().map(ToString::to_string))?;

    writeln!(out)?;
    rule(out)?;
    if report.is_clean() {
        writeln!(out, "All validations passed!")?;
    } else {
        writeln!(out, "Total: {} issues found", report.total_issues())?;
        if !fix {
            writeln!(out, "   Run with --fix to auto-fix what can be fixed")?;
        }
    }
    Ok(())
}
