// ABOUTME: Operator-facing output for an incompatible reconciliation result
// ABOUTME: Formatting is pure; printing goes to stderr alongside tracing

use colored::Colorize;
use tracing::error;

use preflight_migrations::MigrationId;

pub const MISSING_HEADER: &str =
    "Migrations which are currently applied, but missing in the version being deployed:";

/// The report body: header plus one indented line per missing migration.
/// `missing` arrives already sorted from the reconciliation engine.
pub fn format_missing(missing: &[MigrationId]) -> Vec<String> {
    let mut lines = Vec::with_capacity(missing.len() + 1);
    lines.push(MISSING_HEADER.to_string());
    for id in missing {
        lines.push(format!("  {id}"));
    }
    lines
}

pub fn print_incompatibility(missing: &[MigrationId]) {
    eprintln!("{}", MISSING_HEADER.red().bold());
    for id in missing {
        eprintln!("  {id}");
    }
    error!(missing = missing.len(), "Applied migrations unaccounted for in target");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_lists_each_missing_migration() {
        let missing = vec![
            MigrationId::new("analytics", "0009_z"),
            MigrationId::new("zerver", "0001_a"),
        ];
        let lines = format_missing(&missing);
        assert_eq!(
            lines,
            vec![
                MISSING_HEADER.to_string(),
                "  analytics.0009_z".to_string(),
                "  zerver.0001_a".to_string(),
            ]
        );
    }

    #[test]
    fn test_report_with_no_ids_is_header_only() {
        assert_eq!(format_missing(&[]).len(), 1);
    }
}
