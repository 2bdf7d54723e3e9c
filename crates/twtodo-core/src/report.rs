//! Counters collected during one reconciliation run.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// Outcome of the update pass over tasks Taskwarrior already tracks.
///
/// Every examined task lands in exactly one of `up_to_date`, `updated`, `errors`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStats {
    pub examined: usize,
    pub up_to_date: usize,
    pub updated: usize,
    pub errors: usize,
}

/// Outcome of the import pass over open remote tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub fetched: usize,
    pub created: usize,
    pub existed: usize,
    pub errors: usize,
}

/// Combined result of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub update: UpdateStats,
    pub import: ImportStats,

    /// Set when the open-task fetch failed and the import pass was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_error: Option<String>,
}

impl SyncReport {
    /// Human-readable multi-line summary returned to the CLI.
    pub fn summary(&self) -> String {
        let mut out = String::from("Pull successful:\n");
        let u = &self.update;
        let i = &self.import;

        writeln!(out, "    [Update] To-Do tasks tracked locally: {}", u.examined).ok();
        writeln!(out, "    [Update] Local tasks up-to-date: {}", u.up_to_date).ok();
        writeln!(out, "    [Update] Local tasks updated: {}", u.updated).ok();
        writeln!(out, "    [Update] Errors: {}", u.errors).ok();
        writeln!(out, "    [Import] Open tasks fetched from To-Do: {}", i.fetched).ok();
        writeln!(out, "    [Import] New local tasks created: {}", i.created).ok();
        writeln!(out, "    [Import] Tasks already existed locally: {}", i.existed).ok();
        write!(out, "    [Import] Errors: {}", i.errors).ok();

        if let Some(reason) = &self.import_error {
            write!(out, "\n    [Import] Aborted: {}", reason).ok();
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_order() {
        let report = SyncReport {
            update: UpdateStats {
                examined: 4,
                up_to_date: 2,
                updated: 1,
                errors: 1,
            },
            import: ImportStats {
                fetched: 3,
                created: 2,
                existed: 1,
                errors: 0,
            },
            import_error: None,
        };

        let summary = report.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Pull successful:");
        assert!(lines[1].ends_with("tracked locally: 4"));
        assert!(lines[2].ends_with("up-to-date: 2"));
        assert!(lines[3].ends_with("updated: 1"));
        assert!(lines[4].ends_with("Errors: 1"));
        assert!(lines[5].ends_with("fetched from To-Do: 3"));
        assert!(lines[6].ends_with("created: 2"));
        assert!(lines[7].ends_with("existed locally: 1"));
        assert!(lines[8].ends_with("Errors: 0"));
    }

    #[test]
    fn test_summary_reports_aborted_import() {
        let report = SyncReport {
            import_error: Some("list 'L1' unreachable".to_string()),
            ..Default::default()
        };
        assert!(report
            .summary()
            .ends_with("[Import] Aborted: list 'L1' unreachable"));
    }
}
