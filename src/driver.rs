//! The run driver.
//!
//! Builds nothing itself: it takes the context and the check registry,
//! invokes each check once in registry order, and turns the accumulated
//! errors into console output, an optional report file, and exit-code
//! material.

use crate::check::Check;
use crate::context::RunContext;
use crate::render::{AnsiRenderer, PlainRenderer, Render};
use anyhow::Context as _;
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Final status of one executed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// No defects found
    Ok,
    /// Domain defects found
    Fail,
    /// Aborted by an unrecoverable I/O error
    Errored,
}

/// Result record for one executed check.
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub id: String,
    pub name: String,
    pub status: CheckStatus,
    pub summary: String,
    pub error_count: usize,
    /// Detail lines with presentation stripped
    pub details: Vec<String>,
}

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Presentation options for a run.
pub struct RunOptions {
    /// Also show OK summary lines
    pub verbose: bool,
    /// Mirror the report (presentation stripped) into this file
    pub output: Option<PathBuf>,
    pub format: ReportFormat,
}

/// Everything the driver learned from one run.
pub struct RunSummary {
    pub outcomes: Vec<CheckOutcome>,
}

impl RunSummary {
    /// 0 when all checks passed, 1 on any FAIL, 2 on any ERRORED.
    pub fn exit_code(&self) -> i32 {
        if self
            .outcomes
            .iter()
            .any(|o| o.status == CheckStatus::Errored)
        {
            2
        } else if self.outcomes.iter().any(|o| o.status == CheckStatus::Fail) {
            1
        } else {
            0
        }
    }
}

fn status_label(status: CheckStatus) -> String {
    match status {
        CheckStatus::Ok => " OK ".green().bold().to_string(),
        CheckStatus::Fail => "FAIL".red().bold().to_string(),
        CheckStatus::Errored => "ERRORED".red().bold().to_string(),
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => " OK ",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Errored => "ERRORED",
    }
}

/// Run every check once and present the results.
pub fn execute(
    ctx: &RunContext,
    checks: Vec<Box<dyn Check>>,
    opts: &RunOptions,
) -> anyhow::Result<RunSummary> {
    let ansi = AnsiRenderer;
    let plain = PlainRenderer;
    let mut outcomes = Vec::new();
    let mut report = String::new();

    for mut check in checks {
        let info = check.info();
        debug!(id = info.id, name = info.name, "running check");

        let (status, summary) = match check.run(ctx) {
            Err(err) => {
                warn!(id = info.id, error = %err, "check aborted by I/O failure");
                (CheckStatus::Errored, err.to_string())
            }
            Ok(()) => {
                let count = check.errors().len();
                if count == 0 {
                    (CheckStatus::Ok, check.success_message().to_string())
                } else {
                    (CheckStatus::Fail, check.error_message(count))
                }
            }
        };

        let visible = status != CheckStatus::Ok || opts.verbose;
        if visible {
            if opts.format == ReportFormat::Text {
                println!(
                    "{}: [{}] {}",
                    info.id.bright_red().bold(),
                    status_label(status),
                    summary
                );
                for message in check.errors() {
                    println!("{}", ansi.render(message));
                }
                println!();
            }
            let _ = writeln!(report, "{}: [{}] {}", info.id, status_text(status), summary);
            for message in check.errors() {
                let _ = writeln!(report, "{}", plain.render(message));
            }
            let _ = writeln!(report);
        }

        let details: Vec<String> = check.errors().iter().map(|m| plain.render(m)).collect();
        outcomes.push(CheckOutcome {
            id: info.id.to_string(),
            name: info.name.to_string(),
            status,
            summary,
            error_count: details.len(),
            details,
        });
    }

    if opts.format == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    if let Some(path) = &opts.output {
        std::fs::write(path, &report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    Ok(RunSummary { outcomes })
}

/// Print the registered checks as a table.
pub fn print_check_list(checks: &[Box<dyn Check>]) {
    println!(
        "{:<6} {:<20} {:<8} {:<14} DESCRIPTION",
        "ID", "NAME", "VERSION", "KIND"
    );
    for check in checks {
        let info = check.info();
        let kind = match info.kind {
            crate::check::CheckKind::Transcription => "transcription",
            crate::check::CheckKind::File => "file",
        };
        println!(
            "{:<6} {:<20} {:<8} {:<14} {}",
            info.id, info.name, info.version, kind, info.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{registry, testutil};
    use tempfile::tempdir;

    fn quiet_opts() -> RunOptions {
        RunOptions {
            verbose: false,
            output: None,
            format: ReportFormat::Text,
        }
    }

    fn valid_dataset(dir: &std::path::Path) {
        std::fs::create_dir(dir.join("wavs")).unwrap();
        testutil::write_wav(&dir.join("wavs/a.wav"), 8000, 1, 8000);
        testutil::write_wav(&dir.join("wavs/b.wav"), 8000, 1, 8000);
        std::fs::write(dir.join("list.txt"), "wavs/a.wav|Hello.\nwavs/b.wav|Bye.\n").unwrap();
    }

    #[test]
    fn test_clean_dataset_all_ok() {
        let dir = tempdir().unwrap();
        valid_dataset(dir.path());
        let ctx = testutil::context(dir.path(), &["list.txt"]);

        let summary = execute(&ctx, registry(&[]), &quiet_opts()).unwrap();
        assert_eq!(summary.outcomes.len(), 10);
        assert!(summary
            .outcomes
            .iter()
            .all(|o| o.status == CheckStatus::Ok));
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_defects_yield_fail_and_exit_one() {
        let dir = tempdir().unwrap();
        valid_dataset(dir.path());
        // Dangling reference plus missing punctuation
        std::fs::write(
            dir.path().join("list.txt"),
            "wavs/a.wav|Hello.\nwavs/gone.wav|Bye\n",
        )
        .unwrap();
        let ctx = testutil::context(dir.path(), &["list.txt"]);

        let summary = execute(&ctx, registry(&[]), &quiet_opts()).unwrap();
        let t003 = summary.outcomes.iter().find(|o| o.id == "T003").unwrap();
        assert_eq!(t003.status, CheckStatus::Fail);
        assert_eq!(t003.error_count, 1);
        let t005 = summary.outcomes.iter().find(|o| o.id == "T005").unwrap();
        assert_eq!(t005.status, CheckStatus::Fail);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_report_file_mirrors_failures_without_markup() {
        let dir = tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        valid_dataset(dir.path());
        std::fs::write(dir.path().join("list.txt"), "wavs/gone.wav|Bye.\n").unwrap();
        let ctx = testutil::context(dir.path(), &["list.txt"]);

        let opts = RunOptions {
            verbose: false,
            output: Some(report_path.clone()),
            format: ReportFormat::Text,
        };
        execute(&ctx, registry(&[]), &opts).unwrap();

        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("T003: [FAIL]"));
        assert!(report.contains("wavs/gone.wav|Bye."));
        // Plain mirror: no ANSI escapes, no inline markers
        assert!(!report.contains('\u{1b}'));
        assert!(!report.contains("<file>"));
        // OK checks are suppressed without --verbose
        assert!(!report.contains("[ OK ]"));
    }

    #[test]
    fn test_verbose_report_includes_ok_lines() {
        let dir = tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        valid_dataset(dir.path());
        let ctx = testutil::context(dir.path(), &["list.txt"]);

        let opts = RunOptions {
            verbose: true,
            output: Some(report_path.clone()),
            format: ReportFormat::Text,
        };
        execute(&ctx, registry(&[]), &opts).unwrap();

        let report = std::fs::read_to_string(&report_path).unwrap();
        assert!(report.contains("T001: [ OK ]"));
        assert!(report.contains("F003: [ OK ]"));
    }

    #[test]
    fn test_outcomes_serialize_to_json() {
        let dir = tempdir().unwrap();
        valid_dataset(dir.path());
        let ctx = testutil::context(dir.path(), &["list.txt"]);

        let summary = execute(&ctx, registry(&[]), &quiet_opts()).unwrap();
        let json = serde_json::to_string(&summary.outcomes).unwrap();
        assert!(json.contains("\"id\":\"T001\""));
        assert!(json.contains("\"status\":\"ok\""));
    }

    #[test]
    fn test_exit_code_precedence() {
        let ok = CheckOutcome {
            id: "T001".into(),
            name: "x".into(),
            status: CheckStatus::Ok,
            summary: String::new(),
            error_count: 0,
            details: Vec::new(),
        };
        let fail = CheckOutcome {
            status: CheckStatus::Fail,
            id: "T002".into(),
            name: "x".into(),
            summary: String::new(),
            error_count: 1,
            details: Vec::new(),
        };
        let errored = CheckOutcome {
            status: CheckStatus::Errored,
            id: "T003".into(),
            name: "x".into(),
            summary: String::new(),
            error_count: 0,
            details: Vec::new(),
        };
        assert_eq!(RunSummary { outcomes: vec![] }.exit_code(), 0);
        let summary = RunSummary {
            outcomes: vec![ok, fail, errored],
        };
        assert_eq!(summary.exit_code(), 2);
    }
}
