//! Report rendering.

use anyhow::Result;
use serde::Serialize;

use semcheck_commit::Commit;
use semcheck_core::{CheckReport, ClassificationResult, ReportSink, RevisionRange, Verdict};

const CONVENTION_URL: &str = "https://conventionalcommits.org/";

/// Short hash, commit date (when known) and subject.
fn describe(commit: &Commit) -> String {
    match commit.date {
        Some(date) => format!(
            "{} {} {}",
            commit.short_hash(),
            date.format("%Y-%m-%d"),
            commit.subject()
        ),
        None => format!("{} {}", commit.short_hash(), commit.subject()),
    }
}

/// Renders the line printed for one classified commit.
pub fn render_result(result: &ClassificationResult) -> String {
    let commit = describe(&result.commit);
    match &result.verdict {
        Verdict::Conventional { .. } => format!("✓ {commit}"),
        Verdict::Exempt { keyword } => format!("✓ {commit} (exempt: {keyword})"),
        Verdict::NonConventional { reason } => format!("✗ {commit} ({reason})"),
    }
}

/// Renders the line printed for a skipped release commit.
pub fn render_skipped(commit: &Commit) -> String {
    format!("- {} (release commit, skipped)", describe(commit))
}

/// Renders the closing line of a passing report, or `None` when the report
/// failed (the failure is reported as an error instead).
pub fn render_summary(report: &CheckReport) -> Option<String> {
    if !report.passed() {
        return None;
    }
    if report.total == 0 {
        return Some("No commits to check".to_string());
    }
    Some(format!(
        "All {} commit(s) follow {CONVENTION_URL}",
        report.total
    ))
}

/// Prints one line per commit to stdout.
pub struct TextSink;

impl ReportSink for TextSink {
    fn range_resolved(&mut self, range: &RevisionRange) {
        println!("Checking commits {}..{}", range.from, range.to);
    }

    fn release_commit_skipped(&mut self, commit: &Commit) {
        println!("{}", render_skipped(commit));
    }

    fn commit_checked(&mut self, result: &ClassificationResult) {
        println!("{}", render_result(result));
    }

    fn finished(&mut self, report: &CheckReport) {
        if let Some(summary) = render_summary(report) {
            println!("{summary}");
        }
    }
}

/// Collects the range so the report can be printed as one JSON document.
#[derive(Default)]
pub struct JsonSink {
    range: Option<RevisionRange>,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    range: Option<&'a RevisionRange>,
    passed: bool,
    #[serde(flatten)]
    report: &'a CheckReport,
}

impl JsonSink {
    /// Serializes the range and report.
    pub fn render(&self, report: &CheckReport) -> Result<String> {
        let document = JsonDocument {
            range: self.range.as_ref(),
            passed: report.passed(),
            report,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl ReportSink for JsonSink {
    fn range_resolved(&mut self, range: &RevisionRange) {
        self.range = Some(range.clone());
    }

    fn commit_checked(&mut self, _result: &ClassificationResult) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use semcheck_core::CommitClassifier;

    fn report(messages: &[(&str, &str)]) -> CheckReport {
        let commits: Vec<Commit> = messages
            .iter()
            .map(|(hash, message)| Commit::new(*hash, *message))
            .collect();
        CommitClassifier::new().classify(&commits)
    }

    #[test]
    fn test_render_results() {
        let report = report(&[
            ("1111111aaaa", "feat: add x"),
            ("2222222bbbb", "improve this code"),
            ("3333333cccc", "Merge branch 'main' into topic"),
            ("4444444dddd", "WIP: more"),
            ("5555555eeee", ": empty"),
        ]);
        let rendered: Vec<String> = report.results.iter().map(render_result).collect();

        insta::assert_snapshot!(rendered.join("\n"), @r"
        ✓ 1111111 feat: add x
        ✗ 2222222 improve this code (no ':' after the commit type)
        ✓ 3333333 Merge branch 'main' into topic (exempt: merge)
        ✗ 4444444 WIP: more (unknown commit type `wip`)
        ✗ 5555555 : empty (empty commit type before ':')
        ");
    }

    #[test]
    fn test_render_result_shows_commit_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let commits = vec![
            Commit::new("1111111aaaa", "feat: add x").with_date(date),
            Commit::new("2222222bbbb", "oops").with_date(date),
        ];
        let report = CommitClassifier::new().classify(&commits);
        let rendered: Vec<String> = report.results.iter().map(render_result).collect();

        insta::assert_snapshot!(rendered.join("\n"), @r"
        ✓ 1111111 2024-01-02 feat: add x
        ✗ 2222222 2024-01-02 oops (no ':' after the commit type)
        ");
    }

    #[test]
    fn test_render_skipped() {
        let commit = Commit::new("abcdef0123", "release 1.2.0");
        assert_eq!(
            render_skipped(&commit),
            "- abcdef0 release 1.2.0 (release commit, skipped)"
        );
    }

    #[test]
    fn test_render_summary() {
        let passed = report(&[("a", "feat: x"), ("b", "fix: y")]);
        assert_eq!(
            render_summary(&passed).as_deref(),
            Some("All 2 commit(s) follow https://conventionalcommits.org/")
        );

        let empty = report(&[]);
        assert_eq!(render_summary(&empty).as_deref(), Some("No commits to check"));

        let failed = report(&[("a", "nope")]);
        assert!(render_summary(&failed).is_none());
    }

    #[test]
    fn test_json_render() {
        let mut sink = JsonSink::default();
        sink.range_resolved(&RevisionRange {
            from: "aaa".to_string(),
            to: "bbb".to_string(),
        });
        let report = report(&[("c1", "feat: x"), ("c2", "oops")]);

        let json: serde_json::Value = serde_json::from_str(&sink.render(&report).unwrap()).unwrap();
        assert_eq!(json["range"]["from"], "aaa");
        assert_eq!(json["passed"], false);
        assert_eq!(json["total"], 2);
        assert_eq!(json["failed_count"], 1);
        assert_eq!(json["failed_commits"][0]["hash"], "c2");
        assert_eq!(json["results"][1]["verdict"]["status"], "non-conventional");
    }
}
