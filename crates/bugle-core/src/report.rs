//! Markdown bug-report rendering

use chrono::{DateTime, Local};

use crate::models::ReportConfig;
use crate::stats::IssueStats;

/// Minute-precision stamp used in report headers and artifact file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Render the aggregated counts as the fixed-shape Markdown report.
///
/// The caller supplies `generated_at` so the output is reproducible: the
/// same stats, config, and timestamp always produce the same bytes.
///
/// Shape: a header naming the project and stamp, a summary line with the
/// total / closed count / close rate, one inline line for the configured
/// highlight statuses (first bold, 0 for any not present), then one bullet
/// per assignee ordered by descending open total with per-status counts
/// ordered by descending count. Ties order by name.
pub fn render_markdown(
    report: &ReportConfig,
    stats: &IssueStats,
    generated_at: DateTime<Local>,
) -> String {
    let stamp = generated_at.format(TIMESTAMP_FORMAT);
    let closed = stats.status_count(&report.closed_status);
    let close_rate = stats.close_rate(&report.closed_status);

    let mut out = format!(
        "**【{} JIRA BUG REPORT {}】**\n\n",
        report.project_name, stamp
    );

    out.push_str(&format!("BUG总数(**{}**)：", stats.total));
    out.push_str(&format!("{}-{}, ", report.closed_status, closed));
    out.push_str(&format!("**关闭率-{close_rate:.2}%**\n\n"));

    if !report.highlight_statuses.is_empty() {
        let highlights: Vec<String> = report
            .highlight_statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let count = stats.status_count(status);
                if i == 0 {
                    format!("**{status}-{count}**")
                } else {
                    format!("{status}-{count}")
                }
            })
            .collect();
        out.push_str(&highlights.join(", "));
        out.push_str("\n\n");
    }

    for (assignee, total) in stats.assignees_by_workload() {
        let breakdown: Vec<String> = stats
            .statuses_for(assignee)
            .iter()
            .map(|(status, count)| format!("{status}-{count}"))
            .collect();
        out.push_str(&format!(
            "- {} (总计: {}): {}\n",
            assignee,
            total,
            breakdown.join(", ")
        ));
    }

    out
}
