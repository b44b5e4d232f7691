//! Issue aggregation by status and assignee

use std::collections::BTreeMap;

use crate::models::IssueRecord;

/// Aggregated counts for one type-filtered batch of issues.
///
/// `status_totals` covers every status seen in the filtered set.
/// `assignee_stats` and `assignee_totals` only cover issues that are not in
/// the terminal closed status: closed work is finished and would clutter a
/// live workload view, so assignees whose issues are all closed do not
/// appear at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueStats {
    pub total: usize,
    pub status_totals: BTreeMap<String, usize>,
    pub assignee_stats: BTreeMap<String, BTreeMap<String, usize>>,
    pub assignee_totals: BTreeMap<String, usize>,
}

impl IssueStats {
    /// Count for one status, 0 when not present.
    pub fn status_count(&self, status: &str) -> usize {
        self.status_totals.get(status).copied().unwrap_or(0)
    }

    /// Percentage of issues in the closed status, rounded to two decimal
    /// places. An empty batch has a close rate of 0 rather than a division
    /// by zero.
    pub fn close_rate(&self, closed_status: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let closed = self.status_count(closed_status) as f64;
        let rate = closed / self.total as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }

    /// Assignees ordered by descending open-issue count, name ascending on
    /// ties.
    pub fn assignees_by_workload(&self) -> Vec<(&str, usize)> {
        let mut assignees: Vec<(&str, usize)> = self
            .assignee_totals
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();

        assignees.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        assignees
    }

    /// Status counts for one assignee, descending count, status ascending
    /// on ties. Empty for an unknown assignee.
    pub fn statuses_for(&self, assignee: &str) -> Vec<(&str, usize)> {
        let Some(statuses) = self.assignee_stats.get(assignee) else {
            return Vec::new();
        };

        let mut counts: Vec<(&str, usize)> = statuses
            .iter()
            .map(|(status, count)| (status.as_str(), *count))
            .collect();

        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }
}

/// Aggregate normalized issues into status and assignee breakdowns.
///
/// `type_filter` is an exact match on the issue type, with
/// [`crate::models::ALL_TYPES`] matching everything. `closed_status` is the
/// terminal label whose issues are kept in the status totals but excluded
/// from the per-assignee workload.
pub fn aggregate(records: &[IssueRecord], type_filter: &str, closed_status: &str) -> IssueStats {
    let mut stats = IssueStats::default();

    for record in records.iter().filter(|r| r.matches_type(type_filter)) {
        stats.total += 1;
        *stats.status_totals.entry(record.status.clone()).or_default() += 1;

        if record.status != closed_status {
            *stats
                .assignee_stats
                .entry(record.assignee.clone())
                .or_default()
                .entry(record.status.clone())
                .or_default() += 1;
            *stats
                .assignee_totals
                .entry(record.assignee.clone())
                .or_default() += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ALL_TYPES, NONE_SENTINEL, UNASSIGNED_SENTINEL};

    const CLOSED: &str = "关闭";

    fn record(key: &str, issue_type: &str, status: &str, assignee: &str) -> IssueRecord {
        IssueRecord {
            key: key.to_string(),
            url: format!("https://jira.example.com/browse/{key}"),
            issue_type: issue_type.to_string(),
            status: status.to_string(),
            severity: NONE_SENTINEL.to_string(),
            created_at: NONE_SENTINEL.to_string(),
            updated_at: NONE_SENTINEL.to_string(),
            found_versions: NONE_SENTINEL.to_string(),
            fix_versions: NONE_SENTINEL.to_string(),
            assignee: assignee.to_string(),
            reporter: NONE_SENTINEL.to_string(),
            title: NONE_SENTINEL.to_string(),
        }
    }

    #[test]
    fn test_aggregate_filters_by_type() {
        let records = vec![
            record("P-1", "Bug", CLOSED, "张三"),
            record("P-2", "Bug", "激活", "李四"),
            record("P-3", "Task", "激活", "王五"),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.status_count(CLOSED), 1);
        assert_eq!(stats.status_count("激活"), 1);
        assert_eq!(stats.assignee_stats["李四"]["激活"], 1);
        assert_eq!(stats.assignee_totals["李四"], 1);
        assert!(!stats.assignee_totals.contains_key("王五"));
    }

    #[test]
    fn test_aggregate_wildcard_includes_all_types() {
        let records = vec![
            record("P-1", "Bug", "激活", "张三"),
            record("P-2", "Task", "激活", "张三"),
        ];

        let stats = aggregate(&records, ALL_TYPES, CLOSED);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.assignee_totals["张三"], 2);
    }

    #[test]
    fn test_status_totals_sum_to_total() {
        let records = vec![
            record("P-1", "Bug", CLOSED, "张三"),
            record("P-2", "Bug", "激活", "李四"),
            record("P-3", "Bug", "已解决", "李四"),
            record("P-4", "Bug", "激活", UNASSIGNED_SENTINEL),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);
        assert_eq!(stats.status_totals.values().sum::<usize>(), stats.total);
    }

    #[test]
    fn test_assignee_totals_match_breakdowns() {
        let records = vec![
            record("P-1", "Bug", "激活", "李四"),
            record("P-2", "Bug", "已解决", "李四"),
            record("P-3", "Bug", "激活", "张三"),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);
        for (assignee, total) in &stats.assignee_totals {
            let breakdown: usize = stats.assignee_stats[assignee].values().sum();
            assert_eq!(breakdown, *total);
        }
    }

    #[test]
    fn test_closed_only_assignee_is_absent() {
        let records = vec![
            record("P-1", "Bug", CLOSED, "张三"),
            record("P-2", "Bug", CLOSED, "张三"),
            record("P-3", "Bug", "激活", "李四"),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);

        // Absent entirely, not present with a zero count.
        assert!(!stats.assignee_stats.contains_key("张三"));
        assert!(!stats.assignee_totals.contains_key("张三"));
        assert_eq!(stats.status_count(CLOSED), 2);
    }

    #[test]
    fn test_close_rate_empty_batch() {
        let stats = aggregate(&[], "Bug", CLOSED);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.close_rate(CLOSED), 0.0);
    }

    #[test]
    fn test_close_rate_rounding() {
        let mut records = Vec::new();
        for i in 0..3 {
            records.push(record(&format!("C-{i}"), "Bug", CLOSED, "张三"));
        }
        for i in 0..7 {
            records.push(record(&format!("O-{i}"), "Bug", "激活", "李四"));
        }

        let stats = aggregate(&records, "Bug", CLOSED);
        assert_eq!(stats.close_rate(CLOSED), 30.0);

        let third = aggregate(&records[..3], ALL_TYPES, "激活");
        // 0 of 3 closed under a label nobody has.
        assert_eq!(third.close_rate("回归测试"), 0.0);

        let one_of_three = vec![
            record("P-1", "Bug", CLOSED, "张三"),
            record("P-2", "Bug", "激活", "李四"),
            record("P-3", "Bug", "激活", "李四"),
        ];
        let stats = aggregate(&one_of_three, "Bug", CLOSED);
        assert_eq!(stats.close_rate(CLOSED), 33.33);
    }

    #[test]
    fn test_assignees_by_workload_ordering() {
        let records = vec![
            record("P-1", "Bug", "激活", "王五"),
            record("P-2", "Bug", "激活", "李四"),
            record("P-3", "Bug", "已解决", "李四"),
            record("P-4", "Bug", "激活", "张三"),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);
        let ordered = stats.assignees_by_workload();

        // 李四 first on count; 张三 before 王五 alphabetically on the tie.
        assert_eq!(ordered[0], ("李四", 2));
        assert_eq!(ordered[1], ("张三", 1));
        assert_eq!(ordered[2], ("王五", 1));
    }

    #[test]
    fn test_statuses_for_assignee_ordering() {
        let records = vec![
            record("P-1", "Bug", "已解决", "李四"),
            record("P-2", "Bug", "已解决", "李四"),
            record("P-3", "Bug", "激活", "李四"),
        ];

        let stats = aggregate(&records, "Bug", CLOSED);
        assert_eq!(
            stats.statuses_for("李四"),
            vec![("已解决", 2), ("激活", 1)]
        );
        assert!(stats.statuses_for("不存在").is_empty());
    }
}
