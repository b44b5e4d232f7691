//! Normalized issue data model

use serde::{Deserialize, Serialize};

/// Placeholder written into any field whose source value is absent.
pub const NONE_SENTINEL: &str = "无";

/// Placeholder assignee for issues nobody owns yet.
pub const UNASSIGNED_SENTINEL: &str = "未分配";

/// Wildcard issue-type filter that matches every type.
pub const ALL_TYPES: &str = "All";

/// One issue, flattened from the upstream JIRA payload.
///
/// Every field is a plain string. `key` is guaranteed non-empty by the
/// extractor; all other fields fall back to [`NONE_SENTINEL`] (or
/// [`UNASSIGNED_SENTINEL`] for the assignee) instead of being optional, so
/// downstream aggregation and export never deal with missing values. The
/// serde names double as the CSV/JSON column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRecord {
    pub key: String,
    pub url: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub status: String,
    pub severity: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "foundVersions")]
    pub found_versions: String,
    #[serde(rename = "fixVersions")]
    pub fix_versions: String,
    pub assignee: String,
    pub reporter: String,
    pub title: String,
}

impl IssueRecord {
    /// Check whether the record matches a type filter.
    ///
    /// [`ALL_TYPES`] matches everything; anything else is an exact match.
    pub fn matches_type(&self, filter: &str) -> bool {
        filter == ALL_TYPES || self.issue_type == filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(issue_type: &str) -> IssueRecord {
        IssueRecord {
            key: "PROJ-1".to_string(),
            url: "https://jira.example.com/browse/PROJ-1".to_string(),
            issue_type: issue_type.to_string(),
            status: "激活".to_string(),
            severity: NONE_SENTINEL.to_string(),
            created_at: "2025-08-01T10:00:00.000+0800".to_string(),
            updated_at: "2025-08-02T10:00:00.000+0800".to_string(),
            found_versions: NONE_SENTINEL.to_string(),
            fix_versions: NONE_SENTINEL.to_string(),
            assignee: "张三".to_string(),
            reporter: "李四".to_string(),
            title: "登录页崩溃".to_string(),
        }
    }

    #[test]
    fn test_matches_type_exact() {
        let rec = record("Bug");
        assert!(rec.matches_type("Bug"));
        assert!(!rec.matches_type("Task"));
    }

    #[test]
    fn test_matches_type_wildcard() {
        assert!(record("Bug").matches_type(ALL_TYPES));
        assert!(record("Task").matches_type(ALL_TYPES));
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(record("Bug")).unwrap();
        assert_eq!(json["key"], "PROJ-1");
        assert_eq!(json["type"], "Bug");
        assert_eq!(json["createdAt"], "2025-08-01T10:00:00.000+0800");
        assert_eq!(json["foundVersions"], NONE_SENTINEL);
        assert_eq!(json["fixVersions"], NONE_SENTINEL);
        assert!(json.get("issue_type").is_none());
    }
}
