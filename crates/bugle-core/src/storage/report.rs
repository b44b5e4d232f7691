//! Report artifact storage (Markdown, CSV, JSON)

use crate::{models::IssueRecord, report::TIMESTAMP_FORMAT, Result};
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Base name for the rendered Markdown report file.
pub const REPORT_BASENAME: &str = "jira_issue_report";
/// Base name for the detailed issue dump files.
pub const ISSUES_BASENAME: &str = "jira_issues";

pub struct ReportStorage {
    output_dir: PathBuf,
}

impl ReportStorage {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Build `{base}_{project}_{YYYYMMDDHHmm}.{ext}`.
    pub fn artifact_filename(
        base: &str,
        project_name: &str,
        generated_at: DateTime<Local>,
        extension: &str,
    ) -> String {
        let stamp = generated_at.format(TIMESTAMP_FORMAT);
        format!("{base}_{project_name}_{stamp}.{extension}")
    }

    pub fn save_markdown(
        &self,
        project_name: &str,
        generated_at: DateTime<Local>,
        content: &str,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let filename =
            Self::artifact_filename(REPORT_BASENAME, project_name, generated_at, "md");
        let path = self.output_dir.join(filename);
        std::fs::write(&path, content)?;

        Ok(path)
    }

    pub fn save_csv(
        &self,
        project_name: &str,
        generated_at: DateTime<Local>,
        records: &[IssueRecord],
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let filename =
            Self::artifact_filename(ISSUES_BASENAME, project_name, generated_at, "csv");
        let path = self.output_dir.join(filename);

        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(path)
    }

    pub fn save_json(
        &self,
        project_name: &str,
        generated_at: DateTime<Local>,
        records: &[IssueRecord],
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let filename =
            Self::artifact_filename(ISSUES_BASENAME, project_name, generated_at, "json");
        let path = self.output_dir.join(filename);

        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, content)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NONE_SENTINEL;
    use chrono::TimeZone;

    fn record(key: &str) -> IssueRecord {
        IssueRecord {
            key: key.to_string(),
            url: format!("https://jira.example.com/browse/{key}"),
            issue_type: "Bug".to_string(),
            status: "激活".to_string(),
            severity: "严重".to_string(),
            created_at: "2025-08-20T10:00:00.000+0800".to_string(),
            updated_at: "2025-08-21T10:00:00.000+0800".to_string(),
            found_versions: "1.0".to_string(),
            fix_versions: NONE_SENTINEL.to_string(),
            assignee: "李四".to_string(),
            reporter: "张三".to_string(),
            title: "登录失败".to_string(),
        }
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 8, 25, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_artifact_filename_format() {
        let name =
            ReportStorage::artifact_filename(REPORT_BASENAME, "星舰", fixed_time(), "md");
        assert_eq!(name, "jira_issue_report_星舰_202508250930.md");

        let name = ReportStorage::artifact_filename(ISSUES_BASENAME, "星舰", fixed_time(), "csv");
        assert_eq!(name, "jira_issues_星舰_202508250930.csv");
    }

    #[test]
    fn test_save_markdown_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReportStorage::new(dir.path().join("reports"));

        let path = storage
            .save_markdown("星舰", fixed_time(), "**report**\n")
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "**report**\n");
    }

    #[test]
    fn test_save_csv_writes_renamed_headers() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReportStorage::new(dir.path().to_path_buf());

        let path = storage
            .save_csv("星舰", fixed_time(), &[record("B-1"), record("B-2")])
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "key,url,type,status,severity,createdAt,updatedAt,foundVersions,fixVersions,assignee,reporter,title"
        );
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_save_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReportStorage::new(dir.path().to_path_buf());
        let records = vec![record("B-1")];

        let path = storage.save_json("星舰", fixed_time(), &records).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<IssueRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }
}
