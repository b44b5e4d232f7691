//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub jira: JiraConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
    pub robot: RobotConfig,
    pub log: LogConfig,
}

/// JIRA server connection and query settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraConfig {
    /// Agile board endpoint, e.g. `https://jira.example.com/rest/agile/1.0/board`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Board to pull issues from. Left unset, `bugle run` refuses to start
    /// and points at `bugle boards` instead of prompting.
    pub board_id: Option<u64>,
    /// Exact issue-type filter, or `All` for every type.
    pub issue_type: String,
    /// Browse-URL prefix issue links are built from. Deployment-specific,
    /// never derived from the payload.
    pub browse_url: String,
    /// Custom field carrying the severity label on this deployment.
    pub severity_field: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

/// Report artifact output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub dir: String,
    /// Master switch for the per-issue exports below.
    pub save_detailed: bool,
    pub save_csv: bool,
    pub save_json: bool,
}

/// Report vocabulary. The terminal status and the statuses called out in
/// the summary line are workflow-specific labels, so they live here rather
/// than in the aggregation code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    pub project_name: String,
    /// Status treated as terminal; issues in it are excluded from the
    /// per-assignee workload breakdown.
    pub closed_status: String,
    /// Statuses rendered inline in the summary, first one bold.
    pub highlight_statuses: Vec<String>,
}

/// DingTalk group robot settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RobotConfig {
    pub webhook_url: String,
    pub access_token: String,
    pub secret: String,
    pub at_user_ids: Vec<String>,
    pub at_mobiles: Vec<String>,
    pub at_all: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub level: String,
    /// Optional log file, appended alongside console output.
    pub file: Option<String>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.jira.validate()?;
        self.output.validate()?;
        self.report.validate()?;
        self.robot.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            jira: JiraConfig::default(),
            output: OutputConfig::default(),
            report: ReportConfig::default(),
            robot: RobotConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl JiraConfig {
    /// Validate JIRA configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::Validation("JIRA base URL cannot be empty".to_string()));
        }

        if self.browse_url.trim().is_empty() {
            return Err(Error::Validation(
                "JIRA browse URL cannot be empty".to_string(),
            ));
        }

        if self.issue_type.trim().is_empty() {
            return Err(Error::Validation(
                "Issue type filter cannot be empty (use 'All' for every type)".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::Validation(
                "Page size must be greater than 0".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(Error::Validation(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jira.example.com/rest/agile/1.0/board".to_string(),
            username: String::new(),
            password: String::new(),
            board_id: None,
            issue_type: "Bug".to_string(),
            browse_url: "https://jira.example.com/browse".to_string(),
            severity_field: "customfield_10254".to_string(),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}

impl OutputConfig {
    /// Validate output configuration
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            return Err(Error::Validation(
                "Output directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "./reports".to_string(),
            save_detailed: true,
            save_csv: true,
            save_json: true,
        }
    }
}

impl ReportConfig {
    /// Validate report configuration
    pub fn validate(&self) -> Result<()> {
        if self.closed_status.trim().is_empty() {
            return Err(Error::Validation(
                "Closed status label cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            closed_status: "关闭".to_string(),
            highlight_statuses: vec![
                "激活".to_string(),
                "回归测试".to_string(),
                "已解决".to_string(),
                "BUG审核".to_string(),
                "结果审核".to_string(),
            ],
        }
    }
}

impl RobotConfig {
    /// Validate robot configuration
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.trim().is_empty() {
            return Err(Error::Validation(
                "Robot webhook URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether enough credentials are present to attempt delivery.
    pub fn is_configured(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.secret.trim().is_empty()
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            webhook_url: "https://oapi.dingtalk.com/robot/send".to_string(),
            access_token: String::new(),
            secret: String::new(),
            at_user_ids: Vec::new(),
            at_mobiles: Vec::new(),
            at_all: false,
        }
    }
}

impl LogConfig {
    /// Validate log configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
