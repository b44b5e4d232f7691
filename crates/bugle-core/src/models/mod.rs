pub mod config;
pub mod issue;

pub use config::{Config, JiraConfig, LogConfig, OutputConfig, ReportConfig, RobotConfig};
pub use issue::{IssueRecord, ALL_TYPES, NONE_SENTINEL, UNASSIGNED_SENTINEL};
