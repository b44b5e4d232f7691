//! JIRA Agile API types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of the board issue endpoint.
///
/// Issues stay as raw JSON values here; field extraction happens later so a
/// malformed issue never poisons an otherwise good page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePage {
    #[serde(rename = "startAt", default)]
    pub start_at: u64,
    #[serde(rename = "maxResults", default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub values: Vec<Board>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub board_type: String,
    #[serde(default)]
    pub location: Option<BoardLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLocation {
    #[serde(rename = "projectKey", default)]
    pub project_key: String,
    #[serde(rename = "projectName", default)]
    pub project_name: String,
}
