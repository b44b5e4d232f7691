//! Bugle JIRA Integration
//!
//! Client library for fetching board issues from the JIRA Agile REST API.

pub mod auth;
pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::JiraClient;
pub use error::{Error, Result};
pub use extract::{extract_issue, ExtractOptions};
pub use types::*;
