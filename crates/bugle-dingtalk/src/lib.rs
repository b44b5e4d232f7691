//! Bugle DingTalk Integration
//!
//! Client library for delivering Markdown messages to a DingTalk group
//! robot webhook with signed authentication.

pub mod client;
pub mod error;
pub mod sign;
pub mod types;

pub use client::{RobotClient, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use types::*;
