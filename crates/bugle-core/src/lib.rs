pub mod error;
pub mod models;
pub mod report;
pub mod stats;
pub mod storage;

pub use error::{Error, Result};
