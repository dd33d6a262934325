//! Reconciliation of unavailable products against supplier records, and report output.

pub mod matcher;
pub mod writer;

pub use matcher::{build_report, find_match, first_token};
pub use writer::{write_report, write_rows};
