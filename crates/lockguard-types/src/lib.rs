//! Stable DTOs and IDs used across the lockguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable rule IDs and finding codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    Finding, LockguardData, LockguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Severity, Summary,
    ToolMeta, Verdict,
};
