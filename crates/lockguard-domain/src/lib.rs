//! Pure lockfile evaluation (no IO).
//!
//! Input: lockfile and manifest documents decoded elsewhere, plus a run configuration.
//! Output: findings + verdict + severity counts.

#![forbid(unsafe_code)]

pub mod checks;
pub mod fingerprint;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{audit, evaluate, evaluate_records};
pub use fingerprint::fingerprint_for;
pub use normalize::normalize;
pub use report::aggregate;
