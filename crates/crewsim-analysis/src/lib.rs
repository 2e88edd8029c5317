//! # Crewsim Analysis
//!
//! Post-run analysis of simulation traces.
//!
//! A JSON Lines results file is flattened into task and subtask rows. From
//! those rows come misalignment clusters, error tables and a summary report,
//! written out as CSV and text. Span dumps get a separate coverage check.

pub mod clusters;
pub mod coverage;
pub mod error;
pub mod export;
pub mod prelude;
pub mod propagation;
pub mod records;
pub mod report;
