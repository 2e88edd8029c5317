//! Crewsim Analysis Prelude: convenient imports for common usage.
//!
//! ```rust
//! use crewsim_analysis::prelude::*;
//! ```

pub use crate::clusters::{cluster_counts, MisalignmentCluster};
pub use crate::coverage::{load_span_coverage, span_coverage, CoverageReport, CoverageRow};
pub use crate::error::AnalysisError;
pub use crate::export::{write_analysis, ANALYSIS_FILES};
pub use crate::propagation::{error_propagation, outcome_errors, OutcomeErrorRow, TaskPropagation};
pub use crate::records::{load_records, SubtaskRow, TaskRow, TraceData};
pub use crate::report::AnalysisSummary;
