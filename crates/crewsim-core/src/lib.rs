//! # Crewsim Core
//!
//! Core data model and collaborator traits for the crewsim task pipeline.
//!
//! A simulated software team works through synthetic backend feature
//! requests. This crate defines the shapes every other crate agrees on:
//!
//! - **Types**: `TaskResult`, `SubtaskResult`, `Verdict`, `WorkflowStep`
//! - **Agents**: one single-method trait per role: `Planner`, `Coder`,
//!   `Reviewer`, `SimilarityScorer`
//! - **Spans**: the `SpanRecorder` hook interface used for hierarchical tracing
//! - **Catalog**: ambiguity phrases, canned bad-code snippets, fallback workflows
//! - **Text**: comment stripping and whitespace normalisation shared by scorer and reviewer
//!
//! ## Quick Start
//!
//! ```rust
//! use crewsim_core::prelude::*;
//!
//! let workflow = fallback_workflow("Add payment processing system");
//! assert_eq!(workflow[0], "Integrate payment gateway");
//!
//! let verdict = Verdict::from_approved(true);
//! assert!(verdict.is_approved());
//! ```

pub mod agent;
pub mod catalog;
pub mod error;
pub mod prelude;
pub mod span;
pub mod text;
pub mod types;
