//! # Crewsim Agents
//!
//! Offline implementations of the collaborator roles.
//!
//! - **Coders**: `EchoCoder`, `TemplateCoder`, `CannedCoder`, `FixedCoder`
//! - **Reviewers**: `HeuristicReviewer` (configurable lint rules), `LengthReviewer`
//! - **Planners**: `StaticPlanner`, `KeywordPlanner`, `FailingPlanner`
//!
//! Model-backed planning lives in `crewsim-llm`.

pub mod coder;
pub mod planner;
pub mod prelude;
pub mod reviewer;
