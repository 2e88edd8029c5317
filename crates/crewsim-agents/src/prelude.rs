//! Crewsim Agents Prelude: convenient imports for common usage.
//!
//! ```rust
//! use crewsim_agents::prelude::*;
//! ```

// Re-export agent types
pub use crate::coder::{CannedCoder, EchoCoder, FixedCoder, TemplateCoder, TemplateKind};
pub use crate::planner::{FailingPlanner, KeywordPlanner, StaticPlanner};
pub use crate::reviewer::{
    HeuristicReviewer, LengthReviewer, ReviewerConfig, DEFAULT_BANNED_PATTERNS,
};

// Re-export from core
pub use crewsim_core::prelude::*;
