//! CLI command implementations.

pub mod analyze;
pub mod coverage;
pub mod init;
pub mod simulate;
