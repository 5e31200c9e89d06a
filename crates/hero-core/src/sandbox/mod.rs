//! Self-contained collaborators for headless runs and tests.

pub mod host;
pub mod session;
