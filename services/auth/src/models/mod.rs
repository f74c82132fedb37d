//! Authentication service models

pub mod user;

// Re-export for convenience
pub use user::{Credentials, NewUser, User, UserSummary};
