//! # Bloglist Core
//!
//! The domain layer of the bloglist service.
//! Entities, validation rules, post statistics and the ownership guard live
//! here, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod guard;
pub mod ports;
pub mod stats;
pub mod validation;

pub use error::DomainError;
pub use guard::{DeleteDecision, DenyReason, authorize_delete};
pub use stats::PostStats;
