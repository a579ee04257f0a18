//! Campaign Loader common types, IDs, and errors.
//!
//! This crate provides foundational types shared across cl-core modules:
//! - Platform identity types
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod uri;

pub use error::{Error, Result};
pub use id::PlatformId;
pub use output::OutputFormat;
