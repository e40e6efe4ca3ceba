//! Core types and functionality for octaudit
//!
//! This module holds the foundation of the audit tool's type system: the error
//! taxonomy and the user-facing error reporting layer used by every other
//! module.
//!
//! # Error Management
//!
//! octaudit uses a two-layer error handling system designed for both developer
//! ergonomics and end-user experience:
//! - **Strongly-typed errors** ([`AuditError`]) for precise error handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - **Automatic error conversion** from common standard library errors
//!
//! Configuration errors abort the whole run before any project is analyzed;
//! file, parse, and lookup errors abort a single project's analysis and leave
//! the batch driver free to continue with the remaining projects.

pub mod error;

pub use error::{AuditError, ErrorContext, user_friendly_error};
