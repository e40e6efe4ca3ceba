//! Error handling for octaudit
//!
//! This module provides the error types and user-friendly error reporting for
//! the variable audit tool. The error system is designed around two layers:
//! 1. **Strongly-typed errors** ([`AuditError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! # Error Categories
//!
//! Audit errors fall into a few categories with different blast radii:
//! - **Configuration**: [`AuditError::MissingServerUrl`],
//!   [`AuditError::MissingApiKey`], [`AuditError::ConfigParseError`] - fatal at
//!   startup, before any project is analyzed.
//! - **Per-project I/O**: [`AuditError::ConfigFileRead`] - a required file for
//!   one project is missing or unreadable; other projects may still run.
//! - **Per-project parsing**: [`AuditError::AppSettingsParse`] - the Web.config
//!   document is malformed or lacks the expected section.
//! - **Lookup**: [`AuditError::ProjectNotFound`] - the named project does not
//!   exist on the Octopus server.
//! - **Transport**: [`AuditError::ApiRequest`] - the Octopus REST API could not
//!   be reached or answered with a non-success status.
//!
//! # Error Conversion and Context
//!
//! Common standard library errors are automatically converted:
//! - [`std::io::Error`] → [`AuditError::IoError`]
//! - [`toml::de::Error`] → [`AuditError::TomlError`]
//!
//! Use [`user_friendly_error`] at the CLI boundary to convert any error into a
//! displayable [`ErrorContext`] with contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use octaudit::core::{AuditError, user_friendly_error};
//!
//! fn lookup() -> Result<(), AuditError> {
//!     Err(AuditError::ProjectNotFound { name: "Billing".to_string() })
//! }
//!
//! if let Err(e) = lookup() {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display(); // Colored error + suggestion on stderr
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for octaudit operations
///
/// Each variant represents a specific failure mode with enough context (paths,
/// names, URLs) for the user to act on. Configuration variants abort the whole
/// run; file, parse and lookup variants abort only the current project's
/// analysis, leaving the batch driver free to continue with other projects.
#[derive(Error, Debug)]
pub enum AuditError {
    /// No Octopus server URL was supplied via flag, environment or config file
    #[error("Octopus server URL must be provided (--server-url, OCTOPUS_URL, or config file)")]
    MissingServerUrl,

    /// No API key was supplied via flag, environment or config file
    #[error("Octopus API key must be provided (--api-key, OCTOPUS_API_KEY, or config file)")]
    MissingApiKey,

    /// `--project-name` was given without `--config-dir`
    #[error("--project-name must be used in combination with --config-dir")]
    ProjectNameRequiresDir,

    /// The global configuration file exists but could not be parsed
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path of the configuration file that failed to parse
        file: String,
        /// Parser-provided reason
        reason: String,
    },

    /// A required per-project file (Web.Release.config / Web.config) could not be read
    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        /// Path of the file that could not be read
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The Web.config document is malformed or missing its appSettings section
    #[error("Failed to parse app settings in {path}: {reason}")]
    AppSettingsParse {
        /// Path of the offending document
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// The named project does not exist on the Octopus server
    #[error("Project '{name}' not found on the Octopus server")]
    ProjectNotFound {
        /// The project name that was looked up
        name: String,
    },

    /// An Octopus REST API request failed or returned a non-success status
    #[error("Octopus API request failed: {url}: {reason}")]
    ApiRequest {
        /// The request URL
        url: String,
        /// Transport error or HTTP status description
        reason: String,
    },

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Catch-all for errors without a dedicated variant
    #[error("{message}")]
    Other {
        /// Description of the failure
        message: String,
    },
}

/// Wrapper that pairs an [`AuditError`] with user-facing help text
///
/// The context carries an optional suggestion (an actionable step, shown in
/// green) and optional details (background on why the error occurred, shown in
/// yellow). This is the type the CLI ultimately displays.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying audit error
    pub error: AuditError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: AuditError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add background details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// Color coding matches the rest of the CLI: the error message is red and
    /// bold, details are yellow, the suggestion is green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Map a typed [`AuditError`] to an [`ErrorContext`] with tailored help text
fn create_error_context(error: AuditError) -> ErrorContext {
    match &error {
        AuditError::MissingServerUrl => ErrorContext::new(error)
            .with_suggestion(
                "Pass --server-url https://octopus.example.com, set OCTOPUS_URL, or add \
                 server_url to ~/.octaudit/config.toml",
            )
            .with_details("octaudit needs the Octopus server address before it can query projects"),
        AuditError::MissingApiKey => ErrorContext::new(error)
            .with_suggestion(
                "Pass --api-key API-XXXX, set OCTOPUS_API_KEY, or add api_key to \
                 ~/.octaudit/config.toml",
            )
            .with_details("API keys are created under your user profile on the Octopus server"),
        AuditError::ProjectNameRequiresDir => ErrorContext::new(error).with_suggestion(
            "Add --config-dir pointing at the directory holding Web.Release.config and Web.config",
        ),
        AuditError::ConfigParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax: quotes, brackets, and table headers"),
        AuditError::ConfigFileRead { path, .. } => {
            let path = path.clone();
            ErrorContext::new(error)
                .with_suggestion(format!("Check that '{path}' exists and is readable"))
                .with_details(
                    "Each audited project needs Web.Release.config and Web.config in its \
                     configured directory",
                )
        }
        AuditError::AppSettingsParse { .. } => ErrorContext::new(error).with_suggestion(
            "Web.config must be well-formed XML with a configuration/appSettings section",
        ),
        AuditError::ProjectNotFound { name } => {
            let name = name.clone();
            ErrorContext::new(error).with_suggestion(format!(
                "Check the spelling of '{name}' against the project list on the Octopus dashboard"
            ))
        }
        AuditError::ApiRequest { .. } => ErrorContext::new(error)
            .with_suggestion("Check the server URL, your network connection, and the API key's permissions"),
        _ => ErrorContext::new(error),
    }
}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// Downcasts known error types to attach tailored suggestions; everything else
/// is rendered with its full `anyhow` cause chain so nothing is lost.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Take ownership of a typed audit error rather than cloning it
    let error = match error.downcast::<AuditError>() {
        Ok(audit_error) => return create_error_context(audit_error),
        Err(original) => original,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AuditError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership or run with elevated permissions")
                .with_details("octaudit did not have permission to read a required file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AuditError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(AuditError::ConfigParseError {
            file: "config.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in your octaudit configuration file");
    }

    // Generic error - include the full cause chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AuditError::Other { message })
}
