//! Integration test suite for octaudit
//!
//! Runs the full analysis pipeline against an in-memory Octopus provider and
//! temp-dir config files, plus binary-level argument checks.

mod fixtures;

mod cli_args;
mod reconciliation;
