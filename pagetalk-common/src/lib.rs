//! Shared infrastructure for the pagetalk workspace.
//!
//! Currently this is the [`observability`] module: centralised
//! tracing/logging initialisation used by the binary and available to
//! integration tests.

pub mod observability;
