//! Common types and utilities for the xbase compiler core.
//!
//! This crate provides foundational types used across all xbase crates:
//! - Source spans (`Span`)
//! - Dialect configuration (`Dialect`, `DialectOptions`, `Pragma`)
//! - Diagnostics (`Diagnostic`, `DiagnosticBag`, code and message tables)
//! - Compiler limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Dialect configuration shared by binder, solver and checker
pub mod dialect;
pub use dialect::{Dialect, DialectOptions, Pragma};

// Diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
