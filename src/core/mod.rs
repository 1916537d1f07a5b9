//! Core export logic.
//!
//! This module contains:
//! - Walk: Recursive artifact file enumeration
//! - Converter: The batch ABI export

pub mod converter;
pub mod walk;

// Re-export commonly used types
pub use converter::{convert, Converter, ExportError, ExportReport, ExportedAbi};
pub use walk::collect_files;
