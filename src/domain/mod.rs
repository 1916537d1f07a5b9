//! Domain types for abi-export.
//!
//! - Artifact: a parsed build artifact and the output name mapping

pub mod artifact;

// Re-export commonly used types
pub use artifact::{abi_file_name, ArtifactError, ContractArtifact};
