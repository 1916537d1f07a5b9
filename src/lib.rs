//! abi-export - Extract contract ABIs from build artifacts
//!
//! Walks a directory of compiled-contract build artifacts (the JSON files a
//! toolchain such as Truffle writes to `build/contracts/`), pulls the `abi`
//! field out of each one and writes it to a flat output directory under the
//! lowercased file name.
//!
//! # Modules
//!
//! - `domain`: Single-artifact operations (parse, extract, name mapping)
//! - `core`: Directory walk and the batch converter
//! - `config`: Path configuration (flags, env, config file, defaults)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Export ./build/contracts/*.json -> ./abi/
//! abi-export
//!
//! # Custom locations
//! abi-export --input out/contracts --output frontend/abi
//!
//! # Show resolved paths
//! abi-export config
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use config::ExportConfig;
pub use self::core::{convert, Converter, ExportError, ExportReport, ExportedAbi};
pub use domain::{abi_file_name, ArtifactError, ContractArtifact};
