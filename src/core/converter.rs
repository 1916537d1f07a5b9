//! Batch conversion of build artifacts into ABI files.
//!
//! The converter is fail-fast: the first unreadable, unparsable or `abi`-less
//! artifact aborts the run. Outputs written before the failure stay on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

use super::walk::collect_files;
use crate::config::ExportConfig;
use crate::domain::{abi_file_name, ArtifactError, ContractArtifact};

/// Errors that abort an export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File name is not valid Unicode: {}", .0.display())]
    InvalidFileName(PathBuf),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn artifact(path: &Path, source: ArtifactError) -> Self {
        Self::Artifact {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One artifact that was exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedAbi {
    /// Artifact the ABI was read from
    pub source: PathBuf,

    /// File the ABI was written to
    pub destination: PathBuf,

    /// Contract name recorded in the artifact, if any
    pub contract_name: Option<String>,

    /// Size of the written ABI in bytes
    pub bytes: u64,
}

/// Result of a completed export run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub exported: Vec<ExportedAbi>,
}

impl ExportReport {
    /// Number of ABI files written
    pub fn len(&self) -> usize {
        self.exported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exported.is_empty()
    }
}

/// Extracts ABIs from every artifact under the input directory
#[derive(Debug, Clone)]
pub struct Converter {
    config: ExportConfig,
}

impl Converter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the export: ensure the output directory, then process each
    /// artifact in traversal order.
    #[instrument(skip(self), fields(
        input = %self.config.input_dir.display(),
        output = %self.config.output_dir.display(),
    ))]
    pub async fn convert(&self) -> Result<ExportReport, ExportError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir)
            .await
            .map_err(|source| ExportError::io(output_dir, source))?;

        let files = collect_files(&self.config.input_dir).await?;
        debug!(count = files.len(), "Found artifact files");

        let mut report = ExportReport::default();
        let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

        for path in files {
            let exported = self.export_file(&path).await?;

            if let Some(previous) = written.insert(exported.destination.clone(), path.clone()) {
                warn!(
                    destination = %exported.destination.display(),
                    previous = %previous.display(),
                    current = %path.display(),
                    "ABI file overwritten by artifact with the same lowercased name"
                );
            }

            report.exported.push(exported);
        }

        info!(count = report.len(), "Export complete");
        Ok(report)
    }

    async fn export_file(&self, path: &Path) -> Result<ExportedAbi, ExportError> {
        let raw_name = path
            .file_name()
            .ok_or_else(|| ExportError::InvalidFileName(path.to_path_buf()))?;
        info!(file = %raw_name.to_string_lossy(), "Exporting ABI");

        let file_name = raw_name
            .to_str()
            .ok_or_else(|| ExportError::InvalidFileName(path.to_path_buf()))?;

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ExportError::io(path, source))?;

        let artifact =
            ContractArtifact::parse(&content).map_err(|source| ExportError::artifact(path, source))?;
        let abi = artifact
            .abi_json()
            .map_err(|source| ExportError::artifact(path, source))?;

        let destination = self.config.output_dir.join(abi_file_name(file_name));
        fs::write(&destination, &abi)
            .await
            .map_err(|source| ExportError::io(&destination, source))?;

        debug!(
            destination = %destination.display(),
            bytes = abi.len(),
            "Wrote ABI"
        );

        Ok(ExportedAbi {
            source: path.to_path_buf(),
            destination,
            contract_name: artifact.contract_name,
            bytes: abi.len() as u64,
        })
    }
}

/// Export every ABI under `input_dir` into `output_dir`
pub async fn convert(
    input_dir: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
) -> Result<ExportReport, ExportError> {
    Converter::new(ExportConfig::new(input_dir, output_dir))
        .convert()
        .await
}
