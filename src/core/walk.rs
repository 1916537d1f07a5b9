//! Recursive enumeration of artifact files.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tokio::fs;
use tracing::debug;

use super::converter::ExportError;

type VisitFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ExportError>> + Send + 'a>>;

/// Collect every regular file under `root`.
///
/// Entries are sorted by name within each directory, and a subdirectory's
/// files come before the files of the directory containing it. Symlinks are
/// kept when they point at a regular file; symlinked directories are not
/// descended into.
pub async fn collect_files(root: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut files = Vec::new();
    visit(root.to_path_buf(), &mut files).await?;
    Ok(files)
}

fn visit(dir: PathBuf, files: &mut Vec<PathBuf>) -> VisitFuture<'_> {
    Box::pin(async move {
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|source| ExportError::io(&dir, source))?;

        let mut subdirs = Vec::new();
        let mut here = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| ExportError::io(&dir, source))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| ExportError::io(&path, source))?;

            if file_type.is_dir() {
                subdirs.push(path);
            } else if file_type.is_file() {
                here.push(path);
            } else if file_type.is_symlink() {
                match fs::metadata(&path).await {
                    Ok(meta) if meta.is_file() => here.push(path),
                    _ => debug!(path = %path.display(), "Skipping symlink"),
                }
            } else {
                debug!(path = %path.display(), "Skipping non-regular file");
            }
        }

        subdirs.sort();
        here.sort();

        for subdir in subdirs {
            visit(subdir, files).await?;
        }
        files.extend(here);

        Ok(())
    })
}
