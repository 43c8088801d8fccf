//! Zip packaging and on-disk exports.

use crate::{Document, render_pdf};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use whodunit_error::{
    RenderError, RenderErrorKind, StorageError, StorageErrorKind, WhodunitResult,
};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Name of the archive written next to an on-disk export.
pub const ARCHIVE_FILE_NAME: &str = "mystery_complete.zip";

/// Local time as `YYYYMMDD_HHMMSS`.
pub fn export_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Download name of an archive: `mystery_case_<timestamp>.zip`.
pub fn archive_download_name(timestamp: &str) -> String {
    format!("mystery_case_{}.zip", timestamp)
}

/// Render every document to a `(file name, PDF bytes)` pair.
fn render_all(documents: &[Document]) -> WhodunitResult<Vec<(String, Vec<u8>)>> {
    documents
        .iter()
        .map(|document| -> WhodunitResult<(String, Vec<u8>)> {
            Ok((document.file_name(), render_pdf(document)?))
        })
        .collect()
}

fn zip_files(files: &[(String, Vec<u8>)]) -> WhodunitResult<Vec<u8>> {
    let archive_error = |e: &dyn std::fmt::Display| RenderError::new(RenderErrorKind::Archive(e.to_string()));

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, bytes) in files {
        zip.start_file(name.as_str(), options)
            .map_err(|e| archive_error(&e))?;
        zip.write_all(bytes).map_err(|e| archive_error(&e))?;
    }

    let bytes = zip.finish().map_err(|e| archive_error(&e))?.into_inner();
    info!(bytes = bytes.len(), "Packaged archive");
    Ok(bytes)
}

/// Render documents as PDFs and pack them into a deflated zip archive held
/// in memory.
///
/// # Errors
///
/// Returns an error when a PDF or the archive cannot be written.
#[instrument(skip(documents), fields(documents = documents.len()))]
pub fn package_archive(documents: &[Document]) -> WhodunitResult<Vec<u8>> {
    zip_files(&render_all(documents)?)
}

/// Write every document as PDF plus their archive into `<dir>/<timestamp>/`.
///
/// Returns the export directory.
///
/// # Errors
///
/// Returns an error when the directory or a file cannot be written.
#[instrument(skip(documents), fields(dir = %dir.as_ref().display(), documents = documents.len()))]
pub fn write_documents(dir: impl AsRef<Path>, documents: &[Document]) -> WhodunitResult<PathBuf> {
    let export_dir = dir.as_ref().join(export_timestamp());
    std::fs::create_dir_all(&export_dir).map_err(|e| {
        StorageError::new(StorageErrorKind::DirectoryCreation(format!(
            "{}: {}",
            export_dir.display(),
            e
        )))
    })?;

    let write = |path: PathBuf, bytes: &[u8]| -> WhodunitResult<()> {
        std::fs::write(&path, bytes).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", path.display(), e)))
        })?;
        Ok(())
    };

    let files = render_all(documents)?;
    for (name, bytes) in &files {
        write(export_dir.join(name), bytes)?;
    }
    write(export_dir.join(ARCHIVE_FILE_NAME), &zip_files(&files)?)?;

    info!(path = %export_dir.display(), "Export written");
    Ok(export_dir)
}
