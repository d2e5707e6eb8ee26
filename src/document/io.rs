//! File validation for input documents
//!
//! Checks that a path really is a readable .docx container before the
//! loader commits to parsing it.

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{PipelineError, PipelineResult};

/// Validates that the file is a legitimate .docx file.
pub(crate) fn validate_docx_file(file_path: &Path) -> PipelineResult<()> {
    if !file_path.exists() {
        return Err(PipelineError::Loading(format!(
            "document path '{}' does not exist",
            file_path.display()
        )));
    }
    if !file_path.is_file() {
        return Err(PipelineError::Loading(format!(
            "'{}' is not a file",
            file_path.display()
        )));
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    if extension != "docx" {
        return Err(PipelineError::Loading(format!(
            "invalid file format: expected a .docx file, got '{}'",
            file_path.display()
        )));
    }

    // Check the ZIP structure contains word/document.xml
    let file = File::open(file_path).map_err(|e| {
        PipelineError::Loading(format!("cannot open '{}': {e}", file_path.display()))
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| {
        PipelineError::Loading(format!(
            "'{}' is not a valid .docx container: {e}",
            file_path.display()
        ))
    })?;

    if archive.by_name("word/document.xml").is_err() {
        // Common mix-up: an .xlsx renamed or picked by mistake
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(PipelineError::Loading(format!(
                "'{}' appears to be an Excel workbook, not a Word document",
                file_path.display()
            )));
        }

        return Err(PipelineError::Loading(format!(
            "invalid .docx file '{}': missing word/document.xml",
            file_path.display()
        )));
    }

    Ok(())
}
