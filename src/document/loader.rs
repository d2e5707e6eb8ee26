//! Document loading
//!
//! Opens a .docx container, parses its body, and collects every table it
//! contains in source order. Nothing else from the document survives: the
//! pipeline only consumes tables.

use std::path::Path;

use crate::document::models::{Cell, Document, Row, Table};
use crate::error::{PipelineError, PipelineResult};

use super::io::validate_docx_file;

/// Load all tables from a .docx document.
///
/// Fails with a loading error when the container cannot be opened, the
/// document body cannot be parsed, or the document holds no tables at all.
pub fn load_document(file_path: &Path) -> PipelineResult<Document> {
    validate_docx_file(file_path)?;

    let file_data = std::fs::read(file_path).map_err(|e| {
        PipelineError::Loading(format!("cannot read '{}': {e}", file_path.display()))
    })?;
    let docx = docx_rs::read_docx(&file_data).map_err(|e| {
        PipelineError::Loading(format!(
            "failed to parse '{}': {e:?}",
            file_path.display()
        ))
    })?;

    let mut tables: Document = Vec::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Table(table) = child {
            tables.push(extract_table_rows(table));
        }
    }

    if tables.is_empty() {
        return Err(PipelineError::Loading(format!(
            "no tables found in '{}'",
            file_path.display()
        )));
    }

    Ok(tables)
}

/// Extract the raw text grid from a docx-rs table.
///
/// Each cell's text is the concatenation of its non-empty runs, joined by
/// single spaces. Rows that end up with zero cells are dropped.
fn extract_table_rows(table: &docx_rs::Table) -> Table {
    let mut rows: Table = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut cells: Row = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            cells.push(Cell::Text(extract_cell_text(cell)));
        }

        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    rows
}

fn extract_cell_text(cell: &docx_rs::TableCell) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for content in &cell.children {
        if let docx_rs::TableCellContent::Paragraph(para) = content {
            for para_child in &para.children {
                if let docx_rs::ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let docx_rs::RunChild::Text(text_elem) = run_child {
                            if !text_elem.text.trim().is_empty() {
                                parts.push(&text_elem.text);
                            }
                        }
                    }
                }
            }
        }
    }

    parts.join(" ")
}
