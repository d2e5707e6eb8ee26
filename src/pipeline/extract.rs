//! Table selection and transaction extraction
//!
//! The orchestrating half of the pipeline: pick the configured table out
//! of the document, slice off header and footer, and walk the body two
//! rows at a time as (detail, transaction) pairs.

use crate::config::{InputFormat, TableFormat};
use crate::document::{Document, Row, Table};
use crate::error::{PipelineError, PipelineResult};

use super::Strategies;

/// Select the configured table from the document.
pub fn select_table<'a>(
    document: &'a Document,
    input: &InputFormat,
) -> PipelineResult<&'a Table> {
    if document.is_empty() {
        return Err(PipelineError::Processing(
            "no tables available in the document".into(),
        ));
    }

    let index = input.table_index;
    let table = document.get(index).ok_or_else(|| {
        PipelineError::Processing(format!(
            "table index {index} out of range (0-{})",
            document.len() - 1
        ))
    })?;

    if table.is_empty() {
        return Err(PipelineError::Processing(format!(
            "selected table {index} is empty"
        )));
    }

    Ok(table)
}

/// Extract the combined transaction rows from the selected table.
///
/// The body window is the table minus its header and footer rows.
/// Consecutive body rows are treated as (detail, transaction) pairs; the
/// loop stops once fewer than two rows remain, so an odd-sized body drops
/// its final unpaired row. The result is header rows, then combined rows,
/// then footer rows, as produced by the bound strategies.
pub fn extract_transactions(
    strategies: &Strategies,
    format: &TableFormat,
    table: &Table,
) -> PipelineResult<Table> {
    if table.is_empty() {
        return Err(PipelineError::Processing("table is empty".into()));
    }

    let min_rows = format.header_len + format.footer_len;
    if table.len() < min_rows {
        return Err(PipelineError::Processing(format!(
            "table has {} rows, needs at least {min_rows}",
            table.len()
        )));
    }

    let header = (strategies.header)(table, format)?;
    let footer = (strategies.footer)(table, format)?;

    let body_start = format.header_len;
    let body_end = table.len() - format.footer_len;

    let mut transactions: Table = Vec::new();
    let mut i = body_start;
    while i + 1 < body_end {
        let combined = process_pair(strategies, format, table, i)
            .map_err(|e| PipelineError::Processing(format!("rows {i}-{}: {e}", i + 1)))?;
        transactions.push(combined);
        i += 2;
    }

    let mut result = header;
    result.extend(transactions);
    result.extend(footer);
    Ok(result)
}

fn process_pair(
    strategies: &Strategies,
    format: &TableFormat,
    table: &Table,
    i: usize,
) -> PipelineResult<Row> {
    let detail = (strategies.detail)(&table[i], format)?;
    let transaction = (strategies.transaction)(&table[i + 1], format)?;
    (strategies.combine)(detail, transaction)
}
