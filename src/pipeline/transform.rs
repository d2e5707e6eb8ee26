//! Row and cell transforms
//!
//! The per-row halves of the pipeline: cell normalization for detail rows,
//! description parsing for transaction rows, and the combiner that splices
//! a processed pair into one output row. Every transform copies; the
//! original rows are never touched.

use crate::config::TableFormat;
use crate::document::{Cell, Row};
use crate::error::{PipelineError, PipelineResult};

/// Default header/footer extractor: those rows are skipped, not captured.
pub fn discard_edge(_table: &[Row], _format: &TableFormat) -> PipelineResult<Vec<Row>> {
    Ok(Vec::new())
}

/// Remove space characters from a text cell ("12 34 56" becomes "123456").
pub fn strip_spaces(cell: &Cell) -> PipelineResult<Cell> {
    let text = expect_text(cell)?;
    Ok(Cell::Text(text.replace(' ', "")))
}

/// Parse a locale-formatted decimal out of a text cell.
///
/// Spaces are thousands separators and a comma is the decimal mark, so
/// "1 234,56" parses to 1234.56. An empty cell counts as zero.
pub fn parse_decimal(cell: &Cell) -> PipelineResult<Cell> {
    let text = expect_text(cell)?;
    if text.is_empty() {
        return Ok(Cell::Number(0.0));
    }

    let normalized = text.replace(' ', "").replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| {
        PipelineError::Processing(format!("cannot parse '{text}' as a decimal"))
    })?;
    Ok(Cell::Number(value))
}

/// Transform a detail row: strip the account cell and parse the debit and
/// credit cells as decimals. The configured indices must all fall inside
/// the row.
pub fn transform_detail_row(row: &[Cell], format: &TableFormat) -> PipelineResult<Row> {
    validate_cell_index(row, format.account_cell, "account")?;
    validate_cell_index(row, format.debit_cell, "debit")?;
    validate_cell_index(row, format.credit_cell, "credit")?;

    let mut out = row.to_vec();
    out[format.account_cell] = strip_spaces(&row[format.account_cell])?;
    out[format.debit_cell] = parse_decimal(&row[format.debit_cell])?;
    out[format.credit_cell] = parse_decimal(&row[format.credit_cell])?;
    Ok(out)
}

/// Parse a transaction row's free-text first cell into the configured
/// number of fields.
///
/// The text is split on spaces and scanned left to right for the first
/// token the ID predicate accepts: everything before it becomes the
/// counterparty, the token itself the ID, everything after it the
/// description. With no matching token the whole text lands in the
/// counterparty field. An empty or missing first cell yields all-empty
/// fields.
pub fn parse_transaction_row(row: &[Cell], format: &TableFormat) -> PipelineResult<Row> {
    let parsing = &format.transaction;
    let empty_fields = || vec![Cell::Text(String::new()); parsing.field_count];

    let Some(first) = row.first() else {
        return Ok(empty_fields());
    };
    let text = expect_text(first)?;
    if text.is_empty() {
        return Ok(empty_fields());
    }

    let matcher = parsing.id_matcher()?;
    let tokens: Vec<&str> = text.split(' ').collect();
    let mut fields = empty_fields();

    match tokens.iter().position(|token| matcher.matches(token)) {
        Some(id_pos) => {
            if parsing.field_count < 3 {
                return Err(PipelineError::Processing(format!(
                    "field_count {} cannot hold counterparty, ID and description",
                    parsing.field_count
                )));
            }
            fields[0] = Cell::Text(tokens[..id_pos].join(" ").trim().to_string());
            fields[1] = Cell::Text(tokens[id_pos].to_string());
            fields[2] = Cell::Text(tokens[id_pos + 1..].join(" ").trim().to_string());
        }
        None => {
            fields[0] = Cell::Text(text.trim().to_string());
        }
    }

    Ok(fields)
}

/// Splice a processed detail row and its transaction row into one output
/// row, detail cells first.
pub fn combine_rows(detail: Row, transaction: Row) -> PipelineResult<Row> {
    if detail.is_empty() {
        return Err(PipelineError::Processing("detail row is empty".into()));
    }
    if transaction.is_empty() {
        return Err(PipelineError::Processing("transaction row is empty".into()));
    }

    let mut combined = detail;
    combined.extend(transaction);
    Ok(combined)
}

fn expect_text(cell: &Cell) -> PipelineResult<&str> {
    cell.as_text().ok_or_else(|| {
        PipelineError::Processing(format!("expected a text cell, got a {} cell", cell.kind()))
    })
}

fn validate_cell_index(row: &[Cell], index: usize, what: &str) -> PipelineResult<()> {
    if row.is_empty() {
        return Err(PipelineError::Processing(format!("{what} cell: row is empty")));
    }
    if index >= row.len() {
        return Err(PipelineError::Processing(format!(
            "{what} cell index {index} out of range (0-{})",
            row.len() - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransactionParsing;

    fn text_row(cells: &[&str]) -> Row {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn strip_spaces_removes_all_spaces() {
        assert_eq!(
            strip_spaces(&Cell::from("12 34 56")).unwrap(),
            Cell::from("123456")
        );
    }

    #[test]
    fn strip_spaces_rejects_number_cells() {
        assert!(matches!(
            strip_spaces(&Cell::from(1.0)),
            Err(PipelineError::Processing(_))
        ));
    }

    #[test]
    fn parse_decimal_handles_locale_format() {
        assert_eq!(
            parse_decimal(&Cell::from("1 234,56")).unwrap(),
            Cell::Number(1234.56)
        );
    }

    #[test]
    fn parse_decimal_maps_empty_to_zero() {
        assert_eq!(parse_decimal(&Cell::from("")).unwrap(), Cell::Number(0.0));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        let err = parse_decimal(&Cell::from("n/a")).unwrap_err();
        assert!(err.to_string().contains("n/a"));
    }

    #[test]
    fn detail_row_normalizes_configured_cells() {
        let format = TableFormat {
            account_cell: 1,
            debit_cell: 2,
            credit_cell: 3,
            ..TableFormat::default()
        };
        let row = text_row(&["01.02.2024", "30 12 345", "1 000,50", ""]);

        let out = transform_detail_row(&row, &format).unwrap();
        assert_eq!(out[0], Cell::from("01.02.2024"));
        assert_eq!(out[1], Cell::from("3012345"));
        assert_eq!(out[2], Cell::Number(1000.5));
        assert_eq!(out[3], Cell::Number(0.0));
        // original row untouched
        assert_eq!(row[1], Cell::from("30 12 345"));
    }

    #[test]
    fn detail_row_error_names_the_offending_index() {
        let format = TableFormat {
            account_cell: 0,
            debit_cell: 7,
            credit_cell: 1,
            ..TableFormat::default()
        };
        let err = transform_detail_row(&text_row(&["a", "b"]), &format).unwrap_err();
        assert!(err.to_string().contains("debit cell index 7"));
    }

    #[test]
    fn transaction_row_splits_around_the_id_token() {
        let format = TableFormat::default();
        let row = text_row(&["ACME CO 12345 monthly fee"]);

        let fields = parse_transaction_row(&row, &format).unwrap();
        assert_eq!(
            fields,
            text_row(&["ACME CO", "12345", "monthly fee"])
        );
    }

    #[test]
    fn transaction_row_without_id_keeps_everything_in_counterparty() {
        let format = TableFormat::default();
        let fields =
            parse_transaction_row(&text_row(&["ACME CO monthly fee"]), &format).unwrap();
        assert_eq!(fields, text_row(&["ACME CO monthly fee", "", ""]));
    }

    #[test]
    fn transaction_row_empty_cell_yields_empty_fields() {
        let format = TableFormat::default();
        assert_eq!(
            parse_transaction_row(&text_row(&[""]), &format).unwrap(),
            text_row(&["", "", ""])
        );
        assert_eq!(
            parse_transaction_row(&[], &format).unwrap(),
            text_row(&["", "", ""])
        );
    }

    #[test]
    fn transaction_row_honours_a_custom_id_pattern() {
        let mut format = TableFormat::default();
        format.transaction = TransactionParsing {
            field_count: 3,
            id_pattern: Some("^[A-Z]{2}[0-9]{4}$".into()),
        };
        let fields =
            parse_transaction_row(&text_row(&["ACME CO AB1234 monthly fee"]), &format).unwrap();
        assert_eq!(fields, text_row(&["ACME CO", "AB1234", "monthly fee"]));
    }

    #[test]
    fn transaction_row_rejects_number_first_cell() {
        let format = TableFormat::default();
        let row = vec![Cell::from(1.0)];
        assert!(matches!(
            parse_transaction_row(&row, &format),
            Err(PipelineError::Processing(_))
        ));
    }

    #[test]
    fn combine_rows_concatenates_in_order() {
        let combined =
            combine_rows(text_row(&["a", "b"]), text_row(&["c"])).unwrap();
        assert_eq!(combined, text_row(&["a", "b", "c"]));
    }

    #[test]
    fn combine_rows_rejects_empty_sides() {
        assert!(combine_rows(Vec::new(), text_row(&["c"])).is_err());
        assert!(combine_rows(text_row(&["a"]), Vec::new()).is_err());
    }
}
