//! Export of the final table
//!
//! Writes the processed rows under the configured column names, either as
//! a single-sheet .xlsx workbook or as a .csv file; the destination suffix
//! decides which. Column count is validated against the first row only.

use rust_xlsxwriter::Workbook;

use crate::config::{OutputFormat, OutputKind};
use crate::document::{Cell, Table};
use crate::error::{PipelineError, PipelineResult};

/// Write the table to the configured destination, one record per row,
/// with the column names as the header row.
pub fn export_table(table: &Table, output: &OutputFormat) -> PipelineResult<()> {
    if table.is_empty() {
        return Err(PipelineError::Export("cannot export an empty table".into()));
    }

    let width = table[0].len();
    if width != output.columns.len() {
        return Err(PipelineError::Export(format!(
            "table has {width} columns but {} column names were provided",
            output.columns.len()
        )));
    }

    match output.kind()? {
        OutputKind::Xlsx => write_xlsx(table, output),
        OutputKind::Csv => write_csv(table, output),
    }
}

fn write_xlsx(table: &Table, output: &OutputFormat) -> PipelineResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in output.columns.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, name)
            .map_err(|e| PipelineError::Export(format!("failed to write header: {e}")))?;
    }

    for (row_index, row) in table.iter().enumerate() {
        let sheet_row = (row_index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => worksheet.write_string(sheet_row, col, text),
                Cell::Number(value) => worksheet.write_number(sheet_row, col, *value),
            }
            .map_err(|e| {
                PipelineError::Export(format!("failed to write row {row_index}: {e}"))
            })?;
        }
    }

    workbook.save(&output.path).map_err(|e| {
        PipelineError::Export(format!(
            "failed to save '{}': {e}",
            output.path.display()
        ))
    })
}

fn write_csv(table: &Table, output: &OutputFormat) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(&output.path).map_err(|e| {
        PipelineError::Export(format!(
            "cannot open '{}' for writing: {e}",
            output.path.display()
        ))
    })?;

    writer
        .write_record(&output.columns)
        .map_err(|e| PipelineError::Export(format!("failed to write header: {e}")))?;

    for row in table {
        let record: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        writer
            .write_record(&record)
            .map_err(|e| PipelineError::Export(format!("failed to write record: {e}")))?;
    }

    // Check for errors rather than implicitly flushing and ignoring.
    writer
        .flush()
        .map_err(|e| PipelineError::Export(format!("failed to flush csv: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Row;
    use std::path::PathBuf;

    fn sample_table() -> Table {
        vec![
            vec![Cell::from("acc1"), Cell::Number(1000.5)],
            vec![Cell::from("acc2"), Cell::Number(0.0)],
        ]
    }

    fn output(path: PathBuf, columns: &[&str]) -> OutputFormat {
        OutputFormat {
            path,
            columns: columns.iter().map(|&c| c.to_string()).collect(),
        }
    }

    #[test]
    fn empty_table_is_an_export_error() {
        let out = output(PathBuf::from("out.csv"), &["a"]);
        assert!(matches!(
            export_table(&Vec::new(), &out),
            Err(PipelineError::Export(_))
        ));
    }

    #[test]
    fn column_count_mismatch_is_an_export_error() {
        let table: Table = vec![vec![
            Cell::from("a"),
            Cell::from("b"),
            Cell::from("c"),
            Cell::from("d"),
            Cell::from("e"),
        ]];
        let out = output(PathBuf::from("out.csv"), &["1", "2", "3", "4"]);
        let err = export_table(&table, &out).unwrap_err();
        assert!(err.to_string().contains("5 columns but 4"));
    }

    #[test]
    fn only_the_first_row_width_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let ragged: Table = vec![
            vec![Cell::from("a"), Cell::from("b")],
            vec![Cell::from("only one")],
        ];
        let out = output(dir.path().join("ragged.csv"), &["x", "y"]);
        export_table(&ragged, &out).unwrap();
    }

    #[test]
    fn unsupported_suffix_is_an_export_error() {
        let out = output(PathBuf::from("out.txt"), &["a", "b"]);
        assert!(matches!(
            export_table(&sample_table(), &out),
            Err(PipelineError::Export(_))
        ));
    }

    #[test]
    fn csv_export_writes_header_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let out = output(path.clone(), &["account", "debit"]);

        export_table(&sample_table(), &out).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["account,debit", "acc1,1000.5", "acc2,0"]);
    }

    #[test]
    fn xlsx_export_saves_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let out = output(path.clone(), &["account", "debit"]);

        export_table(&sample_table(), &out).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn csv_write_failure_is_wrapped() {
        let row: Row = vec![Cell::from("a")];
        let out = output(PathBuf::from("no/such/dir/out.csv"), &["a"]);
        assert!(matches!(
            export_table(&vec![row], &out),
            Err(PipelineError::Export(_))
        ));
    }
}
