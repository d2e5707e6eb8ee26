//! The extraction pipeline
//!
//! A fixed, single-pass sequence: load the document, select the table,
//! extract and combine the transaction pairs, export the result. Each
//! stage is a pure function over the complete output of the previous one;
//! the first failure aborts the run and no partial output is written.
//!
//! The per-role transform functions are bound through [`Strategies`], a
//! plain struct of function values, so a caller can swap any role without
//! touching the orchestration.

pub mod extract;
pub mod transform;

use crate::config::{JobConfig, TableFormat};
use crate::document::{Row, load_document};
use crate::error::PipelineResult;
use crate::export::export_table;

pub use extract::{extract_transactions, select_table};

/// Header/footer role: sees the whole table, produces the rows to keep.
pub type EdgeFn = fn(&[Row], &TableFormat) -> PipelineResult<Vec<Row>>;
/// Detail/transaction role: transforms a single row.
pub type RowFn = fn(&[crate::document::Cell], &TableFormat) -> PipelineResult<Row>;
/// Combiner role: splices a processed (detail, transaction) pair.
pub type CombineFn = fn(Row, Row) -> PipelineResult<Row>;

/// The transform functions bound into one run.
pub struct Strategies {
    pub header: EdgeFn,
    pub footer: EdgeFn,
    pub detail: RowFn,
    pub transaction: RowFn,
    pub combine: CombineFn,
}

impl Default for Strategies {
    fn default() -> Self {
        Self {
            header: transform::discard_edge,
            footer: transform::discard_edge,
            detail: transform::transform_detail_row,
            transaction: transform::parse_transaction_row,
            combine: transform::combine_rows,
        }
    }
}

/// Run the whole pipeline with the default strategies.
///
/// Progress lines go through the injected `log` sink; callers decide
/// whether they end up on stdout, in a channel, or nowhere.
pub fn run(job: &JobConfig, log: &mut dyn FnMut(String)) -> PipelineResult<()> {
    run_with(job, &Strategies::default(), log)
}

/// Run the whole pipeline with explicitly bound strategies.
pub fn run_with(
    job: &JobConfig,
    strategies: &Strategies,
    log: &mut dyn FnMut(String),
) -> PipelineResult<()> {
    job.validate()?;

    log(format!("Loading document: {}", job.input.path.display()));
    let document = load_document(&job.input.path)?;

    log(format!("Selecting table {}", job.input.table_index));
    let table = select_table(&document, &job.input)?;

    log("Processing transactions...".to_string());
    let transactions = extract_transactions(strategies, &job.table, table)?;

    log(format!("Exporting to {}", job.output.path.display()));
    export_table(&transactions, &job.output)?;

    log(format!(
        "Successfully exported to {}",
        job.output.path.display()
    ));
    Ok(())
}
