//! doxtract: extract transaction tables from .docx statements
//!
//! This library locates a configured table inside a Word document, pairs
//! its detail/transaction rows, normalizes cell formats, and exports the
//! result as an .xlsx workbook or a .csv file. The whole pipeline is
//! driven by a declarative [`config::JobConfig`].

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod runner;

// Re-export commonly used types
pub use config::{InputFormat, JobConfig, OutputFormat, TableFormat, TransactionParsing};
pub use document::{Cell, Document, Row, Table, load_document};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Strategies, run};
pub use runner::RunEvent;
