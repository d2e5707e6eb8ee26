//! Run configuration
//!
//! Everything the pipeline needs to know about a run is declarative: where
//! the document lives, which table to pick, how that table is laid out,
//! and what the output should look like. A [`JobConfig`] can be built in
//! code or deserialized from a TOML file; [`JobConfig::validate`] checks
//! every constraint up front so the pipeline itself never sees a bad
//! configuration.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};

/// How to split a transaction row's free-text description.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionParsing {
    /// Number of output fields (counterparty, ID, description by default).
    pub field_count: usize,
    /// Regex identifying the ID token; `None` means "all ASCII digits".
    pub id_pattern: Option<String>,
}

impl Default for TransactionParsing {
    fn default() -> Self {
        Self {
            field_count: 3,
            id_pattern: None,
        }
    }
}

impl TransactionParsing {
    /// Build the ID-token predicate configured for this run.
    pub fn id_matcher(&self) -> PipelineResult<IdMatcher> {
        match &self.id_pattern {
            Some(pattern) => {
                let regex = Regex::new(pattern).map_err(|e| {
                    PipelineError::Config(format!("invalid id_pattern '{pattern}': {e}"))
                })?;
                Ok(IdMatcher::Pattern(regex))
            }
            None => Ok(IdMatcher::Digits),
        }
    }
}

/// Predicate that picks the ID token out of a transaction description.
#[derive(Debug, Clone)]
pub enum IdMatcher {
    /// Token consists entirely of ASCII digits (and is non-empty).
    Digits,
    /// Token matches a configured regular expression.
    Pattern(Regex),
}

impl IdMatcher {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            IdMatcher::Digits => !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()),
            IdMatcher::Pattern(regex) => regex.is_match(token),
        }
    }
}

/// Positional layout of the selected table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableFormat {
    /// Leading rows to skip before the first detail/transaction pair.
    pub header_len: usize,
    /// Trailing rows to skip.
    pub footer_len: usize,
    /// Index of the account cell in a detail row.
    pub account_cell: usize,
    /// Index of the debit cell in a detail row.
    pub debit_cell: usize,
    /// Index of the credit cell in a detail row.
    pub credit_cell: usize,
    pub transaction: TransactionParsing,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            header_len: 3,
            footer_len: 2,
            account_cell: 4,
            debit_cell: 5,
            credit_cell: 6,
            transaction: TransactionParsing::default(),
        }
    }
}

/// Source document location and which of its tables to process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputFormat {
    pub path: PathBuf,
    pub table_index: usize,
}

impl Default for InputFormat {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            table_index: 2,
        }
    }
}

/// Destination path and the named output columns, in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputFormat {
    pub path: PathBuf,
    /// Must match the width of the combined rows exactly.
    pub columns: Vec<String>,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            columns: default_columns(),
        }
    }
}

/// Column names of the statement layout this tool was written for.
fn default_columns() -> Vec<String> {
    [
        "Дата и время совершения текущей операции",
        "№ док.",
        "Код опер",
        "Код",
        "Счет",
        "Дебет",
        "Кредит",
        "Контрагент",
        "УНП",
        "Назначение",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Supported output file kinds, chosen by destination suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// Determine the output kind from the destination suffix.
    pub fn kind(&self) -> PipelineResult<OutputKind> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension {
            "xlsx" => Ok(OutputKind::Xlsx),
            "csv" => Ok(OutputKind::Csv),
            _ => Err(PipelineError::Export(format!(
                "output file '{}' must be .xlsx or .csv",
                self.path.display()
            ))),
        }
    }
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub input: InputFormat,
    pub table: TableFormat,
    pub output: OutputFormat,
}

impl JobConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> PipelineResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&raw)
            .map_err(|e| PipelineError::Config(format!("in '{}': {e}", path.display())))
    }

    /// Parse a configuration from TOML text. Missing sections and fields
    /// fall back to the defaults above.
    pub fn from_toml(raw: &str) -> PipelineResult<Self> {
        toml::from_str(raw).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Check every configuration constraint before the pipeline starts.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(PipelineError::Config("input path is not set".into()));
        }

        if self.table.transaction.field_count == 0 {
            return Err(PipelineError::Config(
                "transaction field_count must be greater than zero".into(),
            ));
        }
        // Reject a bad id_pattern here rather than mid-run.
        self.table.transaction.id_matcher()?;

        if self.output.path.as_os_str().is_empty() {
            return Err(PipelineError::Config("output path is not set".into()));
        }
        if self.output.columns.is_empty() {
            return Err(PipelineError::Config(
                "output columns must not be empty".into(),
            ));
        }
        self.output.kind().map_err(|e| match e {
            PipelineError::Export(msg) => PipelineError::Config(msg),
            other => other,
        })?;

        let parent = match self.output.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            return Err(PipelineError::Config(format!(
                "output directory '{}' does not exist",
                parent.display()
            )));
        }

        Ok(())
    }
}
