//! Document loading and data structures
//!
//! This module turns a .docx file into the pipeline's in-memory
//! representation: a list of tables of rows of cells.

pub(crate) mod io;
pub mod loader;
pub mod models;

pub use loader::load_document;
pub use models::*;
