//! Flattening and persistence of search results.
//!
//! Consumes the search engine's per-lemma reports once a run is complete
//! and turns them into report rows, CSV files, and terminal tables.

pub mod csv;
pub mod rows;
pub mod table;

pub use csv::{render_csv, write_model_csv, ReportError};
pub use rows::{rows_for_model, ReportRow};
pub use table::{render_decided_table, render_table};
