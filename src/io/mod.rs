//! I/O module
//!
//! Concrete collaborators and file formats around the engine.
//!
//! # Components
//!
//! - `memory_store` - In-memory preference store (tests, embedding)
//! - `file_store` - One-JSON-file-per-key preference store
//! - `layout` - Column layout and row files used by the CLI
//! - `csv_format` - CSV output of an export projection

pub mod csv_format;
pub mod file_store;
pub mod layout;
pub mod memory_store;

pub use csv_format::write_export_csv;
pub use file_store::FilePreferenceStore;
pub use layout::{parse_layout, read_layout, read_rows};
pub use memory_store::MemoryPreferenceStore;
