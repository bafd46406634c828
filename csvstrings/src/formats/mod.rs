//! The two file formats handled by csvstrings.
//!
//! - [`strings`]: per-locale Apple `.strings` files.
//! - [`csv`]: the multi-language CSV translation matrix.

pub mod csv;
pub mod strings;

// Reexporting the formats for easier access
pub use csv::{ColumnSpec, TranslationMatrix};
pub use strings::{Pair, StringsTable};
