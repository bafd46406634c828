#![forbid(unsafe_code)]
//! Keep Apple `.strings` files and a translator-friendly CSV in sync.
//!
//! A CSV translation matrix has one row per key and one column per language.
//! This crate converts per-locale `Localizable.strings` files into such a
//! matrix, and writes the matrix back out as one `.strings` file per locale,
//! repairing the damage spreadsheet tools tend to do to format strings.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use csvstrings::{Config, csv_to_strings, strings_to_csv};
//!
//! let config = Config::load("csvstrings.toml")?;
//!
//! // en.lproj/Localizable.strings, fr.lproj/Localizable.strings, ... → CSV
//! strings_to_csv(&config, &["en.lproj/Localizable.strings", "fr.lproj/Localizable.strings"])?;
//!
//! // CSV → <locale>.lproj/Localizable.strings
//! let summary = csv_to_strings(&config, "Localizable.csv")?;
//! println!("{}", summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;
pub mod repair;
pub mod traits;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, DEFAULT_CONFIG_FILE, LanguageSpec},
    converter::{
        ExportSummary, ImportSummary, build_matrix, csv_to_strings, matrix_to_strings,
        strings_to_csv,
    },
    error::Error,
    formats::{ColumnSpec, Pair, StringsTable, TranslationMatrix},
    repair::repair_value,
};
