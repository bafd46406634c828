//! Support for the CSV translation matrix.
//!
//! The first record is the header: one key column, optionally a state column,
//! then one column per language. Every following record is one key. Rows may
//! be shorter or longer than the header; missing cells read as empty.
use std::io::BufRead;

use log::warn;

use crate::{config::Config, error::Error, traits::Parser};

/// The logical content of a translation CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMatrix {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TranslationMatrix {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl Parser for TranslationMatrix {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(first) => first?.iter().map(str::to_string).collect(),
            None => Vec::new(),
        };

        let mut matrix = TranslationMatrix::new(header);
        for record in records {
            matrix.add_row(record?.iter().map(str::to_string).collect());
        }
        Ok(matrix)
    }

    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        wtr.write_record(&self.header)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// What a CSV column means for the CSV-to-strings direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub index: usize,
    pub label: String,
    /// Language code, for recognized language columns.
    pub code: Option<String>,
    pub is_default: bool,
    /// Excluded columns are ignored for every data row.
    pub excluded: bool,
    /// Locales this column is written to.
    pub locales: Vec<String>,
}

impl ColumnSpec {
    fn excluded(index: usize, label: &str) -> Self {
        Self {
            index,
            label: label.to_string(),
            code: None,
            is_default: false,
            excluded: true,
            locales: Vec::new(),
        }
    }

    /// Classifies every header column.
    ///
    /// The key and state columns, labels that are not a configured language,
    /// and columns whose locales were all claimed by an earlier column are
    /// excluded. A header with fewer than two columns is rejected.
    pub fn from_header(config: &Config, header: &[String]) -> Result<Vec<ColumnSpec>, Error> {
        if header.len() < 2 {
            return Err(Error::malformed_header(format!(
                "expected at least 2 columns, found {}",
                header.len()
            )));
        }

        let mut claimed: Vec<String> = Vec::new();
        let mut columns = Vec::with_capacity(header.len());

        for (index, label) in header.iter().enumerate() {
            if index == config.key_column || Some(index) == config.state_column {
                columns.push(ColumnSpec::excluded(index, label));
                continue;
            }

            let Some(language) = config.language(label) else {
                warn!("Ignoring column {} ('{}'): not a configured language", index, label);
                columns.push(ColumnSpec::excluded(index, label));
                continue;
            };

            let locales: Vec<String> = language
                .output_locales()
                .into_iter()
                .filter(|locale| !claimed.contains(locale))
                .collect();
            if locales.is_empty() {
                warn!(
                    "Ignoring column {} ('{}'): its locales are already written by an earlier column",
                    index, label
                );
                columns.push(ColumnSpec::excluded(index, label));
                continue;
            }
            claimed.extend(locales.iter().cloned());

            columns.push(ColumnSpec {
                index,
                label: label.clone(),
                code: Some(language.code.clone()),
                is_default: config.is_default_language(label),
                excluded: false,
                locales,
            });
        }

        Ok(columns)
    }
}

/// Index of the first recognized default-language column.
pub fn default_column(columns: &[ColumnSpec]) -> Option<usize> {
    columns
        .iter()
        .find(|column| !column.excluded && column.is_default)
        .map(|column| column.index)
}
