//! The two conversion pipelines.
//!
//! - [`strings_to_csv`]: per-locale `.strings` files → one CSV matrix.
//! - [`csv_to_strings`]: one CSV matrix → a `Localizable.strings` per locale.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    config::Config,
    error::Error,
    formats::{
        csv::{ColumnSpec, TranslationMatrix, default_column},
        strings::{Pair, StringsTable, language_from_path},
    },
    repair::{escape_quotes, repair_value},
    traits::Parser,
};

/// Outcome of a strings-to-CSV run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Languages in column order.
    pub languages: Vec<String>,
    pub keys: usize,
    /// Keys found in later files but absent from the first one.
    pub dropped_keys: usize,
    pub output: PathBuf,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} keys in {} languages ({}) to {}",
            self.keys,
            self.languages.len(),
            self.languages.join(", "),
            self.output.display()
        )?;
        if self.dropped_keys > 0 {
            write!(f, "; {} keys missing from the first file were dropped", self.dropped_keys)?;
        }
        Ok(())
    }
}

/// Outcome of a CSV-to-strings run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub files: Vec<PathBuf>,
    /// Data rows with a key.
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows skipped because of their state cell.
    pub rows_excluded: usize,
}

impl ImportSummary {
    pub fn files_created(&self) -> usize {
        self.files.len()
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created {} files. Content: {} translations ({} written, {} excluded)",
            self.files_created(),
            self.rows_read,
            self.rows_written,
            self.rows_excluded
        )
    }
}

/// Assembles a CSV matrix from per-language tables.
///
/// Keys come from the first table, in its order. A non-default language cell
/// is left empty when its value equals the default language's value, so
/// translators only see what actually differs from the source text.
pub fn build_matrix(config: &Config, tables: &[(String, StringsTable)]) -> TranslationMatrix {
    let mut header = vec![config.key_label.clone()];
    header.extend(tables.iter().map(|(lang, _)| config.display_name(lang)));
    let mut matrix = TranslationMatrix::new(header);

    let Some((_, first)) = tables.first() else {
        return matrix;
    };

    let default_table = tables
        .iter()
        .find(|(lang, _)| config.is_default_language(lang))
        .map(|(_, table)| table);
    if default_table.is_none() {
        warn!(
            "Default language '{}' is not among the inputs; no values are omitted",
            config.default_language
        );
    }

    for key in first.keys() {
        let default_value = default_table.map(|table| table.get(key));
        let mut row = Vec::with_capacity(tables.len() + 1);
        row.push(key.to_string());
        for (lang, table) in tables {
            let value = table.get(key);
            let same_as_default = !config.is_default_language(lang) && default_value == Some(value);
            row.push(if same_as_default {
                String::new()
            } else {
                value.unwrap_or_default().to_string()
            });
        }
        matrix.add_row(row);
    }

    matrix
}

/// Number of distinct keys that appear in some table but not in the first one.
fn count_dropped_keys(tables: &[(String, StringsTable)]) -> usize {
    let Some((_, first)) = tables.first() else {
        return 0;
    };
    tables
        .iter()
        .skip(1)
        .flat_map(|(_, table)| table.keys())
        .filter(|key| !first.contains_key(key))
        .collect::<HashSet<_>>()
        .len()
}

/// Converts `.strings` files into the CSV at `config.output_file`.
///
/// An empty `paths` list means every configured language's
/// `<code>.lproj/Localizable.strings`.
pub fn strings_to_csv<P: AsRef<Path>>(config: &Config, paths: &[P]) -> Result<ExportSummary, Error> {
    let paths: Vec<PathBuf> = if paths.is_empty() {
        config.default_resource_paths()
    } else {
        paths.iter().map(|p| p.as_ref().to_path_buf()).collect()
    };
    if paths.is_empty() {
        return Err(Error::invalid_input("no .strings files to convert"));
    }

    let mut tables = Vec::with_capacity(paths.len());
    for path in &paths {
        let language = language_from_path(path).ok_or_else(|| {
            Error::invalid_input(format!(
                "cannot infer a language from '{}'",
                path.display()
            ))
        })?;
        info!("Parsing {} ({})", path.display(), language);
        let table = StringsTable::read_from(path)?;
        debug!("{}: {} keys", path.display(), table.len());
        tables.push((language, table));
    }

    let dropped_keys = count_dropped_keys(&tables);
    if dropped_keys > 0 {
        warn!(
            "{} keys are missing from {} and will not be exported",
            dropped_keys,
            paths[0].display()
        );
    }

    let matrix = build_matrix(config, &tables);

    let output = config.output_file.clone();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    info!("Creating {}", output.display());
    matrix.write_to(&output)?;

    Ok(ExportSummary {
        languages: tables.into_iter().map(|(lang, _)| lang).collect(),
        keys: matrix.rows.len(),
        dropped_keys,
        output,
    })
}

/// Converts a CSV matrix file into one `Localizable.strings` per locale.
pub fn csv_to_strings<P: AsRef<Path>>(config: &Config, csv_path: P) -> Result<ImportSummary, Error> {
    let csv_path = csv_path.as_ref();
    info!("Reading {}", csv_path.display());
    let matrix = TranslationMatrix::read_from(csv_path)?;
    matrix_to_strings(config, &matrix)
}

/// Writes a parsed matrix out as `.strings` files.
///
/// Every locale file is created (truncated) before the first row is written.
/// Files written before an error stay on disk.
pub fn matrix_to_strings(
    config: &Config,
    matrix: &TranslationMatrix,
) -> Result<ImportSummary, Error> {
    let columns = ColumnSpec::from_header(config, &matrix.header)?;
    if columns.iter().all(|column| column.excluded) {
        return Err(Error::invalid_input(format!(
            "no configured language column in CSV header ({})",
            matrix.header.join(", ")
        )));
    }
    let default_col = default_column(&columns);
    if default_col.is_none() {
        warn!(
            "No column for default language '{}'; empty cells stay empty",
            config.default_language
        );
    }

    let mut writers = LocaleWriters::open(config, &columns)?;
    let mut summary = ImportSummary::default();

    for (row_index, row) in matrix.rows.iter().enumerate() {
        let line = row_index + 2;
        let key = cell(row, config.key_column).map(str::trim).unwrap_or_default();
        if key.is_empty() {
            debug!("Line {}: no key, skipped", line);
            continue;
        }
        summary.rows_read += 1;

        let state = config
            .state_column
            .and_then(|index| cell(row, index))
            .unwrap_or_default();
        if config.is_excluded_state(state) {
            debug!("Line {}: '{}' has state '{}', skipped", line, key, state);
            summary.rows_excluded += 1;
            continue;
        }

        let key = escape_quotes(key);
        let mut written = 0;
        for column in columns.iter().filter(|c| !c.excluded) {
            let raw = cell(row, column.index)
                .or_else(|| default_col.and_then(|index| cell(row, index)))
                .unwrap_or_default();
            written += writers.write_pair(column.index, &Pair::new(&*key, repair_value(raw)))?;
        }
        if written > 0 {
            debug!("Line {}: '{}' written to {} files", line, key, written);
            summary.rows_written += 1;
        }
    }

    summary.files = writers.finish()?;
    info!("{}", summary);
    Ok(summary)
}

/// Non-empty cell at `index`.
fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

struct LocaleFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Open `Localizable.strings` writers, one per locale, indexed by CSV column.
///
/// Dropping the collection closes every file, so an error in the middle of a
/// run still releases all handles.
struct LocaleWriters {
    files: Vec<LocaleFile>,
    by_column: HashMap<usize, Vec<usize>>,
}

impl LocaleWriters {
    fn open(config: &Config, columns: &[ColumnSpec]) -> Result<Self, Error> {
        let mut writers = LocaleWriters {
            files: Vec::new(),
            by_column: HashMap::new(),
        };

        for column in columns.iter().filter(|c| !c.excluded) {
            info!(
                "Column {} ('{}', {}) → {}",
                column.index,
                column.label,
                column.code.as_deref().unwrap_or_default(),
                column.locales.join(", ")
            );
            for locale in &column.locales {
                let dir = config.locale_dir(locale);
                fs::create_dir_all(&dir)?;
                let path = dir.join("Localizable.strings");
                info!("Creating {}", path.display());
                let file = File::create(&path)?;

                writers
                    .by_column
                    .entry(column.index)
                    .or_default()
                    .push(writers.files.len());
                writers.files.push(LocaleFile {
                    path,
                    writer: BufWriter::new(file),
                });
            }
        }

        Ok(writers)
    }

    /// Writes `pair` to every locale file of `column`, returning how many.
    fn write_pair(&mut self, column: usize, pair: &Pair) -> Result<usize, Error> {
        let Some(targets) = self.by_column.get(&column) else {
            return Ok(0);
        };
        for &target in targets {
            writeln!(self.files[target].writer, "{}", pair)?;
        }
        Ok(targets.len())
    }

    /// Flushes and closes every file, returning their paths in creation order.
    fn finish(self) -> Result<Vec<PathBuf>, Error> {
        let mut paths = Vec::with_capacity(self.files.len());
        for mut file in self.files {
            file.writer.flush()?;
            paths.push(file.path);
        }
        Ok(paths)
    }
}
