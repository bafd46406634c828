use std::path::{Path, PathBuf};

/// Conversion direction, decided from the input file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `.strings` files to one CSV. An empty list means the configured locales.
    StringsToCsv(Vec<PathBuf>),
    /// One CSV to `.strings` files.
    CsvToStrings(PathBuf),
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

impl Mode {
    /// Picks the direction for the given arguments.
    ///
    /// No arguments, or only `.strings` files, convert to CSV; exactly one
    /// `.csv` file converts to `.strings`. Anything else is a usage error.
    pub fn from_args(files: &[String]) -> Result<Mode, String> {
        let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();

        if let [single] = paths.as_slice() {
            if has_extension(single, "csv") {
                return Ok(Mode::CsvToStrings(single.clone()));
            }
        }

        if let Some(other) = paths.iter().find(|p| !has_extension(p, "strings")) {
            return Err(if has_extension(other, "csv") {
                "A .csv file must be the only argument".to_string()
            } else {
                format!(
                    "Unsupported input '{}': expected .strings files or a single .csv file",
                    other.display()
                )
            });
        }

        Ok(Mode::StringsToCsv(paths))
    }

    /// Whether this run can only work with a configuration file.
    ///
    /// CSV import maps header labels to languages, and exporting without
    /// files reads the configured locales. Only exporting explicit files
    /// works from defaults.
    pub fn needs_config(&self) -> bool {
        match self {
            Mode::StringsToCsv(paths) => paths.is_empty(),
            Mode::CsvToStrings(_) => true,
        }
    }
}
