//! Language/column/path mapping shared by both conversion directions.
//!
//! A configuration is a plain value built once at startup, usually from a
//! `csvstrings.toml` file:
//!
//! ```toml
//! default_language = "en"
//! key_label = "Key"
//! key_column = 0
//! state_column = 1
//! excluded_states = ["Needs review"]
//! output_file = "Localizable.csv"
//! base_path = "Resources"
//!
//! [[languages]]
//! code = "en"
//! name = "English"
//!
//! [[languages]]
//! code = "pt"
//! name = "Portuguese"
//! locales = ["pt", "pt-BR"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// File name looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "csvstrings.toml";

/// One recognized language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageSpec {
    /// Locale-style code, also used as the resource-file language (`en`, `pt-BR`).
    pub code: String,
    /// Display label used in the CSV header (`English`).
    pub name: String,
    /// On-disk locales this language is written to. Empty means `[code]`.
    #[serde(default)]
    pub locales: Vec<String>,
}

impl LanguageSpec {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            locales: Vec::new(),
        }
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// The locales a CSV column of this language fans out to.
    pub fn output_locales(&self) -> Vec<String> {
        if self.locales.is_empty() {
            vec![self.code.clone()]
        } else {
            self.locales.clone()
        }
    }

    fn matches_label(&self, label: &str) -> bool {
        self.name == label || self.code == label
    }

    fn owns_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Recognized languages, in the order resource files are discovered.
    pub languages: Vec<LanguageSpec>,
    /// Code (or display name) of the source language.
    pub default_language: String,
    /// Header label of the key column in generated CSV files.
    pub key_label: String,
    /// Index of the key column when reading CSV files.
    pub key_column: usize,
    /// Index of the row-state column when reading CSV files, if any.
    pub state_column: Option<usize>,
    /// Rows whose state is one of these are not written to resource files.
    pub excluded_states: Vec<String>,
    /// CSV file produced by the strings-to-CSV direction.
    pub output_file: PathBuf,
    /// Directory that holds the `<locale>.lproj` folders. `None` is the working directory.
    pub base_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            default_language: "en".to_string(),
            key_label: "Key".to_string(),
            key_column: 0,
            state_column: None,
            excluded_states: Vec::new(),
            output_file: PathBuf::from("Localizable.csv"),
            base_path: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads [`DEFAULT_CONFIG_FILE`] from the working directory, or `None`
    /// when it does not exist.
    pub fn load_default() -> Result<Option<Self>, Error> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Resolves a CSV header label to a language.
    ///
    /// A display name or code wins; otherwise a label naming one of a
    /// language's `locales` (a `pt-BR` column for `pt`) resolves to it.
    pub fn language(&self, label: &str) -> Option<&LanguageSpec> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        self.languages
            .iter()
            .find(|lang| lang.matches_label(label))
            .or_else(|| self.languages.iter().find(|lang| lang.owns_locale(label)))
    }

    /// Whether `label` (a code or a display name) designates the default language.
    pub fn is_default_language(&self, label: &str) -> bool {
        let label = label.trim();
        if label == self.default_language {
            return true;
        }
        match self.language(&self.default_language) {
            Some(default) => default.matches_label(label),
            None => false,
        }
    }

    /// CSV header label for a language code or one of its locales.
    /// Unconfigured codes label themselves.
    pub fn display_name(&self, code: &str) -> String {
        self.languages
            .iter()
            .find(|lang| lang.code == code)
            .or_else(|| self.languages.iter().find(|lang| lang.owns_locale(code)))
            .map(|lang| lang.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// `<code>.lproj/Localizable.strings` for every configured language.
    pub fn default_resource_paths(&self) -> Vec<PathBuf> {
        self.languages
            .iter()
            .map(|lang| PathBuf::from(format!("{}.lproj", lang.code)).join("Localizable.strings"))
            .collect()
    }

    /// Directory a locale's `Localizable.strings` is written to.
    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        let dir = format!("{}.lproj", locale);
        match &self.base_path {
            Some(base) => base.join(dir),
            None => PathBuf::from(dir),
        }
    }

    /// Whether a row with this state cell is kept out of resource files.
    pub fn is_excluded_state(&self, state: &str) -> bool {
        !state.is_empty() && self.excluded_states.iter().any(|s| s == state)
    }

    /// Non-fatal problems worth reporting before a run.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.languages.is_empty() && self.language(&self.default_language).is_none() {
            warnings.push(format!(
                "default language '{}' is not in the language list",
                self.default_language
            ));
        }

        let mut seen_locales = HashSet::new();
        for lang in &self.languages {
            if lang.code.parse::<LanguageIdentifier>().is_err() {
                warnings.push(format!(
                    "language code '{}' is not a valid BCP 47 identifier",
                    lang.code
                ));
            }
            for locale in lang.output_locales() {
                if locale != lang.code && locale.parse::<LanguageIdentifier>().is_err() {
                    warnings.push(format!(
                        "locale '{}' of '{}' is not a valid BCP 47 identifier",
                        locale, lang.code
                    ));
                }
                if !seen_locales.insert(locale.clone()) {
                    warnings.push(format!(
                        "locale '{}' is claimed by more than one language",
                        locale
                    ));
                }
            }
        }

        if self.state_column == Some(self.key_column) {
            warnings.push(format!(
                "state column and key column are both {}",
                self.key_column
            ));
        }

        warnings
    }
}
