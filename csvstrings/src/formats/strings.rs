//! Support for Apple `.strings` localization files.
//!
//! Only the `"key" = "value";` line form is recognized. Values are kept raw:
//! escape sequences such as `\n` or `\"` are neither decoded on read nor
//! re-encoded on write.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    // "key" = "value";  (greedy on both sides, anything after the final `";` is ignored)
    static ref PAIR_REGEX: Regex = Regex::new(r#"^[^"]*"(.+)"[^=]+=[^"]*"(.*)";"#).unwrap();
}

/// A single key-value pair of a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" = \"{}\";", self.key, self.value)
    }
}

/// Parses one line of a `.strings` file.
///
/// The line is trimmed first. Lines starting with `#` or `=` are skipped, and
/// so is anything that does not look like `"key" = "value";`. Returns `None`
/// for every skipped line.
pub fn parse_line(line: &str) -> Option<Pair> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('=') {
        return None;
    }

    let captures = PAIR_REGEX.captures(trimmed)?;
    Some(Pair::new(&captures[1], &captures[2]))
}

/// The key/value content of one `.strings` file, in first-seen key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringsTable {
    pairs: Vec<Pair>,
    index: HashMap<String, usize>,
}

impl StringsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair. A key that is already present keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.pairs[position].value = value,
            None => {
                self.index.insert(key.clone(), self.pairs.len());
                self.pairs.push(Pair { key, value });
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.pairs[position].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.key.as_str())
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<Pair> for StringsTable {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        let mut table = StringsTable::new();
        for pair in iter {
            table.insert(pair.key, pair.value);
        }
        table
    }
}

impl Parser for StringsTable {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let mut table = StringsTable::new();
        for line in reader.lines() {
            if let Some(pair) = parse_line(&line?) {
                table.insert(pair.key, pair.value);
            }
        }
        Ok(table)
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        for pair in &self.pairs {
            writeln!(writer, "{}", pair)?;
        }
        writer.flush().map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding (e.g., UTF-16 Apple .strings)
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// Infers the language of a `.strings` file from its path.
///
/// The nearest `<lang>.lproj` directory wins; otherwise the file name up to
/// its first `.` is used (`fr.strings` → `fr`).
pub fn language_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();
    let from_lproj = path.components().rev().find_map(|c| {
        let component = c.as_os_str().to_str()?;
        component
            .strip_suffix(".lproj")
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    });

    from_lproj.or_else(|| {
        let name = path.file_name()?.to_str()?;
        name.split('.')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}
