//! Reading and writing the two on-disk formats through one interface.
//!
//! [`StringsTable`](crate::StringsTable) (one locale's `Localizable.strings`)
//! and [`TranslationMatrix`](crate::TranslationMatrix) (the CSV sheet) both
//! implement [`Parser`]; the converters only ever go through it.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// Parse a whole file into memory, or write it back out.
///
/// Implementors supply [`from_reader`](Parser::from_reader) and
/// [`to_writer`](Parser::to_writer); the path and string variants are
/// derived from them.
///
/// # Example
///
/// ```rust,no_run
/// use csvstrings::traits::Parser;
/// use csvstrings::TranslationMatrix;
///
/// let sheet = TranslationMatrix::read_from("Localizable.csv")?;
/// println!("{} keys, columns: {}", sheet.rows.len(), sheet.header.join(", "));
/// sheet.write_to("Localizable.backup.csv")?;
/// # Ok::<(), csvstrings::Error>(())
/// ```
pub trait Parser {
    /// Reads the complete content of `reader`.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Opens `path` and reads it. A missing file is an [`Error::Io`].
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Serializes everything to `writer`, flushing at the end.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Creates or truncates `path`, then writes to it.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.to_writer(BufWriter::new(File::create(path)?))
    }

    /// Parses in-memory text, mostly useful in tests.
    fn from_str(content: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(content))
    }
}
