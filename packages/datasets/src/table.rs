//! Delimited table reading shared by every cleaner.
//!
//! Rows are deserialized straight into each cleaner's raw row type. Headers
//! and fields are trimmed, and all key columns are declared as text on the
//! raw types so zip codes and years are never coerced to numbers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::DatasetError;

/// Field separator of a source export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// Opens a source file, logging which dataset it belongs to.
///
/// # Errors
///
/// Returns [`DatasetError::Io`] if the file cannot be opened.
pub fn open(path: &Path, dataset: &str) -> Result<File, DatasetError> {
    log::debug!("Opening {dataset} dataset at {}", path.display());
    Ok(File::open(path)?)
}

/// Deserializes every row and hands it to `on_row` along with its 1-based
/// row number.
///
/// Returns the number of rows read.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if a row cannot be parsed, or whatever
/// error `on_row` returns.
pub fn for_each_row<T, F>(
    reader: impl Read,
    delimiter: Delimiter,
    mut on_row: F,
) -> Result<u64, DatasetError>
where
    T: DeserializeOwned,
    F: FnMut(usize, T) -> Result<(), DatasetError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut total = 0u64;

    for (i, result) in csv_reader.deserialize::<T>().enumerate() {
        on_row(i + 1, result?)?;
        total += 1;
    }

    Ok(total)
}
