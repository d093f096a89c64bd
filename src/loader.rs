//! Dataset loading: turns an uploaded byte stream into a [`Table`].
//!
//! The parsing strategy is chosen from the declared extension alone; the
//! bytes are never sniffed. Unsupported extensions and malformed content are
//! distinct failures so callers can warn about the first and report the
//! second with the decoder's own message.

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use thiserror::Error;

use crate::{
    dataset::{Table, TableError, unique_headers},
    format::{FileFormat, Separator},
    inference, io_utils, json, xlsx,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "Unsupported file format '{0}'. Please upload a CSV, Excel (xlsx) or JSON file."
    )]
    UnsupportedFormat(String),
    #[error("Failed to read the {format} file: {message}")]
    Parse { format: FileFormat, message: String },
    #[error(transparent)]
    Table(#[from] TableError),
}

impl LoadError {
    pub(crate) fn parse(format: FileFormat, message: impl ToString) -> Self {
        LoadError::Parse {
            format,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field separator; only consulted for CSV.
    pub separator: Separator,
    /// Text encoding for CSV and JSON sources.
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Comma,
            encoding: UTF_8,
        }
    }
}

/// Parses `bytes` according to `declared_extension`.
pub fn load(
    bytes: &[u8],
    declared_extension: &str,
    options: &LoadOptions,
) -> Result<Table, LoadError> {
    let format = FileFormat::from_extension(declared_extension)
        .ok_or_else(|| LoadError::UnsupportedFormat(declared_extension.to_string()))?;
    load_format(bytes, format, options)
}

pub fn load_format(
    bytes: &[u8],
    format: FileFormat,
    options: &LoadOptions,
) -> Result<Table, LoadError> {
    debug!("Loading {} byte(s) as {format}", bytes.len());
    match format {
        FileFormat::Csv => load_csv(bytes, options),
        FileFormat::Xlsx => xlsx::load_xlsx(bytes),
        FileFormat::Json => json::load_json(bytes, options.encoding),
    }
}

fn load_csv(bytes: &[u8], options: &LoadOptions) -> Result<Table, LoadError> {
    let text = io_utils::decode_bytes(bytes, options.encoding)
        .map_err(|err| LoadError::parse(FileFormat::Csv, err))?;
    let mut reader = io_utils::open_csv_reader(text.as_bytes(), options.separator.as_byte());
    let raw_headers = reader
        .headers()
        .map_err(|err| LoadError::parse(FileFormat::Csv, err))?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    if raw_headers.is_empty() {
        return Err(LoadError::parse(
            FileFormat::Csv,
            "No columns to parse from file",
        ));
    }
    let headers = unique_headers(raw_headers);

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|err| LoadError::parse(FileFormat::Csv, err))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |pos| pos.line());
            return Err(LoadError::parse(
                FileFormat::Csv,
                format!(
                    "Expected {} fields in line {line}, saw {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        // Short records are padded with missing cells.
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(record.get(idx).map(str::to_string));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| inference::infer_column(name, raw))
        .collect();
    Ok(Table::new(columns)?)
}
