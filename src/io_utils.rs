//! I/O utilities for reading uploads, decoding text, and building CSV readers.
//!
//! All byte-level input flows through this module:
//!
//! - **Uploads**: a path is read fully into memory; the `-` path convention
//!   reads standard input instead.
//! - **Encoding**: text formats are decoded via `encoding_rs`, defaulting to
//!   UTF-8. A leading byte-order mark is dropped.
//! - **Reader construction**: `open_csv_reader` fixes the quoting rules and
//!   accepts records of any width; the loader decides what a short or long
//!   record means.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_dash(path) {
        let mut buffer = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buffer)
            .context("Reading upload from stdin")?;
        Ok(buffer)
    } else {
        fs::read(path).with_context(|| format!("Opening input file {path:?}"))
    }
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}
