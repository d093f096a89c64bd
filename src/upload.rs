//! Turns command-line input arguments into a loaded [`Table`].

use anyhow::{Result, bail};
use log::{debug, info};

use crate::{
    cli::InputArgs,
    config::SessionConfig,
    dataset::Table,
    format::{Separator, declared_extension},
    io_utils,
    loader::{self, LoadError, LoadOptions},
};

#[derive(Debug)]
pub struct Upload {
    pub table: Table,
    pub config: SessionConfig,
}

/// Reads and parses the upload described by `args`.
///
/// An unsupported format is reported as a warning on stderr and yields
/// `Ok(None)`; the caller then has nothing to show. Malformed content is an
/// error.
pub fn open(args: &InputArgs) -> Result<Option<Upload>> {
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let extension = match &args.format {
        Some(format) => format.clone(),
        None if io_utils::is_dash(&args.input) => {
            bail!("Reading an upload from stdin requires --format")
        }
        None => declared_extension(&args.input),
    };

    let separator: Separator = args.separator.or(config.separator).unwrap_or_default();
    let encoding = io_utils::resolve_encoding(
        args.input_encoding
            .as_deref()
            .or(config.input_encoding.as_deref()),
    )?;
    let options = LoadOptions {
        separator,
        encoding,
    };

    let bytes = io_utils::read_input(&args.input)?;
    info!(
        "Loading '{}' as '{}' with separator '{}'",
        args.input.display(),
        extension,
        separator.printable()
    );

    match loader::load(&bytes, &extension, &options) {
        Ok(table) => {
            info!(
                "Loaded {} row(s) across {} column(s)",
                table.row_count(),
                table.column_count()
            );
            Ok(Some(Upload { table, config }))
        }
        Err(err @ LoadError::UnsupportedFormat(_)) => {
            debug!("Skipping '{}': {err}", args.input.display());
            eprintln!("warning: {err}");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}
