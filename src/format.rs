use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported upload formats, chosen purely from the declared extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
    Json,
}

impl FileFormat {
    /// Resolves a declared extension such as `csv`, `.XLSX` or `Json`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let normalized = extension.trim().trim_start_matches('.');
        if normalized.eq_ignore_ascii_case("csv") {
            Some(FileFormat::Csv)
        } else if normalized.eq_ignore_ascii_case("xlsx") {
            Some(FileFormat::Xlsx)
        } else if normalized.eq_ignore_ascii_case("json") {
            Some(FileFormat::Json)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Xlsx => "Excel",
            FileFormat::Json => "JSON",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of `path` as declared by its name, or an empty string.
pub fn declared_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Field separators offered for delimited uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Separator {
    #[default]
    Comma,
    Semicolon,
    Pipe,
    Tab,
}

impl Separator {
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Semicolon => b';',
            Separator::Pipe => b'|',
            Separator::Tab => b'\t',
        }
    }

    pub fn printable(self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Pipe => "|",
            Separator::Tab => "\\t",
        }
    }
}

impl FromStr for Separator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "," | "comma" => Ok(Separator::Comma),
            ";" | "semicolon" => Ok(Separator::Semicolon),
            "|" | "pipe" => Ok(Separator::Pipe),
            "\t" | "\\t" | "tab" => Ok(Separator::Tab),
            "" => Err("Separator cannot be empty".to_string()),
            other => Err(format!(
                "Unsupported separator '{other}' (expected comma, semicolon, pipe or tab)"
            )),
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(value: Separator) -> Self {
        match value {
            Separator::Comma => "comma",
            Separator::Semicolon => "semicolon",
            Separator::Pipe => "pipe",
            Separator::Tab => "tab",
        }
        .to_string()
    }
}

pub fn parse_separator(value: &str) -> Result<Separator, String> {
    value.parse()
}
