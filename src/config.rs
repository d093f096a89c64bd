use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{format::Separator, session::Selections};

/// Optional YAML file carrying upload options and default selections.
///
/// ```yaml
/// separator: semicolon
/// input_encoding: windows-1252
/// columns: [name, age]
/// numeric: age
/// text: name
/// preview_rows: 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub separator: Option<Separator>,
    pub input_encoding: Option<String>,
    pub columns: Option<Vec<String>>,
    pub numeric: Option<String>,
    pub text: Option<String>,
    pub preview_rows: Option<usize>,
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening config file {path:?}"))?;
        Self::parse(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn selections(&self) -> Selections {
        let defaults = Selections::default();
        Selections {
            columns: self.columns.clone(),
            numeric: self.numeric.clone(),
            text: self.text.clone(),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
        }
    }
}
