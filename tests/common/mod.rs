#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet};
use tempfile::{TempDir, tempdir};

/// The three-row people dataset used across scenarios.
pub const PEOPLE_CSV: &str = "name,age\nAlice,30\nBob,25\nAlice,40\n";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        self.write_bytes(name, contents.as_bytes())
    }

    pub fn write_bytes(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }
}

/// Builds a single-sheet workbook in memory. The first row is written as the
/// header; numeric-looking cells are written as numbers.
pub fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let mut sheet = Worksheet::new();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell.parse::<f64>() {
                Ok(number) if row_idx > 0 => {
                    sheet.write_number(r, c, number).expect("write number");
                }
                _ if cell.is_empty() => {}
                _ => {
                    sheet.write_string(r, c, *cell).expect("write string");
                }
            }
        }
    }
    workbook.push_worksheet(sheet);
    workbook.save_to_buffer().expect("save workbook")
}
