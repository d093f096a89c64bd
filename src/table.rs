use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Plain-text table: a header line, a dashed rule, then one line per row.
/// Columns are separated by two spaces and trailing padding is trimmed.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; headers.len()];
        Self {
            headers,
            align,
            rows: Vec::new(),
        }
    }

    /// Right-aligns every column from `first` onwards.
    pub fn right_align_from(mut self, first: usize) -> Self {
        for align in self.align.iter_mut().skip(first) {
            *align = Align::Right;
        }
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let headers: Vec<String> = self.headers.iter().map(|h| flatten(h)).collect();
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| flatten(cell)).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| width_of(h).max(3)).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(width_of(cell));
            }
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", self.line(&headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(output, "{}", self.line(&rule, &widths));
        for row in &rows {
            let _ = writeln!(output, "{}", self.line(row, &widths));
        }
        output
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::new();
        for (idx, width) in widths.iter().enumerate() {
            if idx > 0 {
                line.push_str("  ");
            }
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width.saturating_sub(width_of(cell)));
            match self.align.get(idx).copied().unwrap_or_default() {
                Align::Left => {
                    line.push_str(cell);
                    line.push_str(&padding);
                }
                Align::Right => {
                    line.push_str(&padding);
                    line.push_str(cell);
                }
            }
        }
        line.trim_end().to_string()
    }
}

fn width_of(value: &str) -> usize {
    value.chars().count()
}

/// Replaces line breaks, tabs and other control characters with spaces so a
/// cell never spans more than one line.
fn flatten(value: &str) -> String {
    value
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}
