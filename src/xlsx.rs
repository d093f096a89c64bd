use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::{
    data::{Value, parse_temporal_value},
    dataset::{Column, Table, unique_headers},
    format::FileFormat,
    inference,
    loader::LoadError,
};

/// Loads the first worksheet of an `.xlsx` workbook; its first row is the
/// header. Excel cells are already typed, so no string inference runs here.
pub fn load_xlsx(bytes: &[u8]) -> Result<Table, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|err| LoadError::parse(FileFormat::Xlsx, err))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::parse(FileFormat::Xlsx, "Workbook contains no worksheets"))?
        .map_err(|err| LoadError::parse(FileFormat::Xlsx, err))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };
    let headers = unique_headers(header_row.iter().map(header_text).collect());

    let mut cells: Vec<Vec<Option<Value>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(idx).and_then(cell_value));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| {
            let kind = inference::settle_kind(&values);
            Column::new(name, kind, values)
        })
        .collect();
    Ok(Table::new(columns)?)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => cell_value(other)
            .map(|value| value.as_display())
            .unwrap_or_default(),
    }
}

fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Int(i) => Some(Value::Integer(*i)),
        Data::Float(f) => Some(Value::Float(*f)),
        Data::Bool(b) => Some(Value::Boolean(*b)),
        Data::String(s) => Some(Value::Text(s.clone())),
        Data::DateTime(dt) => dt.as_datetime().map(Value::DateTime),
        Data::DateTimeIso(s) => parse_temporal_value(s).or_else(|| Some(Value::Text(s.clone()))),
        Data::DurationIso(s) => Some(Value::Text(s.clone())),
        Data::Error(_) | Data::Empty => None,
    }
}
