use crate::data::Value;
use anyhow::{Context, Result};
use std::io::{self, Read};

/// CSV contents with per-column type inference applied
#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Read CSV data from stdin
pub fn read_csv_from_stdin() -> Result<CsvData> {
    read_csv(io::stdin().lock())
}

/// Read CSV data from any reader. The first row is the header.
pub fn read_csv<R: Read>(reader: R) -> Result<CsvData> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut cells: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", idx + 1))?;
        cells.push(record.iter().map(|s| s.to_string()).collect());
    }

    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| is_numeric_column(cells.iter().filter_map(|row| row.get(col))))
        .collect();

    let rows = cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(col, cell)| convert_cell(cell, numeric.get(col).copied().unwrap_or(false)))
                .collect()
        })
        .collect();

    Ok(CsvData { headers, rows })
}

/// A column is numeric when every non-empty cell parses as a finite number
fn is_numeric_column<'a>(cells: impl Iterator<Item = &'a String>) -> bool {
    let mut saw_value = false;
    for cell in cells {
        if cell.is_empty() {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => saw_value = true,
            _ => return false,
        }
    }
    saw_value
}

fn convert_cell(cell: String, numeric: bool) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if numeric {
        if let Ok(n) = cell.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::Text(cell)
}
