//! Read a delimited-text or Excel file into a uniform in-memory table.

use std::io::{Read, Seek};

use calamine::{Data, Reader};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Excel(#[from] calamine::Error),
    #[error("Cannot tell the format of '{name}' - expected a .csv, .xlsx, .xls, .xlsb or .ods suffix")]
    UnknownFormat { name: String },
    #[error("The workbook '{name}' contains no sheets")]
    EmptyWorkbook { name: String },
}

/// One cell of the input table. Excel input keeps numbers as numbers so that
/// coercion only has to deal with text when the file actually contains text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// The cell as display text, or `None` when blank.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// A header row plus data rows. Rows may be shorter than the header.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// The cell at `column` of `row`, blank when the role is unmapped or the row is too short.
pub fn cell<'a>(row: &'a [Cell], column: Option<usize>) -> &'a Cell {
    column
        .and_then(|column| row.get(column))
        .unwrap_or(&Cell::Empty)
}

const EXCEL_SUFFIXES: &[&str] = &[".xlsx", ".xlsm", ".xls", ".xlsb", ".ods"];

/// Read tabular data, picking the format from the suffix of `name`.
/// The first row is the header; for workbooks only the first sheet is read.
pub fn read_table(name: &str, data: impl Read + Seek + Clone) -> Result<Table, Error> {
    let lower = name.to_lowercase();
    if lower.ends_with(".csv") {
        read_csv(data)
    } else if EXCEL_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        read_workbook(name, data)
    } else {
        Err(Error::UnknownFormat {
            name: name.to_string(),
        })
    }
}

fn read_csv(data: impl Read) -> Result<Table, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);
    let headers = csv.headers()?.iter().map(String::from).collect();
    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(Table { headers, rows })
}

fn read_workbook(name: &str, data: impl Read + Seek + Clone) -> Result<Table, Error> {
    let mut workbook = calamine::open_workbook_auto_from_rs(data)?;
    let sheet = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyWorkbook {
            name: name.to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;
    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(into_cell).collect())
        .collect();
    Ok(Table { headers, rows })
}

fn into_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
