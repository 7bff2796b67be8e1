//! Write the priced table out as CSV, XLSX or JSON. All three are plain
//! transcriptions of the same rows.

use std::io::Write;

use crate::pricing::Row;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" | "excel" => Ok(Format::Xlsx),
            "json" => Ok(Format::Json),
            other => Err(format!("Unknown export format '{other}' - use csv, xlsx or json")),
        }
    }
}

/// The column headers of the exported table, in order.
pub const HEADERS: [&str; 7] = [
    "Descrição",
    "Custo",
    "Qtd",
    "Preço_base",
    "Preço_final",
    "Lucro_un",
    "Lucro_%",
];

const SHEET_NAME: &str = "Precificacao";

pub fn write(rows: &[Row], format: Format, out: impl Write) -> Result<(), Error> {
    match format {
        Format::Csv => write_csv(rows, out),
        Format::Xlsx => write_xlsx(rows, out),
        Format::Json => write_json(rows, out),
    }
}

/// UTF-8, comma separated, one header row, blanks for absent values.
fn write_csv(rows: &[Row], out: impl Write) -> Result<(), Error> {
    let mut out = csv::WriterBuilder::new().delimiter(b',').from_writer(out);
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// One array of objects keyed by the fixed column names, absent values as null.
fn write_json(rows: &[Row], mut out: impl Write) -> Result<(), Error> {
    serde_json::to_writer(&mut out, rows)?;
    out.flush()?;
    Ok(())
}

/// A single-sheet workbook with the header row followed by the values.
fn write_xlsx(rows: &[Row], mut out: impl Write) -> Result<(), Error> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (column, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, column as u16, *header)?;
    }
    for (index, row) in rows.iter().enumerate() {
        let line = index as u32 + 1;
        if let Some(description) = &row.description {
            sheet.write_string(line, 0, description)?;
        }
        write_number(sheet, line, 1, row.cost)?;
        sheet.write_number(line, 2, row.quantity)?;
        write_number(sheet, line, 3, row.base_price)?;
        write_number(sheet, line, 4, row.final_price)?;
        write_number(sheet, line, 5, row.unit_profit)?;
        write_number(sheet, line, 6, row.profit_percent)?;
    }
    out.write_all(&workbook.save_to_buffer()?)?;
    out.flush()?;
    Ok(())
}

fn write_number(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    column: u16,
    value: Option<f64>,
) -> Result<(), Error> {
    if let Some(value) = value {
        sheet.write_number(row, column, value)?;
    }
    Ok(())
}
