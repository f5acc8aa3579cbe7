//! Spreadsheet export of the visible lead rows.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::domain::lead::{Lead, LeadField};

pub const SHEET_NAME: &str = "Leads";
/// Extra characters added to every auto-sized column.
pub const COLUMN_PADDING: usize = 2;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("workbook error: {0}")]
    Workbook(#[from] XlsxError),
    #[error("sheet is too large: {0}")]
    TooLarge(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Text the cell displays; used for width calculation.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// Tabular data ready to be written, with auto-fitted column widths.
#[derive(Debug, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub widths: Vec<usize>,
}

impl Sheet {
    /// Builds a sheet whose columns are the union of the row keys in
    /// first-seen order. Keys a row lacks become empty cells.
    pub fn from_rows<I, R, K>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        let mut headers: Vec<String> = Vec::new();
        let mut keyed_rows: Vec<Vec<(usize, CellValue)>> = Vec::new();

        for record in records {
            let mut row = Vec::new();
            for (key, value) in record {
                let key = key.into();
                let column = match headers.iter().position(|h| *h == key) {
                    Some(column) => column,
                    None => {
                        headers.push(key);
                        headers.len() - 1
                    }
                };
                row.push((column, value));
            }
            keyed_rows.push(row);
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        let rows = keyed_rows
            .into_iter()
            .map(|keyed| {
                let mut cells = vec![CellValue::Empty; headers.len()];
                for (column, value) in keyed {
                    widths[column] = widths[column].max(value.display().chars().count());
                    cells[column] = value;
                }
                cells
            })
            .collect();

        let widths = widths.into_iter().map(|w| w + COLUMN_PADDING).collect();

        Self {
            headers,
            rows,
            widths,
        }
    }

    /// Serializes the sheet into an XLSX workbook held in memory.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (column, header) in self.headers.iter().enumerate() {
            let column = column_index(column)?;
            worksheet.write_string_with_format(0, column, header.as_str(), &header_format)?;
        }

        for (column, width) in self.widths.iter().enumerate() {
            worksheet.set_column_width(column_index(column)?, *width as f64)?;
        }

        for (index, cells) in self.rows.iter().enumerate() {
            let row = u32::try_from(index + 1)
                .map_err(|_| ExportError::TooLarge(format!("{} rows", self.rows.len())))?;
            for (column, cell) in cells.iter().enumerate() {
                let column = column_index(column)?;
                match cell {
                    CellValue::Text(text) => {
                        worksheet.write_string(row, column, text.as_str())?;
                    }
                    CellValue::Number(number) => {
                        worksheet.write_number(row, column, *number)?;
                    }
                    CellValue::Empty => {}
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn column_index(column: usize) -> Result<u16, ExportError> {
    u16::try_from(column).map_err(|_| ExportError::TooLarge(format!("{column} columns")))
}

/// Key/value pairs of one lead, in the lead's field order.
pub fn lead_row(lead: &Lead) -> Vec<(&'static str, CellValue)> {
    LeadField::ALL
        .into_iter()
        .map(|field| {
            let value = match field {
                LeadField::Rating => lead.rating.map_or(CellValue::Empty, CellValue::Number),
                LeadField::Reviews => lead
                    .reviews
                    .map_or(CellValue::Empty, |r| CellValue::Number(r as f64)),
                _ => {
                    let text = lead.field_text(field);
                    if text.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(text.into_owned())
                    }
                }
            };
            (field.as_str(), value)
        })
        .collect()
}

/// Writes the given leads to an XLSX document.
pub fn export_leads(leads: &[&Lead]) -> Result<Vec<u8>, ExportError> {
    Sheet::from_rows(leads.iter().map(|lead| lead_row(lead))).to_xlsx()
}
