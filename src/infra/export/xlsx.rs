use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::dataset::Record;

const SHEET_NAME: &str = "Data";

/// Single-sheet workbook: header row, then every cell written as a string.
pub fn to_xlsx(records: &[Record], headers: &[String]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            u16::try_from(idx)
                .map(|col| (col, header))
                .with_context(|| format!("too many columns for a worksheet: {}", headers.len()))
        })
        .collect::<Result<Vec<_>>>()?;

    for (col, header) in &columns {
        worksheet
            .write_string(0, *col, header.as_str())
            .context("failed to write header cell")?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .with_context(|| format!("too many rows for a worksheet: {}", records.len()))?;
        for (col, header) in &columns {
            worksheet
                .write_string(row, *col, record.value(header))
                .with_context(|| format!("failed to write cell at row {row}"))?;
        }
    }

    workbook
        .save_to_buffer()
        .context("failed to serialize xlsx workbook")
}
