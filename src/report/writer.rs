//! Semicolon-delimited CSV output for the restock report.

use crate::catalog::models::ReportRow;
use crate::error::RestockError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Field delimiter of the report.
pub const DELIMITER: u8 = b';';

/// Writes the header and one record per row to any writer.
pub fn write_rows<W: Write>(rows: &[ReportRow], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(writer);

    if rows.is_empty() {
        // serde headers are only emitted alongside the first record
        csv_writer.write_record([
            "Original Name",
            "Matched Unique Name",
            "Catalog Number",
            "URL",
            "Availability",
        ])?;
    }

    for row in rows {
        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the report to `path`, creating or truncating the file.
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<(), RestockError> {
    let file = std::fs::File::create(path).map_err(|e| RestockError::ReportWrite {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    write_rows(rows, file)
        .map_err(|source| RestockError::ReportWrite { path: path.to_path_buf(), source })?;

    info!("Wrote {} report rows to {}", rows.len(), path.display());
    Ok(())
}
