// src/export.rs
use std::path::Path;

use anyhow::{Context, Result};

use crate::convert::Transaction;

/// Write the table as UTF-8 CSV with a header row. Absent fields serialize
/// as empty cells.
pub fn write_csv(path: impl AsRef<Path>, rows: &[Transaction]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write CSV file: {}", path.display()))?;
    Ok(())
}

/// Read a table previously written by [`write_csv`]. Empty cells come back
/// as `None`.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open CSV file: {}", path.display()))?;
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: Transaction =
            result.with_context(|| format!("CSV parse error in {} at row {idx}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}
