use csv::WriterBuilder;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::Workbook;
use crate::errors::AppResult;

pub trait WorkbookWriter {
    /// Writes the workbook under `out_dir` and returns where it landed.
    fn write(&self, workbook: &Workbook, out_dir: &Path) -> AppResult<PathBuf>;
}

/// Fallback writer: `<out_dir>/<stem>/NN_<Sheet>.csv`, one file per sheet,
/// numbered to keep sheet order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvBundleWriter;

impl WorkbookWriter for CsvBundleWriter {
    fn write(&self, workbook: &Workbook, out_dir: &Path) -> AppResult<PathBuf> {
        warn!(workbook = %workbook.stem, "No spreadsheet writer available, exporting sheets as CSV files");

        let bundle_dir = out_dir.join(&workbook.stem);
        std::fs::create_dir_all(&bundle_dir)?;

        for (index, sheet) in workbook.sheets.iter().enumerate() {
            let path = bundle_dir.join(format!("{:02}_{}.csv", index + 1, sheet.name));
            let mut writer = WriterBuilder::new().flexible(true).from_path(&path)?;
            writer.write_record(&sheet.headers)?;
            for row in &sheet.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }

        info!(path = %bundle_dir.display(), sheets = workbook.sheets.len(), "Workbook exported");
        Ok(bundle_dir)
    }
}
