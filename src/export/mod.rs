mod chart_image;
mod spreadsheet;

use std::path::Path;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

pub use chart_image::{RgbaCapture, write_png};
pub use spreadsheet::{write_csv, write_spreadsheet, write_xlsx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ExportFormat {
    #[strum(to_string = "Excel workbook")]
    Xlsx,
    #[strum(to_string = "CSV")]
    Csv,
    #[strum(to_string = "PNG image")]
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Png => "png",
        }
    }

    /// Case-insensitive match on the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Spreadsheets are xlsx unless the path explicitly asks for csv.
    pub fn spreadsheet_for(path: &Path) -> Self {
        match Self::from_path(path) {
            Some(Self::Csv) => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export. Run a query first.")]
    NothingToExport,

    #[error("Export path is empty.")]
    EmptyPath,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Captured image is invalid: {0}")]
    InvalidImage(String),
}
