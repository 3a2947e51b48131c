//! File persistence configuration
use std::path::PathBuf;

use crate::export::ExportFormat;

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading application UI state
    pub state_path: &'static str,
}

/// Default file names offered in the export inputs
pub struct ExportPersistenceConfig {
    pub spreadsheet_stem: &'static str,
    pub image_stem: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub app: AppPersistenceConfig,
    pub export: ExportPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    app: AppPersistenceConfig {
        state_path: ".indicator_desk_state.json",
    },
    export: ExportPersistenceConfig {
        spreadsheet_stem: "indicators",
        image_stem: "indicators_chart",
    },
};

/// Example: `indicators.xlsx`, `indicators_chart.png`
pub fn default_export_path(format: ExportFormat) -> PathBuf {
    let stem = match format {
        ExportFormat::Xlsx | ExportFormat::Csv => PERSISTENCE.export.spreadsheet_stem,
        ExportFormat::Png => PERSISTENCE.export.image_stem,
    };
    PathBuf::from(format!("{}.{}", stem, format.extension()))
}
