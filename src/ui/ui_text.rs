use std::sync::LazyLock;

pub struct UiText {
    pub app_title: String,

    // --- Controls panel ---
    pub cp_date_heading: String,
    pub cp_start_date: String,
    pub cp_end_date: String,
    pub cp_invalid_date: String,
    pub cp_indicators_heading: String,
    pub cp_select_all: String,
    pub cp_select_none: String,
    pub cp_query: String,
    pub cp_export_heading: String,
    pub cp_export_spreadsheet: String,
    pub cp_export_image: String,
    pub cp_spreadsheet_path: String,
    pub cp_image_path: String,
    pub cp_export_disabled_hint: String,

    // --- Chart ---
    pub plot_title: String,
    pub plot_x_axis: String,
    pub plot_y_axis: String,
    pub plot_empty: String,
    pub plot_empty_hint: String,

    // --- Fetch progress ---
    pub fp_title: String,
    pub fp_fetching: String,
    pub fp_pending: String,
    pub fp_empty: String,
    pub fp_failed: String,
    pub fp_rows: String,

    // --- Status bar ---
    pub sb_ready: String,
    pub sb_session: String,
    pub sb_points: String,
    pub sb_failed: String,
    pub sb_exported: String,

    // --- Dialogs ---
    pub dlg_query_title: String,
    pub dlg_export_title: String,
    pub dlg_ok: String,
    pub dlg_failures_heading: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Indicator Desk".to_string(),

    cp_date_heading: "Date range".to_string(),
    cp_start_date: "Start".to_string(),
    cp_end_date: "End".to_string(),
    cp_invalid_date: "Not a YYYY-MM-DD date:".to_string(),
    cp_indicators_heading: "Indicators".to_string(),
    cp_select_all: "All".to_string(),
    cp_select_none: "None".to_string(),
    cp_query: "Query".to_string(),
    cp_export_heading: "Export".to_string(),
    cp_export_spreadsheet: "Export spreadsheet".to_string(),
    cp_export_image: "Export image".to_string(),
    cp_spreadsheet_path: "Spreadsheet file (.xlsx or .csv)".to_string(),
    cp_image_path: "Image file (.png)".to_string(),
    cp_export_disabled_hint: "Run a query first".to_string(),

    plot_title: "Financial Data".to_string(),
    plot_x_axis: "Date".to_string(),
    plot_y_axis: "Value".to_string(),
    plot_empty: "No data".to_string(),
    plot_empty_hint: "Pick a date range and some indicators, then press Query.".to_string(),

    fp_title: "Fetching".to_string(),
    fp_fetching: "fetching".to_string(),
    fp_pending: "-".to_string(),
    fp_empty: "no data".to_string(),
    fp_failed: "FAILED".to_string(),
    fp_rows: "rows".to_string(),

    sb_ready: "Ready".to_string(),
    sb_session: "Showing".to_string(),
    sb_points: "points".to_string(),
    sb_failed: "Failed:".to_string(),
    sb_exported: "Saved".to_string(),

    dlg_query_title: "Query".to_string(),
    dlg_export_title: "Export failed".to_string(),
    dlg_ok: "OK".to_string(),
    dlg_failures_heading: "Details".to_string(),
});
