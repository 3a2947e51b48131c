//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Figure and axes background
    pub background_color: Color32,
    /// Every series is drawn in this one colour; only the legend label tells them apart.
    pub series_color: Color32,
    pub series_line_width: f32,

    /// Axis labels, tick labels, title and legend text
    pub axis_text_color: Color32,
    pub legend_border_color: Color32,

    // --- GRID ---
    pub grid_color: Color32,
    pub grid_opacity: f32,
    pub grid_dash_length: f32,
    pub grid_line_width: f32,
    /// Roughly how many gridlines to aim for along each axis
    pub grid_target_divisions: f64,

    /// Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)
    pub plot_y_padding_pct: f64,

    // --- HOVER ---
    /// Tooltip shows only when the nearest point is closer than this, measured in raw
    /// (ordinal day, value) units without any per-axis rescaling.
    pub hover_threshold: f64,
    pub hover_marker_radius: f32,
    pub hover_marker_color: Color32,
    /// Screen offset of the tooltip box from its anchor point
    pub tooltip_offset: [f32; 2],
    pub tooltip_background: Color32,
    pub tooltip_text_color: Color32,

    // --- IMAGE EXPORT ---
    /// On-screen pixels are multiplied by this when writing the PNG (300 dpi vs 100 dpi display).
    pub export_scale: u32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    background_color: Color32::from_rgb(18, 18, 18), // #121212
    series_color: Color32::from_rgb(31, 119, 180),   // #1f77b4
    series_line_width: 2.0,

    axis_text_color: Color32::WHITE,
    legend_border_color: Color32::WHITE,

    grid_color: Color32::GRAY,
    grid_opacity: 0.5,
    grid_dash_length: 6.0,
    grid_line_width: 1.0,
    grid_target_divisions: 8.0,

    plot_y_padding_pct: 0.05,

    hover_threshold: 50.0,
    hover_marker_radius: 4.0,
    hover_marker_color: Color32::WHITE,
    tooltip_offset: [20.0, 20.0],
    tooltip_background: Color32::WHITE,
    tooltip_text_color: Color32::BLACK,

    export_scale: 3,
};
