use egui_plot::{HLine, Line, LineStyle, PlotPoints, PlotUi, Points, VLine};

use crate::analysis::{HoverHit, PlottedSeries};
use crate::config::PLOT_CONFIG;
use crate::ui::styles::apply_opacity;

/// Data shared by every layer for one frame.
pub struct LayerContext<'a> {
    pub series: &'a [PlottedSeries],
    pub hover: Option<&'a HoverHit>,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// Human-friendly step size (1, 2, 5, 10, 20, 50...), never below `min_step`
pub(crate) fn calculate_adaptive_step(range: f64, target_count: f64, min_step: f64) -> f64 {
    if !range.is_finite() || range <= 0.0 {
        return min_step.max(f64::MIN_POSITIVE);
    }
    let raw_step = range / target_count.max(1.0);
    let mag = 10.0_f64.powi(raw_step.log10().floor() as i32);
    let normalized = raw_step / mag;

    let nice_step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };

    (nice_step * mag).max(min_step)
}

/// Multiples of `step` inside [min, max].
pub(crate) fn grid_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || step <= 0.0 || max < min {
        return Vec::new();
    }
    let start = (min / step).ceil() as i64;
    let end = (max / step).floor() as i64;
    (start..=end).map(|i| i as f64 * step).collect()
}

// ============================================================================
// 1. GRID LAYER (dashed, behind the data)
// ============================================================================
pub struct GridLayer;

impl PlotLayer for GridLayer {
    fn render(&self, plot_ui: &mut PlotUi, _ctx: &LayerContext) {
        let bounds = plot_ui.plot_bounds();
        let [x_min, y_min] = bounds.min();
        let [x_max, y_max] = bounds.max();

        let color = apply_opacity(PLOT_CONFIG.grid_color, PLOT_CONFIG.grid_opacity);
        let style = LineStyle::Dashed {
            length: PLOT_CONFIG.grid_dash_length,
        };

        // X is in whole days
        let x_step = calculate_adaptive_step(x_max - x_min, PLOT_CONFIG.grid_target_divisions, 1.0);
        for x in grid_values(x_min, x_max, x_step) {
            plot_ui.vline(
                VLine::new("", x)
                    .color(color)
                    .style(style)
                    .width(PLOT_CONFIG.grid_line_width),
            );
        }

        let y_step = calculate_adaptive_step(y_max - y_min, PLOT_CONFIG.grid_target_divisions, 0.0);
        for y in grid_values(y_min, y_max, y_step) {
            plot_ui.hline(
                HLine::new("", y)
                    .color(color)
                    .style(style)
                    .width(PLOT_CONFIG.grid_line_width),
            );
        }
    }
}

// ============================================================================
// 2. SERIES LAYER (one line per indicator, legend label = indicator name)
// ============================================================================
pub struct SeriesLayer;

impl PlotLayer for SeriesLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for series in ctx.series.iter().filter(|s| !s.is_empty()) {
            plot_ui.line(
                Line::new(series.name.clone(), PlotPoints::new(series.points.clone()))
                    .color(PLOT_CONFIG.series_color)
                    .width(PLOT_CONFIG.series_line_width),
            );
        }
    }
}

// ============================================================================
// 3. HOVER LAYER (marker on the point the tooltip describes)
// ============================================================================
pub struct HoverLayer;

impl PlotLayer for HoverLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(hit) = ctx.hover {
            plot_ui.points(
                Points::new("", vec![hit.position])
                    .radius(PLOT_CONFIG.hover_marker_radius)
                    .color(PLOT_CONFIG.hover_marker_color)
                    .filled(true),
            );
        }
    }
}
