use eframe::egui::{
    Align2, Area, Frame, Id, Order, Pos2, Rect, RichText, Stroke, Ui, Vec2, Vec2b,
};
use egui_plot::{Axis, AxisHints, Corner, GridMark, Legend, Plot, PlotPoint, VPlacement};

use crate::analysis::{ChartState, HoverHit, hit_test};
use crate::config::{DF, PLOT_CONFIG};
use crate::ui::UI_TEXT;
use crate::ui::plot_layers::{
    GridLayer, HoverLayer, LayerContext, PlotLayer, SeriesLayer, calculate_adaptive_step,
    grid_values,
};
use crate::utils::{date_from_ordinal, format_date};

/// Chart widget state that lives across frames.
#[derive(Default)]
pub struct PlotView {
    hover: Option<HoverHit>,
    /// Screen rect of the last drawn chart (title, axes and plot), used to crop
    /// screenshots for image export
    last_rect: Option<Rect>,
    /// Refit the axes to the data on the next frame
    fit_pending: bool,
}

// Ordinal day -> "YYYY-MM-DD"; marks that are not whole days get no label.
fn create_date_axis() -> AxisHints<'static> {
    AxisHints::new(Axis::X)
        .label(UI_TEXT.plot_x_axis.as_str())
        .formatter(|mark, _range| {
            if mark.value.fract() != 0.0 {
                return String::new();
            }
            date_from_ordinal(mark.value)
                .map(format_date)
                .unwrap_or_default()
        })
        .placement(VPlacement::Bottom)
}

fn create_value_axis() -> AxisHints<'static> {
    AxisHints::new(Axis::Y)
        .label(UI_TEXT.plot_y_axis.as_str())
        .formatter(|mark, _range| format!("{}", mark.value))
}

fn adaptive_marks(bounds: (f64, f64), min_step: f64) -> Vec<GridMark> {
    let (min, max) = bounds;
    let step = calculate_adaptive_step(max - min, PLOT_CONFIG.grid_target_divisions, min_step);
    grid_values(min, max, step)
        .into_iter()
        .map(|value| GridMark {
            value,
            step_size: step,
        })
        .collect()
}

impl PlotView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget hover and capture state when a new session replaces the chart.
    pub fn reset(&mut self) {
        self.hover = None;
        self.last_rect = None;
        self.fit_pending = true;
    }

    pub fn last_rect(&self) -> Option<Rect> {
        self.last_rect
    }

    pub fn show(&mut self, ui: &mut Ui, chart: &ChartState) {
        let outer = ui.scope(|ui| self.show_chart(ui, chart));
        // Title, tick labels and axis labels all sit outside the plot frame itself.
        self.last_rect = Some(outer.response.rect);
    }

    fn show_chart(&mut self, ui: &mut Ui, chart: &ChartState) {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(&UI_TEXT.plot_title)
                    .heading()
                    .color(PLOT_CONFIG.axis_text_color),
            );
        });

        let fit_view = std::mem::take(&mut self.fit_pending);

        // Legend, tick and axis text pick their colours from the ui visuals.
        ui.scope(|ui| {
            let visuals = ui.visuals_mut();
            visuals.override_text_color = Some(PLOT_CONFIG.axis_text_color);
            visuals.extreme_bg_color = PLOT_CONFIG.background_color;
            visuals.window_stroke = Stroke::new(1.0, PLOT_CONFIG.legend_border_color);
            visuals.widgets.noninteractive.bg_stroke =
                Stroke::new(1.0, PLOT_CONFIG.legend_border_color);

            let previous_hover = self.hover.clone();
            let response = Plot::new("indicator_plot")
                .legend(Legend::default().position(Corner::LeftTop))
                .custom_x_axes(vec![create_date_axis()])
                .custom_y_axes(vec![create_value_axis()])
                .show_grid(false)
                .set_margin_fraction(Vec2::new(0.0, PLOT_CONFIG.plot_y_padding_pct as f32))
                .label_formatter(|_, _| String::new())
                .x_grid_spacer(|input| adaptive_marks(input.bounds, 1.0))
                .y_grid_spacer(|input| adaptive_marks(input.bounds, 0.0))
                .allow_double_click_reset(true)
                .allow_drag(Vec2b { x: true, y: true })
                .allow_zoom(Vec2b { x: true, y: true })
                .show(ui, |plot_ui| {
                    if fit_view {
                        plot_ui.set_auto_bounds(true);
                    }

                    let ctx = LayerContext {
                        series: chart.series(),
                        hover: previous_hover.as_ref(),
                    };
                    let layers: [&dyn PlotLayer; 3] = [&GridLayer, &SeriesLayer, &HoverLayer];
                    for layer in layers {
                        layer.render(plot_ui, &ctx);
                    }
                });

            let pointer = response
                .response
                .hover_pos()
                .map(|pos| response.transform.value_from_position(pos))
                .map(|p| [p.x, p.y]);

            let hit = crate::trace_time!("Hover hit-test", 2_000, {
                hit_test(chart.series(), pointer, PLOT_CONFIG.hover_threshold)
            });

            if DF.log_hover {
                if let Some(h) = &hit {
                    log::info!("Hover {} {} = {} (d={:.3})", h.name, h.date, h.value, h.distance);
                }
            }

            if hit != self.hover {
                ui.ctx().request_repaint();
            }
            self.hover = hit;

            if let Some(h) = &self.hover {
                let anchor = response
                    .transform
                    .position_from_point(&PlotPoint::new(h.position[0], h.position[1]));
                show_hover_tooltip(ui, anchor, &h.tooltip_text());
            }
        });
    }
}

fn show_hover_tooltip(ui: &Ui, anchor: Pos2, text: &str) {
    let [dx, dy] = PLOT_CONFIG.tooltip_offset;
    Area::new(Id::new("indicator_hover_tooltip"))
        .order(Order::Tooltip)
        .pivot(Align2::LEFT_TOP)
        .fixed_pos(anchor + Vec2::new(dx, dy))
        .interactable(false)
        .show(ui.ctx(), |ui| {
            Frame::popup(ui.style())
                .fill(PLOT_CONFIG.tooltip_background)
                .stroke(Stroke::new(1.0, PLOT_CONFIG.tooltip_text_color))
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(text).color(PLOT_CONFIG.tooltip_text_color));
                });
        });
}
