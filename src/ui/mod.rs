mod plot_layers;
mod screens;
pub(crate) mod styles;
mod ui_config;
mod ui_panels;
mod ui_plot_view;
mod ui_render;
mod ui_text;

pub(crate) use screens::render_fetch_progress;

pub(crate) use styles::setup_custom_visuals;

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::{ControlsEvent, ControlsInputs, ControlsPanel, Panel};
pub(crate) use ui_plot_view::PlotView;
