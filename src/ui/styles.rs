use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::engine::FetchStatus;
use crate::ui::{UI_CONFIG, UI_TEXT};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub fn apply_opacity(color: Color32, factor: f32) -> Color32 {
    color.linear_multiply(factor)
}

pub trait StatusColor {
    fn color(&self) -> Color32;
    fn short_text(&self) -> String;
}

impl StatusColor for FetchStatus {
    fn color(&self) -> Color32 {
        match self {
            Self::Pending => UI_CONFIG.colors.subdued,
            Self::Fetching => UI_CONFIG.colors.subsection_heading,
            Self::Completed(_) => UI_CONFIG.colors.success,
            Self::Empty => UI_CONFIG.colors.label,
            Self::Failed(_) => UI_CONFIG.colors.error,
        }
    }

    fn short_text(&self) -> String {
        match self {
            Self::Pending => UI_TEXT.fp_pending.clone(),
            Self::Fetching => UI_TEXT.fp_fetching.clone(),
            Self::Completed(n) => format!("{} {}", n, UI_TEXT.fp_rows),
            Self::Empty => UI_TEXT.fp_empty.clone(),
            Self::Failed(_) => UI_TEXT.fp_failed.clone(),
        }
    }
}

pub(crate) trait UiStyleExt {
    fn label_subdued(&mut self, text: impl Into<String>);
    fn label_error(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.subdued));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.error));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }
}

pub(crate) fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.side_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
