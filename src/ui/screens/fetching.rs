use {
    crate::{
        app::FetchingState,
        engine::FetchStatus,
        ui::{UI_CONFIG, UI_TEXT, styles::StatusColor},
    },
    eframe::egui::{Align, Grid, Layout, ProgressBar, RichText, ScrollArea, Ui},
};

/// Per-indicator progress while a query is running.
pub(crate) fn render_fetch_progress(ui: &mut Ui, state: &FetchingState) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.heading(
            RichText::new(format!("{} {}", UI_TEXT.fp_title, state.range_label))
                .strong()
                .color(UI_CONFIG.colors.heading),
        );
        ui.add_space(20.0);

        let total = state.rows.len();
        let done = state.finished();
        let progress = if total > 0 {
            done as f32 / total as f32
        } else {
            0.0
        };
        ui.set_max_width(400.0);
        ui.add(
            ProgressBar::new(progress)
                .show_percentage()
                .animate(true)
                .text(format!("{}/{}", done, total)),
        );
        ui.add_space(20.0);
    });

    ScrollArea::vertical().show(ui, |ui| {
        Grid::new("fetch_progress_grid")
            .striped(true)
            .spacing([20.0, 8.0])
            .min_col_width(260.0)
            .show(ui, |ui| {
                for (name, status) in state.rows.values() {
                    ui.horizontal(|ui| {
                        ui.set_min_width(250.0);
                        ui.label(RichText::new(name).strong().color(UI_CONFIG.colors.label));
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| match status {
                            FetchStatus::Fetching => {
                                ui.spinner();
                            }
                            FetchStatus::Failed(cause) => {
                                ui.label(RichText::new(status.short_text()).color(status.color()))
                                    .on_hover_text(cause);
                            }
                            _ => {
                                ui.label(RichText::new(status.short_text()).color(status.color()));
                            }
                        });
                    });
                    ui.end_row();
                }
            });
    });
}
