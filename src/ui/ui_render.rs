use eframe::egui::{
    Align2, CentralPanel, Context, RichText, ScrollArea, SidePanel, TopBottomPanel, Ui, Window,
};

use crate::app::{App, FetchingState};
use crate::ui::styles::UiStyleExt;
use crate::ui::{
    ControlsInputs, ControlsPanel, Panel, UI_CONFIG, UI_TEXT, render_fetch_progress,
};

impl App {
    /// Lays out every panel for one frame. `fetching` is set while a query runs.
    pub(crate) fn render_frame(&mut self, ctx: &Context, fetching: Option<&FetchingState>) {
        self.render_controls_panel(ctx);
        self.render_status_panel(ctx, fetching);
        self.render_central_panel(ctx, fetching);
        self.render_dialog(ctx);
    }

    fn render_controls_panel(&mut self, ctx: &Context) {
        let busy = self.is_busy();
        let can_export = self.can_export();
        let mut events = Vec::new();

        SidePanel::left("controls_panel")
            .exact_width(UI_CONFIG.side_panel_width)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    let inputs = ControlsInputs {
                        start_date: &mut self.start_date,
                        end_date: &mut self.end_date,
                        selected: &mut self.selected,
                        spreadsheet_path: &mut self.spreadsheet_path,
                        image_path: &mut self.image_path,
                    };
                    events = ControlsPanel::new(inputs, busy, can_export).render(ui);
                });
            });

        // A modal is up; its OK button is the only thing that should react.
        if self.dialog.is_none() {
            self.handle_controls_events(ctx, events);
        }
    }

    fn render_status_panel(&self, ctx: &Context, fetching: Option<&FetchingState>) {
        TopBottomPanel::bottom("status_panel")
            .frame(UI_CONFIG.bottom_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(state) = fetching {
                        ui.spinner();
                        ui.metric(
                            &UI_TEXT.fp_title,
                            &format!("{}/{}", state.finished(), state.rows.len()),
                            UI_CONFIG.colors.subsection_heading,
                        );
                        return;
                    }
                    match &self.session {
                        Some(session) => self.render_session_status(ui, session),
                        None => ui.label_subdued(&UI_TEXT.sb_ready),
                    }
                    if let Some(msg) = &self.last_export {
                        ui.separator();
                        ui.label_subdued(msg);
                    }
                });
            });
    }

    fn render_session_status(&self, ui: &mut Ui, session: &crate::engine::QuerySession) {
        ui.metric(
            &UI_TEXT.sb_session,
            &format!("{} ({})", session.store.names().join(", "), session.range),
            UI_CONFIG.colors.label,
        );
        ui.metric(
            &UI_TEXT.sb_points,
            &session.store.total_points().to_string(),
            UI_CONFIG.colors.label,
        );
        if !session.failures.is_empty() {
            ui.separator();
            let names: Vec<&str> = session
                .failures
                .iter()
                .map(|f| f.indicator.as_str())
                .collect();
            let hover = session
                .failures
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            ui.label(
                RichText::new(format!("{} {}", UI_TEXT.sb_failed, names.join(", ")))
                    .small()
                    .color(UI_CONFIG.colors.error),
            )
            .on_hover_text(hover);
        }
    }

    fn render_central_panel(&mut self, ctx: &Context, fetching: Option<&FetchingState>) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                if let Some(state) = fetching {
                    render_fetch_progress(ui, state);
                    return;
                }
                match &self.session {
                    Some(session) => self.plot_view.show(ui, &session.chart),
                    None => render_fullscreen_message(
                        ui,
                        &UI_TEXT.plot_empty,
                        &UI_TEXT.plot_empty_hint,
                    ),
                }
            });
    }

    fn render_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = &self.dialog else {
            return;
        };
        let mut close = false;
        Window::new(&dialog.title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                let color = if dialog.is_error {
                    UI_CONFIG.colors.error
                } else {
                    UI_CONFIG.colors.heading
                };
                ui.label(RichText::new(&dialog.message).color(color));
                if !dialog.details.is_empty() {
                    ui.add_space(6.0);
                    ui.label_subheader(&UI_TEXT.dlg_failures_heading);
                    for line in &dialog.details {
                        ui.label_error(line);
                    }
                }
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button(&UI_TEXT.dlg_ok).clicked() {
                        close = true;
                    }
                });
            });
        if close {
            self.dialog = None;
        }
    }
}

fn render_fullscreen_message(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new(title).color(UI_CONFIG.colors.heading));
        ui.add_space(6.0);
        ui.label(RichText::new(subtitle).color(UI_CONFIG.colors.subdued));
    });
}
