use chrono::{Local, NaiveDate};
use eframe::egui::{Button, Grid, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::DatePickerButton;

use crate::data::REGISTRY;
use crate::ui::styles::UiStyleExt;
use crate::ui::{UI_CONFIG, UI_TEXT};
use crate::utils::{TimeUtils, format_date, parse_date};

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsEvent {
    Query,
    ExportSpreadsheet,
    ExportImage,
}

/// User inputs the controls panel edits in place.
pub struct ControlsInputs<'a> {
    pub start_date: &'a mut String,
    pub end_date: &'a mut String,
    pub selected: &'a mut Vec<String>,
    pub spreadsheet_path: &'a mut String,
    pub image_path: &'a mut String,
}

/// Date inputs, indicator checklist, query and export buttons.
pub struct ControlsPanel<'a> {
    inputs: ControlsInputs<'a>,
    /// A query is running; everything but the inputs is locked
    busy: bool,
    /// The store holds a session
    can_export: bool,
}

impl<'a> ControlsPanel<'a> {
    pub fn new(inputs: ControlsInputs<'a>, busy: bool, can_export: bool) -> Self {
        Self {
            inputs,
            busy,
            can_export,
        }
    }

    fn render_dates(&mut self, ui: &mut Ui) {
        ui.label_subheader(&UI_TEXT.cp_date_heading);
        let today = Local::now().date_naive();
        Grid::new("date_inputs")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label(&UI_TEXT.cp_start_date);
                date_picker(ui, "start_date_picker", self.inputs.start_date, today);
                ui.end_row();
                ui.label(&UI_TEXT.cp_end_date);
                date_picker(ui, "end_date_picker", self.inputs.end_date, today);
                ui.end_row();
            });
    }

    fn render_checklist(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label_subheader(&UI_TEXT.cp_indicators_heading);
            if ui.small_button(&UI_TEXT.cp_select_all).clicked() {
                *self.inputs.selected = REGISTRY
                    .list_indicators()
                    .into_iter()
                    .map(String::from)
                    .collect();
            }
            if ui.small_button(&UI_TEXT.cp_select_none).clicked() {
                self.inputs.selected.clear();
            }
        });

        ScrollArea::vertical()
            .id_salt("indicator_checklist")
            .max_height(280.0)
            .show(ui, |ui| {
                let mut changed = false;
                for indicator in REGISTRY.iter() {
                    let mut on = self.inputs.selected.iter().any(|s| s == indicator.name);
                    let response = ui
                        .checkbox(&mut on, indicator.name)
                        .on_hover_text(indicator.source.to_string());
                    if response.changed() {
                        changed = true;
                        if on {
                            self.inputs.selected.push(indicator.name.to_string());
                        } else {
                            self.inputs.selected.retain(|s| s != indicator.name);
                        }
                    }
                }
                if changed {
                    *self.inputs.selected =
                        REGISTRY.in_registry_order(self.inputs.selected.as_slice());
                }
            });
    }

    fn render_exports(&mut self, ui: &mut Ui, events: &mut Vec<ControlsEvent>) {
        ui.label_subheader(&UI_TEXT.cp_export_heading);
        let enabled = self.can_export && !self.busy;

        ui.label_subdued(&UI_TEXT.cp_spreadsheet_path);
        ui.add(TextEdit::singleline(self.inputs.spreadsheet_path).desired_width(f32::INFINITY));
        let response = ui.add_enabled(enabled, Button::new(&UI_TEXT.cp_export_spreadsheet));
        if response.clicked() {
            events.push(ControlsEvent::ExportSpreadsheet);
        }
        response.on_disabled_hover_text(&UI_TEXT.cp_export_disabled_hint);

        ui.add_space(6.0);
        ui.label_subdued(&UI_TEXT.cp_image_path);
        ui.add(TextEdit::singleline(self.inputs.image_path).desired_width(f32::INFINITY));
        let response = ui.add_enabled(enabled, Button::new(&UI_TEXT.cp_export_image));
        if response.clicked() {
            events.push(ControlsEvent::ExportImage);
        }
        response.on_disabled_hover_text(&UI_TEXT.cp_export_disabled_hint);
    }
}

/// Date the picker opens on: the stored text if it parses, else `fallback`.
fn picker_seed(text: &str, fallback: NaiveDate) -> (NaiveDate, bool) {
    match parse_date(text) {
        Some(date) => (date, true),
        None => (fallback, false),
    }
}

// Dates live as text so CLI and restored values go through the same validation as a query.
// Picking a day overwrites the text; an unparsable value is flagged until then.
fn date_picker(ui: &mut Ui, id: &str, text: &mut String, fallback: NaiveDate) {
    let (mut date, valid) = picker_seed(text, fallback);
    let before = date;
    let picked = ui
        .vertical(|ui| {
            let response = ui.add(
                DatePickerButton::new(&mut date)
                    .id_salt(id)
                    .format(TimeUtils::STANDARD_DATE_FORMAT)
                    .calendar_week(false),
            );
            if !valid {
                ui.label_error(format!("{} '{}'", UI_TEXT.cp_invalid_date, text));
            }
            response.changed()
        })
        .inner;
    if picked || date != before {
        *text = format_date(date);
    }
}

impl<'a> Panel for ControlsPanel<'a> {
    type Event = ControlsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.heading(RichText::new(&UI_TEXT.app_title).color(UI_CONFIG.colors.heading));
        ui.add_space(8.0);

        self.render_dates(ui);
        ui.add_space(10.0);
        self.render_checklist(ui);
        ui.add_space(10.0);

        let query = ui.add_enabled(
            !self.busy,
            Button::new(RichText::new(&UI_TEXT.cp_query).strong()).min_size([120.0, 26.0].into()),
        );
        if query.clicked() {
            events.push(ControlsEvent::Query);
        }

        ui.add_space(10.0);
        ui.separator();
        self.render_exports(ui, &mut events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_opens_on_stored_date() {
        let fallback = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(
            picker_seed("2023-01-10", fallback),
            (NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(), true)
        );
    }

    #[test]
    fn unparsable_text_falls_back_and_is_flagged() {
        let fallback = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(picker_seed("10/01/2023", fallback), (fallback, false));
        assert_eq!(picker_seed("", fallback), (fallback, false));
    }
}
