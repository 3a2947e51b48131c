use {
    chrono::{Local, TimeDelta},
    eframe::{
        Frame, Storage,
        egui::{ColorImage, Context, Event, Pos2, Rect, UserData, Vec2, ViewportCommand},
    },
    serde::{Deserialize, Serialize},
    std::{mem, path::PathBuf, sync::Arc},
};

use crate::{
    Cli,
    app::{AppState, Dialog, FetchingState, IdleState, PhaseView},
    config::{DF, PLOT_CONFIG, default_export_path},
    data::REGISTRY,
    engine::{QueryError, QueryHandle, QueryRequest, QuerySession, spawn_query},
    export::{ExportError, ExportFormat, RgbaCapture, write_png, write_spreadsheet},
    ui::{ControlsEvent, PlotView, UI_TEXT, setup_custom_visuals},
    utils::format_date,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    // Inputs persist across sessions; fetched data never does.
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    pub(crate) selected: Vec<String>,
    pub(crate) spreadsheet_path: String,
    pub(crate) image_path: String,

    #[serde(skip)]
    pub(crate) session: Option<QuerySession>,
    #[serde(skip)]
    pub(crate) plot_view: PlotView,
    #[serde(skip)]
    state: AppState,
    #[serde(skip)]
    pub(crate) query_handle: Option<QueryHandle>,
    #[serde(skip)]
    pub(crate) dialog: Option<Dialog>,
    /// Image export waiting for the screenshot requested last frame
    #[serde(skip)]
    pub(crate) pending_image_export: Option<PathBuf>,
    #[serde(skip)]
    pub(crate) last_export: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            start_date: format_date(today - TimeDelta::days(365)),
            end_date: format_date(today),
            selected: Vec::new(),
            spreadsheet_path: default_export_path(ExportFormat::Xlsx)
                .display()
                .to_string(),
            image_path: default_export_path(ExportFormat::Png).display().to_string(),
            session: None,
            plot_view: PlotView::new(),
            state: AppState::default(),
            query_handle: None,
            dialog: None,
            pending_image_export: None,
            last_export: None,
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.apply_cli(&args);
        app.plot_view = PlotView::new();
        app.state = AppState::Idle(IdleState);
        app
    }

    /// Command-line values override whatever was restored from storage.
    fn apply_cli(&mut self, args: &Cli) {
        if let Some(start) = &args.start {
            self.start_date = start.clone();
        }
        if let Some(end) = &args.end {
            self.end_date = end.clone();
        }
        if let Some(list) = &args.indicators {
            self.selected = REGISTRY.in_registry_order(list.as_slice());
        } else {
            // Stored selection may name indicators that no longer exist
            self.selected = REGISTRY.in_registry_order(self.selected.as_slice());
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.query_handle.is_some()
    }

    pub(crate) fn can_export(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.store.is_empty())
    }

    pub(crate) fn handle_controls_events(&mut self, ctx: &Context, events: Vec<ControlsEvent>) {
        for event in events {
            match event {
                ControlsEvent::Query => self.submit_query(),
                ControlsEvent::ExportSpreadsheet => self.export_spreadsheet(),
                ControlsEvent::ExportImage => self.request_image_export(ctx),
            }
        }
    }

    /// Validation failures leave the current session untouched. Otherwise the session is
    /// dropped and a fresh one is fetched in the background.
    fn submit_query(&mut self) {
        if self.is_busy() {
            return;
        }
        let request =
            match QueryRequest::from_inputs(&self.start_date, &self.end_date, self.selected.clone())
            {
                Ok(request) => request,
                Err(e) => {
                    log::warn!("Query rejected: {}", e);
                    self.dialog = Some(Dialog::error(&UI_TEXT.dlg_query_title, e.to_string()));
                    return;
                }
            };

        self.session = None;
        self.plot_view.reset();
        self.last_export = None;
        let fetching = FetchingState::new(&request);
        self.query_handle = Some(spawn_query(request));
        self.state = AppState::Fetching(fetching);
    }

    pub(crate) fn tick_idle_state(&mut self, ctx: &Context) -> AppState {
        self.render_frame(ctx, None);
        self.process_screenshot(ctx);
        AppState::Idle(IdleState)
    }

    pub(crate) fn tick_fetching_state(
        &mut self,
        ctx: &Context,
        state: &mut FetchingState,
    ) -> AppState {
        if let Some(handle) = &self.query_handle {
            for event in handle.poll_progress() {
                state.apply(event);
            }
        }
        ctx.request_repaint();

        if let Some(result) = self.query_handle.as_ref().and_then(|h| h.try_result()) {
            self.query_handle = None;
            self.finish_query(result);
            self.render_frame(ctx, None);
            return AppState::Idle(IdleState);
        }

        self.render_frame(ctx, Some(&*state));
        AppState::Fetching(mem::take(state))
    }

    fn finish_query(&mut self, result: Result<QuerySession, QueryError>) {
        match result {
            Ok(session) => {
                if DF.log_queries {
                    log::info!(
                        "Session ready: {} series, {} failed",
                        session.store.len(),
                        session.failures.len()
                    );
                }
                self.plot_view.reset();
                self.session = Some(session);
            }
            Err(e) => {
                let details = match &e {
                    QueryError::NoDataAvailable { failures } => {
                        failures.iter().map(|f| f.to_string()).collect()
                    }
                    _ => Vec::new(),
                };
                self.session = None;
                self.dialog = Some(
                    Dialog::error(&UI_TEXT.dlg_query_title, e.to_string()).with_details(details),
                );
            }
        }
    }

    fn export_spreadsheet(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let path = PathBuf::from(self.spreadsheet_path.trim());
        match write_spreadsheet(&session.store, &path) {
            Ok(format) => {
                let msg = format!("{} {} ({})", UI_TEXT.sb_exported, path.display(), format);
                self.dialog = Some(Dialog::info(&UI_TEXT.cp_export_spreadsheet, &msg));
                self.last_export = Some(msg);
            }
            Err(e) => {
                log::error!("Spreadsheet export to {} failed: {}", path.display(), e);
                self.dialog = Some(Dialog::error(&UI_TEXT.dlg_export_title, e.to_string()));
            }
        }
    }

    fn request_image_export(&mut self, ctx: &Context) {
        if !self.can_export() {
            return;
        }
        self.pending_image_export = Some(PathBuf::from(self.image_path.trim()));
        ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::default()));
    }

    /// Completes a pending image export once the screenshot arrives.
    fn process_screenshot(&mut self, ctx: &Context) {
        if self.pending_image_export.is_none() {
            return;
        }
        let image: Option<Arc<ColorImage>> = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = image {
            self.complete_image_export(&image, ctx.pixels_per_point());
        }
    }

    /// Crops the chart out of a full-window screenshot and writes it to the pending path.
    /// Every outcome ends the pending export and is reported in a dialog.
    pub(crate) fn complete_image_export(&mut self, image: &ColorImage, pixels_per_point: f32) {
        let Some(path) = self.pending_image_export.take() else {
            return;
        };
        let result = match self.plot_view.last_rect() {
            Some(rect) => write_png(
                capture_region(image, rect, pixels_per_point),
                PLOT_CONFIG.export_scale,
                &path,
            ),
            None => Err(ExportError::InvalidImage(
                "the chart is not on screen".to_string(),
            )),
        };

        match result {
            Ok((w, h)) => {
                let msg = format!("{} {} ({}x{})", UI_TEXT.sb_exported, path.display(), w, h);
                self.dialog = Some(Dialog::info(&UI_TEXT.cp_export_image, &msg));
                self.last_export = Some(msg);
            }
            Err(e) => {
                log::error!("Image export to {} failed: {}", path.display(), e);
                self.dialog = Some(Dialog::error(&UI_TEXT.dlg_export_title, e.to_string()));
            }
        }
    }
}

/// The part of `image` under `rect` (in points). Anything outside the screenshot is cut off.
fn capture_region(image: &ColorImage, rect: Rect, pixels_per_point: f32) -> RgbaCapture {
    let [w, h] = image.size;
    let screen = Rect::from_min_size(
        Pos2::ZERO,
        Vec2::new(w as f32, h as f32) / pixels_per_point,
    );
    let rect = rect.intersect(screen);
    if !rect.is_positive() {
        return RgbaCapture::new(0, 0, Vec::new());
    }
    let region = image.region(&rect, Some(pixels_per_point));
    let [w, h] = region.size;
    let rgba = region
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    RgbaCapture::new(w as u32, h as u32, rgba)
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Idle(mut s) => s.tick(self, ctx),
            AppState::Fetching(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ChartState;
    use crate::data::ResultStore;
    use crate::domain::{DateRange, RawObservation, TimeSeries};
    use crate::engine::FetchError;
    use chrono::NaiveDate;
    use eframe::egui::{CentralPanel, RawInput};

    fn session() -> QuerySession {
        let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
        let mut store = ResultStore::new();
        store.put(
            "CDI",
            TimeSeries::from_raw(
                "CDI",
                [
                    RawObservation::new(day(2), Some(0.05)),
                    RawObservation::new(day(3), Some(0.06)),
                ],
            ),
        );
        QuerySession {
            range: DateRange::new(day(1), day(10)).unwrap(),
            chart: ChartState::from_store(&store),
            store,
            failures: Vec::new(),
        }
    }

    fn app_with_session() -> App {
        let mut app = App::default();
        app.session = Some(session());
        app.selected = vec!["CDI".to_string()];
        app
    }

    #[test]
    fn bad_dates_keep_prior_session_and_start_nothing() {
        let mut app = app_with_session();
        app.start_date = "2023-02-01".into();
        app.end_date = "2023-01-01".into();

        app.submit_query();

        assert!(app.query_handle.is_none());
        assert!(matches!(app.state, AppState::Idle(_)));
        assert_eq!(app.session.as_ref().map(|s| s.store.names()), Some(vec!["CDI"]));
        assert!(app.can_export());
        assert!(app.dialog.as_ref().is_some_and(|d| d.is_error));
    }

    #[test]
    fn empty_selection_keeps_prior_session() {
        let mut app = app_with_session();
        app.start_date = "2023-01-01".into();
        app.end_date = "2023-01-10".into();
        app.selected.clear();

        app.submit_query();

        assert!(app.query_handle.is_none());
        assert!(app.session.is_some());
        let dialog = app.dialog.unwrap();
        assert_eq!(dialog.message, QueryError::NoIndicatorSelected.to_string());
    }

    #[test]
    fn no_data_clears_session_and_disables_export() {
        let mut app = app_with_session();
        let failure = FetchError {
            indicator: "S&P 500".into(),
            cause: "No data found, symbol may be delisted".into(),
        };

        app.finish_query(Err(QueryError::NoDataAvailable {
            failures: vec![failure.clone()],
        }));

        assert!(app.session.is_none());
        assert!(!app.can_export());
        let dialog = app.dialog.unwrap();
        assert!(dialog.is_error);
        assert_eq!(dialog.details, vec![failure.to_string()]);
    }

    #[test]
    fn finished_session_enables_export() {
        let mut app = App::default();
        assert!(!app.can_export());
        app.finish_query(Ok(session()));
        assert!(app.can_export());
        assert!(app.dialog.is_none());
    }

    #[test]
    fn screenshot_without_chart_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut app = app_with_session();
        app.pending_image_export = Some(path.clone());

        let image = ColorImage::from_rgba_unmultiplied([4, 4], &[0; 64]);
        app.complete_image_export(&image, 1.0);

        assert!(app.pending_image_export.is_none());
        assert!(app.dialog.as_ref().is_some_and(|d| d.is_error));
        assert!(!path.exists());
    }

    #[test]
    fn screenshot_is_cropped_to_chart_and_scaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut app = app_with_session();
        let chart = session().chart;

        let ctx = Context::default();
        let input = RawInput {
            screen_rect: Some(Rect::from_min_max(Pos2::ZERO, Pos2::new(400.0, 300.0))),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| app.plot_view.show(ui, &chart));
        });
        let rect = app.plot_view.last_rect().unwrap();

        app.pending_image_export = Some(path.clone());
        let image = ColorImage::from_rgba_unmultiplied([400, 300], &vec![255; 400 * 300 * 4]);
        app.complete_image_export(&image, 1.0);

        assert!(app.dialog.as_ref().is_some_and(|d| !d.is_error));
        let written = image::open(&path).unwrap();
        let scale = PLOT_CONFIG.export_scale;
        let width = rect.max.x as u32 - rect.min.x as u32;
        let height = rect.max.y as u32 - rect.min.y as u32;
        assert_eq!((written.width(), written.height()), (width * scale, height * scale));
        assert!(height > 40);
    }

    #[test]
    fn crop_is_clamped_to_the_screenshot() {
        let image = ColorImage::from_rgba_unmultiplied([10, 8], &[7; 10 * 8 * 4]);
        let rect = Rect::from_min_max(Pos2::new(4.0, 2.0), Pos2::new(50.0, 50.0));

        let capture = capture_region(&image, rect, 1.0);
        assert_eq!((capture.width, capture.height), (6, 6));
        assert_eq!(capture.rgba.len(), 6 * 6 * 4);

        let off_screen = Rect::from_min_max(Pos2::new(20.0, 20.0), Pos2::new(30.0, 30.0));
        assert_eq!(capture_region(&image, off_screen, 1.0).width, 0);
    }
}
