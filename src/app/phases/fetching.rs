use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::FetchingState};

impl PhaseView for FetchingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_fetching_state(ctx, self)
    }
}
