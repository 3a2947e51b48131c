use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::IdleState};

impl PhaseView for IdleState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_idle_state(ctx)
    }
}
