pub(super) mod fetching;
pub(super) mod idle;
pub(super) mod phase_view;

pub(crate) use phase_view::PhaseView;
