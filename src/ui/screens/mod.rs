mod fetching;

pub(crate) use fetching::render_fetch_progress;
