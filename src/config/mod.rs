//! Configuration module for the indicator desk.

mod debug;
mod persistence;
mod providers;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use debug::DF;
pub use persistence::{PERSISTENCE, default_export_path};
pub use plot::PLOT_CONFIG;
pub use providers::{PROVIDERS, SgsConfig, YahooConfig};
