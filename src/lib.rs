#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod export;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for fetch_series.rs and integration tests)
pub use app::App;
pub use config::PERSISTENCE;
pub use data::{DataProviderAdapter, REGISTRY};
pub use engine::{QueryError, QueryRequest, QuerySession, run_query};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First day of the query, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of the query (inclusive), YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// Comma separated indicator names, e.g. "CDI,IBOV"
    #[arg(long, value_delimiter = ',')]
    pub indicators: Option<Vec<String>>,
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
