use anyhow::{Context, Result, bail};
use clap::Parser;
use itertools::Itertools;
use std::path::PathBuf;
use tabled::{Table, Tabled, settings::Style};

use indicator_desk::data::{DataProviderAdapter, REGISTRY};
use indicator_desk::engine::{QueryError, QueryRequest, run_query};
use indicator_desk::export::write_spreadsheet;
use indicator_desk::utils::format_date;

/// Runs one query without the GUI and prints what came back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First day of the query, YYYY-MM-DD
    #[arg(long)]
    start: Option<String>,

    /// Last day of the query (inclusive), YYYY-MM-DD
    #[arg(long)]
    end: Option<String>,

    /// Comma separated indicator names, e.g. "CDI,IBOV"
    #[arg(long, value_delimiter = ',')]
    indicators: Vec<String>,

    /// Write the merged table here (.xlsx or .csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the available indicators and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Indicator")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
    #[tabled(rename = "Last value")]
    last_value: String,
}

#[derive(Tabled)]
struct RegistryRow {
    #[tabled(rename = "Indicator")]
    name: &'static str,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        let rows = REGISTRY.iter().map(|i| RegistryRow {
            name: i.name,
            provider: i.source.provider().to_string(),
            source: i.source.to_string(),
        });
        println!("{}", Table::new(rows).with(Style::rounded()));
        return Ok(());
    }

    let (Some(start), Some(end)) = (&args.start, &args.end) else {
        bail!("--start and --end are required unless --list is given");
    };

    let unknown = args
        .indicators
        .iter()
        .filter(|n| !REGISTRY.contains(n))
        .join(", ");
    if !unknown.is_empty() {
        log::warn!("Ignoring unknown indicators: {}", unknown);
    }

    let selected = REGISTRY.in_registry_order(args.indicators.as_slice());
    let request = QueryRequest::from_inputs(start, end, selected)?;
    let adapter = DataProviderAdapter::live().context("Failed to set up data providers")?;

    log::info!(
        "Fetching {} for {}",
        request.indicators().iter().join(", "),
        request.range()
    );

    let session = match run_query(&adapter, &REGISTRY, &request, None).await {
        Ok(session) => session,
        Err(QueryError::NoDataAvailable { failures }) => {
            for f in &failures {
                log::error!("{}", f);
            }
            bail!(QueryError::NoDataAvailable { failures });
        }
        Err(e) => return Err(e.into()),
    };

    let rows = request.indicators().iter().map(|name| {
        let source = REGISTRY
            .get(name)
            .map(|i| i.source.to_string())
            .unwrap_or_default();
        match session.store.get(name) {
            Some(series) => SummaryRow {
                name: name.clone(),
                source,
                rows: series.len().to_string(),
                first: series.first_date().map(format_date).unwrap_or_default(),
                last: series.last_date().map(format_date).unwrap_or_default(),
                last_value: series
                    .observations()
                    .last()
                    .map(|o| format!("{:.2}", o.value))
                    .unwrap_or_default(),
            },
            None => SummaryRow {
                name: name.clone(),
                source,
                rows: "-".to_string(),
                first: String::new(),
                last: String::new(),
                last_value: session
                    .failures
                    .iter()
                    .find(|f| &f.indicator == name)
                    .map(|_| "FAILED".to_string())
                    .unwrap_or_else(|| "no data".to_string()),
            },
        }
    });
    println!("{}", Table::new(rows).with(Style::rounded()));

    if let Some(path) = &args.output {
        let format = write_spreadsheet(&session.store, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} ({})", path.display(), format);
    }
    Ok(())
}
