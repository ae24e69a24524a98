mod cli;
mod terminal;

use clap::Parser;
use cli::Cli;
use molecule_dashboard::dashboard::Surfaces;
use molecule_dashboard::error::Result;
use molecule_dashboard::logging::setup_logging;
use molecule_dashboard::{Dashboard, DashboardConfig, DashboardEvent, EventSender, HttpCatalog};
use terminal::{parse_command, TerminalChart, TerminalDetails, TerminalDropdown, TerminalViewer, HELP};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet)?;

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(api) = cli.api {
        config.api.base_url = api;
    }
    debug!("Using config {config:?}");

    let catalog = HttpCatalog::from_config(&config.api)?;
    info!("Catalog API at {}", catalog.base_url());

    let surfaces = Surfaces {
        dropdown: TerminalDropdown::default(),
        viewer: TerminalViewer::new(config.viewer.background.clone()),
        details: TerminalDetails,
        chart: TerminalChart::default(),
    };
    let (mut dashboard, events) = Dashboard::new(catalog, surfaces, &config.chart);
    dashboard.boot().await;

    println!("{HELP}");
    let input = tokio::spawn(read_commands(dashboard.events()));
    dashboard.run(events).await;
    input.abort();
    Ok(())
}

async fn read_commands(events: EventSender) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Some(event) = parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("{HELP}");
            }
            continue;
        };
        let stop = event == DashboardEvent::Shutdown;
        if events.send(event).is_err() || stop {
            return;
        }
    }
    let _ = events.send(DashboardEvent::Shutdown);
}
