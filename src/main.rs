//! Entry point: parse CLI and dispatch to the pipeline.

use anyhow::Context;
use clap::Parser;
use pl_standings::{
    cli::{Commands, PlStandings},
    commands::Pipeline,
    router::Router,
    server, Config,
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let app = PlStandings::parse();
    let config = Config::from_env().context("loading configuration")?;
    let pipeline = Pipeline::new(config).context("building pipeline")?;

    match app.command {
        Commands::Fetch => {
            let outcome = pipeline.fetch_and_persist().await?;
            if outcome.saved {
                println!("CSV file saved to {}", pipeline.store().location());
            } else {
                println!("No new records; {} unchanged", pipeline.store().location());
            }
        }

        Commands::Summarize => {
            let report = pipeline.summarize().await?;
            for (kpi, location) in &report.rendered {
                println!("{kpi}: {location}");
            }
            for (kpi, reason) in &report.failed {
                eprintln!("{kpi}: failed ({reason})");
            }
        }

        ref cmd @ Commands::Query { .. } => {
            let query = cmd.kpi_query().context("query arguments")?;
            let rows = pipeline.query_kpi(&query).await?;
            println!("{}", serde_json::to_string_pretty(&json!({ "Result": rows }))?);
        }

        Commands::Serve { addr } => {
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            server::serve(listener, Router::new(pipeline)).await?;
        }
    }

    Ok(())
}
