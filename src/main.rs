//! wisdom-catalog - render the wisdom traditions catalog from the command line

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wisdom_catalog::{
    config::{Args, OutputFormat},
    CatalogClient, KnowledgeBaseSession, SearchOutcome, Status,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wisdom_catalog={},warn", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.catalog_config()?;
    info!(base_url = %config.base_url, tab = %args.tab, "starting");

    let client = CatalogClient::new(config)?;
    let session = KnowledgeBaseSession::new(Arc::new(client));

    let status = session.activate().await;

    if status == Status::Ready {
        if let Some(query) = &args.search {
            session.set_query(query.as_str()).await;
            match session.submit_search().await {
                SearchOutcome::Applied => info!(query = %query, "search applied"),
                SearchOutcome::Ignored => warn!("blank search query ignored"),
                outcome => warn!(?outcome, "search not applied"),
            }
        }
    }

    session.select_tab(args.tab).await;

    let rendered = match args.format {
        OutputFormat::Text => session.render_text().await,
        OutputFormat::Html => session.render_html().await,
    };
    print!("{}", rendered);

    session.dispose();

    if status != Status::Ready {
        error!(?status, "catalog could not be loaded");
        std::process::exit(1);
    }
    Ok(())
}
