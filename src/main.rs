mod cli;

use cineredux::{
    config,
    critics::RottenTomatoesScraper,
    rating::{normalize_title, CallContext, RatingResolver},
    server,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;

async fn start_server(host: Option<String>, port: Option<u16>, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_runtime_config(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Cineredux gateway");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

async fn score_title(title: &str, config_path: Option<&Path>) -> Result<bool> {
    let config = config::load_runtime_config(config_path)?;
    let resolver = RatingResolver::new(Arc::new(RottenTomatoesScraper::new(&config.critics)));

    let normalized = normalize_title(title);
    match resolver
        .resolve_score(CallContext::internal(), &normalized)
        .await?
    {
        Some(score) => {
            let record = serde_json::json!({
                "movie": normalized,
                "label": score.label,
                "ratingCount": score.rating_count,
                "ratingValue": score.rating_value,
                "reviewCount": score.review_count,
            });
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(true)
        }
        None => {
            println!("No critic score found for {:?}", normalized);
            Ok(false)
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let set = |present: bool| if present { "set" } else { "not set" };

    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!(
                "  Expected API key: {}",
                set(config.auth.expected_key.is_some())
            );
            println!("  TMDB API key: {}", set(!config.tmdb.api_key.is_empty()));
            println!("  TMDB base URL: {}", config.tmdb.base_url);
            println!("  Trending window: {}", config.tmdb.trending_window.as_str());
            println!("  Critic scores enabled: {}", config.critics.enabled);
            println!("  List limit: {}", config.catalog.list_limit);
            println!(
                "  Enrichment concurrency: {}",
                config.catalog.enrichment_concurrency
            );
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cineredux=trace,tower_http=debug".to_string()
        } else {
            "cineredux=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Score { title } => {
            let rt = tokio::runtime::Runtime::new()?;
            let found = rt.block_on(score_title(&title, cli.config.as_deref()))?;
            if !found {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("cineredux {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
