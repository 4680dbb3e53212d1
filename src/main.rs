use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rustfinder_api::{config, create_factory, router, Args, Orchestrator};
use std::sync::Arc;

const BANNER: &str = r#"    ____             __  ______ _           __
   / __ \__  _______/ /_/ ____/(_)___  ____/ /__  _____
  / /_/ / / / / ___/ __/ /_  / / __ \/ __  / _ \/ ___/
 / _, _/ /_/ (__  ) /_/ __/ / / / / / /_/ /  __/ /
/_/ |_|\__,_/____/\__/_/   /_/_/_/ /_\__,_/\___/_/

        Subdomain Enumeration over HTTP
"#;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    println!("{}", BANNER);

    let mut config = config::load_config(args.config_path.as_deref())
        .context("Failed to load configuration")?;
    args.apply(&mut config);
    config::validate_config(&config).context("Invalid configuration")?;

    info!(
        "Using {:?} engine (batch concurrency {})",
        config.engine.kind, config.engine.batch_concurrency
    );

    let orchestrator = Orchestrator::new(create_factory(&config.engine), config.defaults.clone())
        .with_batch_concurrency(config.engine.batch_concurrency);
    let app = router(Arc::new(orchestrator));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("RustFinder API server starting on {}", addr);
    info!("Visit http://localhost:{} for API documentation", config.server.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
