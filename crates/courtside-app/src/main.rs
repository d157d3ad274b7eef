mod cli;
mod repl;
mod views;

use tracing_subscriber::EnvFilter;

use courtside_agent::{ChatSession, RuntimeClient, RuntimeConfig};

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let candidates = [
        // Workspace root — two levels up from crates/courtside-app/
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(".env"),
        // Current directory
        std::path::PathBuf::from(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before reading any configuration
    load_dotenv();

    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("courtside=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "courtside=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Courtside v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match RuntimeConfig::from_env(&args.agent_id, &args.agent_alias_id) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let config = match &args.endpoint {
        Some(endpoint) => config.with_endpoint(endpoint),
        None => config,
    };
    let config = config.with_trace(!args.no_trace);
    tracing::info!("Runtime configured: {config:?}");

    let client = RuntimeClient::new(config);
    let session = ChatSession::new(args.pricing());

    if let Err(e) = repl::run(session, &client).await {
        tracing::error!("Chat loop error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
