use std::path::PathBuf;

use anyhow::Context;

use bionews::config::Config;
use bionews::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides, info by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config_path = flag_value(&args, "--config").map(PathBuf::from);
    let summarize_id = flag_value(&args, "--summarize");

    let config = match &config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let state = AppState::from_config(&config).context("failed to initialise services")?;

    // One-shot summary of a stored post
    if let Some(post_id) = summarize_id {
        let post = state
            .store
            .get_by_id(post_id)
            .with_context(|| format!("post '{}' not found", post_id))?;
        let summary = state
            .summarizer
            .get_summary(&post.id, &post.title, &post.content)
            .await?;
        println!("{}", serde_json::to_string_pretty(summary.as_ref())?);
        return Ok(());
    }

    server::serve(state, &config.server.bind).await?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}
