use vibe_relay::{init_tracing, run_server, AppState, RelayConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Environment is read once here; handlers only see the resolved config.
    let config = RelayConfig::from_env()?;
    let addr = config.bind_addr;
    tracing::info!(
        upstream = %config.completions_url(),
        model = %config.model,
        idle_timeout_secs = config.idle_timeout.as_secs(),
        "starting relay"
    );

    let state = AppState::new(config)?;
    run_server(state, addr).await?;
    Ok(())
}
