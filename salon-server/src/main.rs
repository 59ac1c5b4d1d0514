use salon_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_environment()?;

    print_banner();
    tracing::info!("Salon server starting...");

    let config = Config::from_env();
    let state = ServerState::initialize(&config).await;

    if let Err(e) = Server::run(state).await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
