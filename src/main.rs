use bistro_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before anything reads the environment
    dotenv::dotenv().ok();

    init_logger();

    tracing::info!("Bistro Server starting...");

    // Config::from_env fails hard when JWT_SECRET is missing or too short
    let config = Config::from_env()?;

    let state = ServerState::initialize(&config).await?;

    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
