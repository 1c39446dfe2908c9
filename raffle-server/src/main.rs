use raffle_server::{Config, Server, ServerState, print_banner, setup_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env and configuration
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;

    // 2. Logging
    setup_logging(&config)?;
    print_banner();

    tracing::info!(
        environment = %config.environment,
        timezone = %config.timezone,
        draw_hour = config.draw_hour,
        "Raffle server starting..."
    );

    // 3. Database, migrations, today's raffle
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
