mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "kopilka={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let secret = std::env::var("SECRET_KEY")
        .ok()
        .or_else(|| settings.server.secret_key.clone())
        .unwrap_or_else(|| settings::DEV_SECRET_KEY.to_string());
    if secret == settings::DEV_SECRET_KEY {
        tracing::warn!("using the development secret key; set SECRET_KEY before deploying");
    }

    let engine = engine::Engine::new(&settings.server.data_file);
    engine.bootstrap()?;

    let bind = settings.server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, server::signing_key(&secret), listener).await?;

    Ok(())
}
