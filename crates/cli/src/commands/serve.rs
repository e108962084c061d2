//! `trellis serve`: start the HTTP chat proxy.

use trellis_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
        config.validate()?;
    }

    println!("🌿 Trellis Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Upstream:  {}", config.api_url);
    println!(
        "   API key:   {}",
        if config.has_api_key() { "configured" } else { "missing" }
    );

    trellis_gateway::start(config).await?;

    Ok(())
}
