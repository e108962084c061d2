//! `trellis status`: show the effective configuration.

use trellis_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🌿 Trellis Status");
    println!("=================");
    println!("  Config dir:        {}", AppConfig::config_dir().display());
    println!("  Upstream:          {}", config.api_url);
    println!(
        "  API key:           {}",
        if config.has_api_key() { "[REDACTED]" } else { "not set" }
    );
    println!("  Graph Lab model:   {}", config.routes.graph_lab.model);
    println!("  General model:     {}", config.routes.general.model);
    println!(
        "  Timeouts:          {}s total, {}s connect",
        config.upstream.timeout_secs, config.upstream.connect_timeout_secs
    );
    println!("  Gateway:           {}:{}", config.gateway.host, config.gateway.port);
    println!("  CORS origins:      {}", config.gateway.allowed_origins.join(", "));

    if AppConfig::config_path().exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file, run `trellis onboard` first");
    }

    if !config.has_api_key() {
        println!("  ⚠️  /api/chat will fail until an API key is set");
    }

    Ok(())
}
