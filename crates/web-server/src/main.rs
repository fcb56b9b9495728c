use std::path::Path;

// Entry point for `cargo run -p web-server`. Loads settings, starts logging
// and hands over to `run_server`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config(Path::new("config.toml"))?;
    // The guard flushes the log file on drop; keep it alive for the whole run.
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(config).await
}
