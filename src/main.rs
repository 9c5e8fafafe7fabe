use std::sync::Arc;

use tracing::info;

use agora::chat::ChatManager;
use agora::store::DataStore;
use agora::web::WebServer;
use agora::Config;

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = agora::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        agora::logging::init_console_only(&config.logging.level);
    }

    info!("{} - {}", config.forum.name, config.forum.description);

    let store = DataStore::new().into_shared();
    let chat = Arc::new(ChatManager::new());

    let server = WebServer::new(&config.web, &config.auth, store, chat);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
