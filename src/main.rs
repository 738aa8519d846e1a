use clap::Parser;

use skirmish::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize logger
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = ServerConfig::parse();
    if let Err(e) = skirmish::server::serve(config).await {
        log::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
