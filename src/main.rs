use std::sync::Arc;

use cisco_phone_directory::{build_app, config::Config, feed::AtomFeedSource, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let source = Arc::new(AtomFeedSource::new(config.contacts_file.clone()));
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(config.directory_port, source);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        directory_port = config.directory_port,
        contacts_file = %config.contacts_file.display(),
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
