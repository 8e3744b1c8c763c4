use interaction_relay::http;
use interaction_relay::{Config, ConfigError};

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let config = Config::from_envvar()?;

    let server = http::Server::new(config)?;
    server.start().await;

    Ok(())
}
