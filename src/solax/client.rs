use crate::app_config::AppConfig;
use reqwest::Client;
use thiserror::Error;

/// Builds the HTTP client used to talk to inverters. Connections are not kept alive, so every
/// request opens and closes its own connection.
pub fn new_client(config: &AppConfig) -> Result<Client, ClientError> {
    let client = Client::builder()
        .timeout(config.inverter().timeout())
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
}
