use crate::domain::InverterResponse;
use crate::solax::inverter::Inverter;
use crate::solax::variant::Variant;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// The first variant that answered with a valid payload.
#[derive(Debug)]
pub struct Discovery {
    pub inverter: Inverter,
    pub response: InverterResponse,
}

/// Probes the variants of `registry` one at a time, in order, until one of them returns valid data.
#[instrument(skip(client, registry))]
pub async fn discover(client: &Client, registry: &[Variant], host: &str, port: u16) -> Result<Discovery, DiscoveryError> {
    info!("🔍 Discovering inverter at {}:{}...", host, port);

    for &variant in registry {
        let inverter = Inverter::new(client.clone(), variant, host, port);
        match inverter.get_data().await {
            Ok(response) => {
                info!(
                    serial_number = response.serial_number(),
                    "🔍 Discovering inverter at {}:{}... OK, found {}", host, port, variant
                );
                return Ok(Discovery { inverter, response });
            }
            Err(err) => debug!("🔍 Variant {} does not match: {}", variant, err),
        }
    }

    warn!("🔍 Discovering inverter at {}:{}... failed, no variant matched", host, port);
    Err(DiscoveryError::NoMatchingDevice {
        host: host.to_string(),
        port,
    })
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("no known inverter responds at {host}:{port}")]
    NoMatchingDevice { host: String, port: u16 },
}
