use solax_monitor::app_config::AppConfig;
use solax_monitor::domain::InverterResponse;
use solax_monitor::solax::{Inverter, REGISTRY, discover, new_client};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let client = new_client(&config)?;
    let inverter_config = config.inverter();

    let response: InverterResponse = match inverter_config.variant() {
        Some(variant) => {
            info!("📡 Fetching data from {} inverter at {}:{}...", variant, inverter_config.host(), inverter_config.port());
            Inverter::new(client, variant, inverter_config.host(), inverter_config.port()).get_data().await?
        }
        None => discover(&client, &REGISTRY, inverter_config.host(), inverter_config.port()).await?.response,
    };

    info!(
        serial_number = response.serial_number(),
        firmware_version = response.firmware_version(),
        device_type = response.device_type(),
        "✅  Received {} readings",
        response.readings().len()
    );
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
