mod client;
mod coerce;
mod discoverer;
mod inverter;
mod map_response;
#[cfg(test)]
mod test_support;
mod variant;
mod x3;
mod x_hybrid;

pub use client::{ClientError, new_client};
pub use discoverer::{Discovery, DiscoveryError, discover};
pub use inverter::{DEFAULT_PORT, Inverter, InverterError, ParseError, SchemaError};
pub use variant::{REGISTRY, Variant};
