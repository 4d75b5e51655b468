use crate::domain::{InverterResponse, Sensor};
use crate::solax::inverter::InverterError;
use crate::solax::{x3, x_hybrid};
use reqwest::Method;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// The protocol families spoken by the supported inverters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    XHybrid,
    X3,
}

/// Variants in the order in which they are probed during discovery.
pub const REGISTRY: [Variant; 2] = [Variant::XHybrid, Variant::X3];

impl Variant {
    pub fn method(&self) -> Method {
        match self {
            Variant::XHybrid => Method::GET,
            Variant::X3 => Method::POST,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Variant::XHybrid => x_hybrid::PATH,
            Variant::X3 => x3::PATH,
        }
    }

    pub fn url(&self, host: &str, port: u16) -> String {
        format!("http://{}:{}{}", host, port, self.path())
    }

    pub fn sensor_map(&self) -> &'static [Sensor] {
        match self {
            Variant::XHybrid => &x_hybrid::SENSOR_MAP,
            Variant::X3 => &x3::SENSOR_MAP,
        }
    }

    /// Converts a raw response body into a validated response.
    pub fn parse(&self, body: &[u8]) -> Result<InverterResponse, InverterError> {
        match self {
            Variant::XHybrid => x_hybrid::parse(body),
            Variant::X3 => x3::parse(body),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::XHybrid => f.write_str("XHybrid"),
            Variant::X3 => f.write_str("X3"),
        }
    }
}
