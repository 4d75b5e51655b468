use crate::domain::Unit::{Ampere, Celsius, Hertz, KilowattHour, Percentage, Volt, Watt};
use crate::domain::{InverterResponse, Sensor};
use crate::solax::coerce;
use crate::solax::inverter::{InverterError, Schema, decode, validate};
use crate::solax::map_response::map_response;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const PATH: &str = "/?optType=ReadRealTimeData";

const DATA_LENGTH: usize = 103;
const INFORMATION_LENGTH: usize = 9;

pub const SENSOR_MAP: [Sensor; 34] = [
    Sensor::new("PV1 Current", 0, Ampere),
    Sensor::new("PV2 Current", 1, Ampere),
    Sensor::new("PV1 Voltage", 2, Volt),
    Sensor::new("PV2 Voltage", 3, Volt),
    Sensor::new("Output Current Phase 1", 4, Ampere),
    Sensor::new("Network Voltage Phase 1", 5, Volt),
    Sensor::new("AC Power", 6, Watt),
    Sensor::new("Inverter Temperature", 7, Celsius),
    Sensor::new("Today's Energy", 8, KilowattHour),
    Sensor::new("Total Energy", 9, KilowattHour),
    Sensor::new("Exported Power", 10, Watt),
    Sensor::new("PV1 Power", 11, Watt),
    Sensor::new("PV2 Power", 12, Watt),
    Sensor::new("Battery Voltage", 13, Volt),
    Sensor::new("Battery Current", 14, Ampere),
    Sensor::new("Battery Power", 15, Watt),
    Sensor::new("Battery Temperature", 16, Celsius),
    // Not the same position as on the XHybrid
    Sensor::new("Battery Remaining Capacity", 21, Percentage),
    Sensor::new("Total Feed-in Energy", 41, KilowattHour),
    Sensor::new("Total Consumption", 42, KilowattHour),
    Sensor::new("Power Now Phase 1", 43, Watt),
    Sensor::new("Power Now Phase 2", 44, Watt),
    Sensor::new("Power Now Phase 3", 45, Watt),
    Sensor::new("Output Current Phase 2", 46, Ampere),
    Sensor::new("Output Current Phase 3", 47, Ampere),
    Sensor::new("Network Voltage Phase 2", 48, Volt),
    Sensor::new("Network Voltage Phase 3", 49, Volt),
    Sensor::new("Grid Frequency Phase 1", 50, Hertz),
    Sensor::new("Grid Frequency Phase 2", 51, Hertz),
    Sensor::new("Grid Frequency Phase 3", 52, Hertz),
    Sensor::new("EPS Voltage", 53, Volt),
    Sensor::new("EPS Current", 54, Ampere),
    Sensor::new("EPS Power", 55, Watt),
    Sensor::new("EPS Frequency", 56, Hertz),
];

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct Payload {
    r#type: String,
    #[serde(rename = "SN")]
    serial_number: String,
    #[serde(rename = "ver")]
    version: String,
    #[serde(rename = "Data", deserialize_with = "data")]
    data: Vec<f64>,
    #[serde(rename = "Information", deserialize_with = "information")]
    information: Vec<Value>,
}

impl Schema for Payload {
    const FIELDS: &'static [&'static str] = &["type", "SN", "ver", "Data", "Information"];
}

fn data<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    coerce::floats_with_length(deserializer, &[DATA_LENGTH])
}

fn information<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    coerce::sequence_with_length(deserializer, &[INFORMATION_LENGTH])
}

pub fn parse(body: &[u8]) -> Result<InverterResponse, InverterError> {
    let payload = validate::<Payload>(decode(body)?)?;

    Ok(InverterResponse::new(
        map_response(&payload.data, &SENSOR_MAP),
        payload.serial_number,
        payload.version,
        payload.r#type,
    ))
}
