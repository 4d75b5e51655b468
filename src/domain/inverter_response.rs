use serde::Serialize;
use std::collections::HashMap;

/// The normalized result of a single successful fetch.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct InverterResponse {
    readings: HashMap<String, f64>,
    serial_number: String,
    firmware_version: String,
    device_type: String,
}

impl InverterResponse {
    pub fn new(readings: HashMap<String, f64>, serial_number: String, firmware_version: String, device_type: String) -> Self {
        InverterResponse {
            readings,
            serial_number,
            firmware_version,
            device_type,
        }
    }

    pub fn readings(&self) -> &HashMap<String, f64> {
        &self.readings
    }

    pub fn reading(&self, name: &str) -> Option<f64> {
        self.readings.get(name).copied()
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn firmware_version(&self) -> &str {
        &self.firmware_version
    }

    /// The raw type code as reported by the vendor firmware.
    pub fn device_type(&self) -> &str {
        &self.device_type
    }
}
