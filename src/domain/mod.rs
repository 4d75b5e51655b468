mod inverter_response;
mod sensor;

pub use inverter_response::InverterResponse;
pub use sensor::{Sensor, Unit};
