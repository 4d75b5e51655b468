use crate::domain::Sensor;
use std::collections::HashMap;

/// Maps the positional data array onto the sensor names of `sensor_map`.
///
/// Panics if a sensor index lies outside `data`. Every variant validates the array length before
/// mapping, so this only happens when a sensor map and its schema disagree.
pub fn map_response(data: &[f64], sensor_map: &[Sensor]) -> HashMap<String, f64> {
    sensor_map
        .iter()
        .map(|sensor| (sensor.name.to_string(), data[sensor.index]))
        .collect()
}
