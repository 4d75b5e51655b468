use crate::domain::Unit::{Ampere, Celsius, Hertz, KilowattHour, Percentage, Volt, Watt};
use crate::domain::{InverterResponse, Sensor};
use crate::solax::coerce;
use crate::solax::inverter::{InverterError, Schema, decode, validate};
use crate::solax::map_response::map_response;
use serde::{Deserialize, Deserializer};

// Tested with the SK-TL5000E
pub const PATH: &str = "/api/realTimeData.htm";

// Two hardware revisions share the protocol but report a different number of fields
const DATA_LENGTHS: [usize; 2] = [58, 68];

// Layout: https://github.com/GitHobi/solax/wiki/direct-data-retrieval
pub const SENSOR_MAP: [Sensor; 24] = [
    Sensor::new("PV1 Current", 0, Ampere),
    Sensor::new("PV2 Current", 1, Ampere),
    Sensor::new("PV1 Voltage", 2, Volt),
    Sensor::new("PV2 Voltage", 3, Volt),
    Sensor::new("Output Current", 4, Ampere),
    Sensor::new("Network Voltage", 5, Volt),
    Sensor::new("Power Now", 6, Watt),
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
    Sensor::new("Battery Remaining Capacity", 17, Percentage),
    Sensor::new("Month's Energy", 19, KilowattHour),
    Sensor::new("Grid Frequency", 50, Hertz),
    Sensor::new("EPS Voltage", 53, Volt),
    Sensor::new("EPS Current", 54, Ampere),
    Sensor::new("EPS Power", 55, Watt),
    Sensor::new("EPS Frequency", 56, Hertz),
];

#[allow(dead_code)]
#[derive(Debug, Deserialize)]
struct Payload {
    method: String,
    version: String,
    r#type: String,
    #[serde(rename = "SN")]
    serial_number: String,
    #[serde(rename = "Data", deserialize_with = "data")]
    data: Vec<f64>,
    #[serde(rename = "Status", deserialize_with = "coerce::non_negative_int")]
    status: u64,
}

impl Schema for Payload {
    const FIELDS: &'static [&'static str] = &["method", "version", "type", "SN", "Data", "Status"];
}

fn data<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    coerce::floats_with_length(deserializer, &DATA_LENGTHS)
}

pub fn parse(body: &[u8]) -> Result<InverterResponse, InverterError> {
    let text = repair(decode(body)?);
    let payload = validate::<Payload>(&text)?;

    Ok(InverterResponse::new(
        map_response(&payload.data, &SENSOR_MAP),
        payload.serial_number,
        payload.version,
        payload.r#type,
    ))
}

/// The firmware leaves zero values out of the data array (`1,,2`). Two passes are needed since
/// the first pass cannot replace overlapping separators.
fn repair(text: &str) -> String {
    text.replace(",,", ",0.0,").replace(",,", ",0.0,")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solax::inverter::ParseError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn payload_with_data_length(length: usize) -> Vec<u8> {
        json!({
            "method": "uploadsn",
            "version": "Solax_SI_CH_2nd_20160912_DE02",
            "type": "AL_SE",
            "SN": "XB4100000000",
            "Data": vec![1.0; length],
            "Status": 2,
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn parses_a_payload_with_omitted_values() -> Result<(), InverterError> {
        let response = parse(include_bytes!("../../tests/resources/x_hybrid_response.txt"))?;

        assert_eq!(response.serial_number(), "XB4100000000");
        assert_eq!(response.firmware_version(), "Solax_SI_CH_2nd_20160912_DE02");
        assert_eq!(response.device_type(), "AL_SE");
        assert_eq!(response.reading("PV1 Current"), Some(3.4));
        assert_eq!(response.reading("Battery Current"), Some(-1.6));
        assert_eq!(response.reading("Exported Power"), Some(0.0));
        assert_eq!(response.reading("Month's Energy"), Some(72.3));
        assert_eq!(response.reading("Grid Frequency"), Some(50.02));

        Ok(())
    }

    #[test]
    fn readings_contain_exactly_the_mapped_values() -> Result<(), InverterError> {
        let raw = include_str!("../../tests/resources/x_hybrid_68_response.txt");
        let data = serde_json::from_str::<Value>(raw).unwrap()["Data"].as_array().unwrap().clone();

        let response = parse(raw.as_bytes())?;

        assert_eq!(response.readings().len(), SENSOR_MAP.len());
        for sensor in SENSOR_MAP.iter() {
            assert_eq!(response.reading(sensor.name), data[sensor.index].as_f64(), "{}", sensor.name);
        }

        Ok(())
    }

    #[rstest]
    #[case(58)]
    #[case(68)]
    fn accepts_both_hardware_revisions(#[case] length: usize) {
        assert!(parse(&payload_with_data_length(length)).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(57)]
    #[case(59)]
    #[case(69)]
    fn rejects_other_data_lengths(#[case] length: usize) {
        let result = parse(&payload_with_data_length(length));
        assert!(matches!(result, Err(InverterError::Schema(_))), "got {:?}", result);
    }

    #[rstest]
    #[case("method")]
    #[case("version")]
    #[case("type")]
    #[case("SN")]
    #[case("Data")]
    #[case("Status")]
    fn rejects_a_missing_required_field(#[case] field: &str) {
        let mut payload = serde_json::from_slice::<Value>(&payload_with_data_length(58)).unwrap();
        payload.as_object_mut().unwrap().remove(field);

        let result = parse(payload.to_string().as_bytes());
        match result {
            Err(InverterError::Schema(err)) => assert_eq!(err.to_string(), format!("missing field `{}`", field)),
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[rstest]
    #[case::version_before_data(json!({"method": "m", "version": 2, "type": "AL_SE", "SN": "SN", "Data": [], "Status": 0}), "version")]
    #[case::data_before_status(json!({"method": "m", "version": "1", "type": "AL_SE", "SN": "SN", "Data": [1], "Status": -1}), "Data")]
    #[case::status(json!({"method": "m", "version": "1", "type": "AL_SE", "SN": "SN", "Data": vec![1; 58], "Status": -1}), "Status")]
    fn schema_errors_name_the_first_invalid_field(#[case] payload: Value, #[case] field: &str) {
        let result = parse(payload.to_string().as_bytes());

        match result {
            Err(err @ InverterError::Schema(_)) => assert!(
                err.to_string().starts_with(&format!("received malformed JSON from inverter: field `{}`: ", field)),
                "got {}",
                err
            ),
            other => panic!("expected a schema error, got {:?}", other),
        }
    }

    #[rstest]
    #[case::numeric_version("version", json!(2))]
    #[case::negative_status("Status", json!(-1))]
    #[case::non_numeric_status("Status", json!("idle"))]
    #[case::non_numeric_data("Data", Value::from(vec!["a"; 58]))]
    fn rejects_schema_violations(#[case] field: &str, #[case] value: Value) {
        let mut payload = serde_json::from_slice::<Value>(&payload_with_data_length(58)).unwrap();
        payload[field] = value;

        let result = parse(payload.to_string().as_bytes());
        assert!(matches!(result, Err(InverterError::Schema(_))), "got {:?}", result);
    }

    #[test]
    fn ignores_unknown_fields() {
        let mut payload = serde_json::from_slice::<Value>(&payload_with_data_length(58)).unwrap();
        payload["Flag"] = json!("0");

        assert!(parse(payload.to_string().as_bytes()).is_ok());
    }

    #[test]
    fn rejects_a_body_that_is_not_json() {
        let result = parse(b"Not found");
        assert!(matches!(result, Err(InverterError::Parse(ParseError::Json(_)))), "got {:?}", result);
    }

    #[rstest]
    #[case::single("[1,,2]", "[1,0.0,2]")]
    #[case::double("[1,,,2]", "[1,0.0,0.0,2]")]
    #[case::triple("[1,,,,2]", "[1,0.0,0.0,0.0,2]")]
    #[case::separate("[,,1,,2]", "[,0.0,1,0.0,2]")]
    #[case::untouched("[1,2]", "[1,2]")]
    fn repair_inserts_zeros_between_separators(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(repair(raw), expected);
    }
}
