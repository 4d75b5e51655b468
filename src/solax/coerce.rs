use serde::de::{Error, Expected, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::{Formatter, Result as FmtResult};

// Inverter firmwares are loosely typed: numbers may arrive as strings or booleans.
// The helpers below coerce first and check constraints afterward.

/// Deserializes a non-negative integer, accepting integers, floats (truncated), integer strings and booleans.
pub fn non_negative_int<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let int = to_integer::<D::Error>(&value)?;

    if int < 0 {
        let unexpected = match i64::try_from(int) {
            Ok(int) => Unexpected::Signed(int),
            Err(_) => Unexpected::Other("a negative integer"),
        };
        return Err(Error::invalid_value(unexpected, &"an integer greater than or equal to 0"));
    }

    u64::try_from(int).map_err(|_| Error::invalid_value(Unexpected::Other("an integer larger than u64"), &"a 64-bit integer"))
}

/// Deserializes an array whose elements coerce to `f64` and whose length is one of `lengths`.
pub fn floats_with_length<'de, D>(deserializer: D, lengths: &[usize]) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let floats = Vec::<Value>::deserialize(deserializer)?
        .iter()
        .map(to_float::<D::Error>)
        .collect::<Result<Vec<_>, _>>()?;

    check_length::<D::Error, _>(floats, lengths)
}

/// Deserializes an array of any values whose length is one of `lengths`.
pub fn sequence_with_length<'de, D>(deserializer: D, lengths: &[usize]) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    check_length::<D::Error, _>(values, lengths)
}

fn check_length<E: Error, T>(values: Vec<T>, lengths: &[usize]) -> Result<Vec<T>, E> {
    if lengths.contains(&values.len()) {
        Ok(values)
    } else {
        Err(E::invalid_length(values.len(), &ExactLength(lengths)))
    }
}

fn to_float<E: Error>(value: &Value) -> Result<f64, E> {
    match value {
        Value::Number(number) => number.as_f64().ok_or_else(|| E::custom("number is not representable as a float")),
        Value::String(string) => string
            .trim()
            .parse::<f64>()
            .map_err(|_| E::invalid_value(Unexpected::Str(string), &"a float")),
        Value::Bool(boolean) => Ok(if *boolean { 1.0 } else { 0.0 }),
        other => Err(E::invalid_type(unexpected(other), &"a float")),
    }
}

fn to_integer<E: Error>(value: &Value) -> Result<i128, E> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(int as i128)
            } else if let Some(int) = number.as_u64() {
                Ok(int as i128)
            } else {
                match number.as_f64() {
                    Some(float) if float.is_finite() => Ok(float.trunc() as i128),
                    _ => Err(E::invalid_value(Unexpected::Other("a non-finite number"), &"an integer")),
                }
            }
        }
        Value::String(string) => string
            .trim()
            .parse::<i128>()
            .map_err(|_| E::invalid_value(Unexpected::Str(string), &"an integer")),
        Value::Bool(boolean) => Ok(*boolean as i128),
        other => Err(E::invalid_type(unexpected(other), &"an integer")),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(boolean) => Unexpected::Bool(*boolean),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(string) => Unexpected::Str(string),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

struct ExactLength<'a>(&'a [usize]);

impl Expected for ExactLength<'_> {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        let lengths = self.0.iter().map(|length| length.to_string()).collect::<Vec<_>>();
        write!(formatter, "an array of exactly {} elements", lengths.join(" or "))
    }
}
