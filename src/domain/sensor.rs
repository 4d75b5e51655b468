use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum Unit {
    #[serde(rename = "A")]
    Ampere,
    #[serde(rename = "V")]
    Volt,
    #[serde(rename = "W")]
    Watt,
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "kWh")]
    KilowattHour,
    #[serde(rename = "%")]
    Percentage,
    #[serde(rename = "Hz")]
    Hertz,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Ampere => "A",
            Unit::Volt => "V",
            Unit::Watt => "W",
            Unit::Celsius => "C",
            Unit::KilowattHour => "kWh",
            Unit::Percentage => "%",
            Unit::Hertz => "Hz",
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A named reading at a fixed position in the data array reported by the inverter.
#[derive(Clone, Copy, PartialEq, Debug, Serialize)]
pub struct Sensor {
    pub name: &'static str,
    pub index: usize,
    pub unit: Option<Unit>,
}

impl Sensor {
    pub const fn new(name: &'static str, index: usize, unit: Unit) -> Self {
        Sensor { name, index, unit: Some(unit) }
    }
}
