//! User preferences: speaking speed and voice

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Speaking speed, limited to the values offered in the speed picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Speed {
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
    TwoAndHalf,
    Triple,
}

impl Speed {
    /// All speeds, slowest first
    pub const ALL: [Speed; 9] = [
        Speed::Half,
        Speed::ThreeQuarters,
        Speed::Normal,
        Speed::OneAndQuarter,
        Speed::OneAndHalf,
        Speed::OneAndThreeQuarters,
        Speed::Double,
        Speed::TwoAndHalf,
        Speed::Triple,
    ];

    /// Rate multiplier, 1.0 is normal
    pub fn multiplier(self) -> f32 {
        match self {
            Speed::Half => 0.5,
            Speed::ThreeQuarters => 0.75,
            Speed::Normal => 1.0,
            Speed::OneAndQuarter => 1.25,
            Speed::OneAndHalf => 1.5,
            Speed::OneAndThreeQuarters => 1.75,
            Speed::Double => 2.0,
            Speed::TwoAndHalf => 2.5,
            Speed::Triple => 3.0,
        }
    }

    /// Exact lookup of a multiplier in the allowed set
    pub fn from_multiplier(value: f64) -> Option<Speed> {
        Speed::ALL
            .into_iter()
            .find(|s| f64::from(s.multiplier()) == value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.multiplier())
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches(['x', 'X']);
        let value: f64 = s
            .parse()
            .map_err(|_| format!("not a number: {:?}", s))?;
        Speed::from_multiplier(value).ok_or_else(|| {
            let allowed: Vec<String> = Speed::ALL.iter().map(|s| s.to_string()).collect();
            format!("speed must be one of {}", allowed.join(", "))
        })
    }
}

impl Serialize for Speed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = f64::from(self.multiplier());
        // Whole speeds are written as integers, e.g. {"speed":1}
        if value.fract() == 0.0 {
            serializer.serialize_u64(value as u64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for Speed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Speed::from_multiplier(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported speed {}", value)))
    }
}

/// Persisted preferences
///
/// Fields decode independently: a missing field, or a speed outside the
/// allowed set, takes its default while the other field is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(deserialize_with = "speed_or_default")]
    pub speed: Speed,

    /// Voice name, empty to use the seeded or engine default
    pub voice: String,
}

fn speed_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Speed, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().and_then(Speed::from_multiplier).unwrap_or_else(|| {
        warn!("Stored speed {} not supported, using {}", value, Speed::default());
        Speed::default()
    }))
}
