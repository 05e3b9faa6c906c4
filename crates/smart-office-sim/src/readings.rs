//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Sensor reading records produced by the generator."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Rendering used for timestamps in every output format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sensor channels tracked in every room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum SensorChannel {
    Occupancy,
    Luminosity,
    Temperature,
    Humidity,
}

impl SensorChannel {
    /// Short prefix used to build sensor identifiers such as `temp_2`.
    pub fn prefix(&self) -> &'static str {
        match self {
            SensorChannel::Occupancy => "occ",
            SensorChannel::Luminosity => "lux",
            SensorChannel::Temperature => "temp",
            SensorChannel::Humidity => "hum",
        }
    }

    pub fn sensor_id(&self, room: u32) -> String {
        format!("{}_{}", self.prefix(), room)
    }

    /// Decimal places kept when values are recorded.
    pub fn decimals(&self) -> i32 {
        match self {
            SensorChannel::Occupancy => 0,
            SensorChannel::Luminosity | SensorChannel::Humidity => 1,
            SensorChannel::Temperature => 2,
        }
    }
}

/// One timestamped set of channel values for a single room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    pub room: u32,
    pub occupancy: u8,
    pub luminosity_lux: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

impl SensorReading {
    pub fn value(&self, channel: SensorChannel) -> f64 {
        match channel {
            SensorChannel::Occupancy => f64::from(self.occupancy),
            SensorChannel::Luminosity => self.luminosity_lux,
            SensorChannel::Temperature => self.temperature_c,
            SensorChannel::Humidity => self.humidity_pct,
        }
    }

    /// Split the reading into one long-layout record per channel.
    pub fn records(&self) -> impl Iterator<Item = SensorRecord> + '_ {
        SensorChannel::iter().map(move |channel| SensorRecord {
            timestamp: self.timestamp,
            sensor_id: channel.sensor_id(self.room),
            value: self.value(channel),
        })
    }
}

/// Long-layout row: a single channel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: NaiveDateTime,
    pub sensor_id: String,
    pub value: f64,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading() -> SensorReading {
        SensorReading {
            timestamp: NaiveDate::from_ymd_opt(2025, 3, 3)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap(),
            room: 2,
            occupancy: 1,
            luminosity_lux: 512.3,
            temperature_c: 23.41,
            humidity_pct: 55.0,
        }
    }

    #[test]
    fn sensor_ids_follow_prefix_and_room() {
        assert_eq!(SensorChannel::Temperature.sensor_id(2), "temp_2");
        assert_eq!(SensorChannel::Occupancy.sensor_id(10), "occ_10");
        assert_eq!(SensorChannel::Humidity.to_string(), "humidity");
    }

    #[test]
    fn records_cover_every_channel() {
        let reading = reading();
        let records: Vec<_> = reading.records().collect();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].sensor_id, "occ_2");
        assert_eq!(records[0].value, 1.0);
        assert_eq!(records[2].sensor_id, "temp_2");
        assert_eq!(records[2].value, 23.41);
        assert!(records.iter().all(|r| r.timestamp == reading.timestamp));
    }

    #[test]
    fn timestamps_serialize_without_t_separator() {
        let json = serde_json::to_value(reading()).unwrap();
        assert_eq!(json["timestamp"], "2025-03-03 09:15:00");
        let back: SensorReading = serde_json::from_value(json).unwrap();
        assert_eq!(back, reading());
    }

    #[test]
    fn rounding_keeps_requested_decimals() {
        assert_eq!(round_to(22.456, 2), 22.46);
        assert_eq!(round_to(499.94, 1), 499.9);
        assert_eq!(round_to(0.6, 0), 1.0);
    }
}
