//! Measurement records returned by the water-level and water-flow
//! operations, and the stamping that attaches station identity to them.

use crate::denormalize::StationBound;
use crate::time::rfc3339_flex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Data Structures ---

/// A single measurement, as returned by the water-flows operation.
///
/// The station identifiers are not part of the nested wire record; they
/// are stamped on from the enclosing envelope when a response is
/// denormalized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// The 8-digit identifier of the station that measured.
    pub station_id: Option<String>,
    /// The operator's own identifier of the station (6 or 8 digits).
    pub operator_station_id: Option<String>,
    /// Number of the measurement point within the station.
    #[serde(default)]
    pub measurement_point_number: i32,
    /// Stancode of the measured parameter (e.g. 1233 for water level).
    #[serde(default)]
    pub parameter_sc: i32,
    /// Name of the measured parameter.
    pub parameter: Option<String>,
    /// Stancode of the examination type.
    #[serde(default)]
    pub examination_type_sc: i32,
    /// Name of the examination type.
    pub examination_type: Option<String>,
    /// When the measurement was taken. Minute precision on the wire.
    #[serde(with = "rfc3339_flex")]
    pub measurement_date_time: DateTime<Utc>,
    /// The measured value.
    #[serde(default)]
    pub result: f64,
    /// Stancode of the measurement unit (e.g. 19 for centimetres).
    #[serde(default)]
    pub unit_sc: i32,
    /// Symbol of the measurement unit.
    pub unit: Option<String>,
}

/// A water-level measurement: a [`Measurement`] plus the optional
/// elevation-corrected result.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaterLevelMeasurement {
    #[serde(flatten)]
    pub measurement: Measurement,
    /// The result reduced to the station's elevation zero, in the same
    /// unit as `result`. Absent when no correction applies.
    pub result_elevation_corrected: Option<f64>,
}

// --- Envelope Stamping ---

impl StationBound for Measurement {
    fn bind_station(&mut self, station_id: Option<&str>, operator_station_id: Option<&str>) {
        self.station_id = station_id.map(str::to_owned);
        self.operator_station_id = operator_station_id.map(str::to_owned);
    }
}

impl StationBound for WaterLevelMeasurement {
    fn bind_station(&mut self, station_id: Option<&str>, operator_station_id: Option<&str>) {
        self.measurement.bind_station(station_id, operator_station_id);
    }
}
