//! Defines the data structures describing gauge stations and their
//! metadata: geographic location, measurement points and the examinations
//! carried out at them.

use crate::time::rfc3339_flex_opt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

// --- Data Structures ---

/// A gauge station and its descriptive metadata.
///
/// This mirrors the station objects of the hydrometry service. Most
/// fields are optional on the wire; stancode fields default to 0 when
/// the service omits them.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Unique station identifier within the service. `None` when the
    /// service sends no value or a malformed one; a malformed value is
    /// noted on the log rather than failing the decode.
    #[serde(default, deserialize_with = "station_uid_or_none")]
    pub station_uid: Option<Uuid>,
    /// The 8-digit station identifier (e.g. "61000181").
    pub station_id: Option<String>,
    /// The operator's own identifier of the station (6 or 8 digits).
    pub operator_station_id: Option<String>,
    /// Identifier of the station in the old hydrometric network.
    pub old_station_number: Option<String>,
    /// Name of the location type (e.g. "Vandløb").
    pub location_type: Option<String>,
    /// Stancode of the location type.
    #[serde(default)]
    pub location_type_sc: i32,
    /// CVR number of the station owner, in DK12345678 form.
    pub station_owner_cvr: Option<String>,
    /// Name of the station owner.
    pub station_owner_name: Option<String>,
    /// CVR number of the station operator, if different from the owner.
    pub operator_cvr: Option<String>,
    /// Name of the station operator.
    pub operator_name: Option<String>,
    /// Station name.
    pub name: Option<String>,
    /// Free-text description of the station.
    pub description: Option<String>,
    /// Identifier of the data logger at the station.
    pub logger_id: Option<String>,
    /// Where the station is.
    pub location: Option<Point>,
    /// The points at which the station measures.
    #[serde(default)]
    pub measurement_points: Vec<MeasurementPoint>,
}

/// A point at a station where measurements are taken.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementPoint {
    /// Number of the measurement point within its station.
    #[serde(default)]
    pub number: i32,
    /// Name of the measurement point.
    pub name: Option<String>,
    /// Name of the measurement-point type.
    pub measurement_point_type: Option<String>,
    /// Stancode of the measurement-point type.
    pub measurement_point_type_sc: Option<i32>,
    /// Free-text description of the measurement point.
    pub description: Option<String>,
    /// Where the measurement point is.
    pub location: Option<Point>,
    /// Groundwater intake number, when the point is an intake.
    pub intake_number: Option<i32>,
    /// The examinations carried out at this point.
    #[serde(default)]
    pub examinations: Vec<Examination>,
}

/// A kind of measurement series available at a measurement point.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Examination {
    /// Name of the measured parameter.
    pub parameter: Option<String>,
    /// Stancode of the measured parameter.
    pub parameter_sc: Option<i32>,
    /// Name of the examination type.
    pub examination_type: Option<String>,
    /// Stancode of the examination type.
    pub examination_type_sc: Option<i32>,
    /// Symbol of the measurement unit.
    pub unit: Option<String>,
    /// Stancode of the measurement unit.
    pub unit_sc: Option<i32>,
    /// When the earliest result of this examination was measured. The
    /// wire name is `firstResult`.
    #[serde(rename = "firstResult", default, with = "rfc3339_flex_opt")]
    pub earliest_result: Option<DateTime<Utc>>,
    /// When the latest result of this examination was measured.
    #[serde(default, with = "rfc3339_flex_opt")]
    pub latest_result: Option<DateTime<Utc>>,
}

/// A geographic point in the coordinate reference system named by its
/// srid. The service uses 25832 (ETRS89 / UTM zone 32N).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Point {
    /// Easting in the coordinate reference system.
    pub x: f64,
    /// Northing in the coordinate reference system.
    pub y: f64,
    /// EPSG identifier of the coordinate reference system. A string on
    /// the wire; a non-numeric value fails the decode.
    #[serde(default, with = "srid_string")]
    pub srid: Option<i32>,
}

// --- Wire Adapters ---

/// The service writes the srid as a JSON string, e.g. `"25832"`.
mod srid_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(srid: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match srid {
            Some(srid) => serializer.serialize_str(&srid.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => text.parse().map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

fn station_uid_or_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.filter(|text| !text.is_empty()).and_then(|text| {
        match text.parse() {
            Ok(uid) => Some(uid),
            Err(e) => {
                log::debug!("Cannot interpret stationUid as a UUID: {text}: {e}");
                None
            }
        }
    }))
}
