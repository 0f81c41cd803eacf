//! The water-levels operation: current water-level measurements,
//! without overwritten history.

use crate::client::VandahClient;
use crate::denormalize::Measurements;
use crate::error::VandahError;
use crate::http::query::UrlEncodedQuery;
use crate::http::transport::ResponseBody;
use crate::requests::{self, DataFormat};
use crate::time::format_utc_minutes;
use crate::types::measurement::WaterLevelMeasurement;
use chrono::{DateTime, TimeZone};

/// A single-use request for water-level measurements. Obtained from
/// [`VandahClient::water_levels`]; parameters render on the wire in the
/// order the setters are called.
///
/// The service requires a [station ID](Self::station_id) or an
/// [operator station ID](Self::operator_station_id); a request without
/// either is answered with an HTTP 400.
pub struct WaterLevelsRequest<'a> {
    client: &'a VandahClient,
    query: UrlEncodedQuery,
}

impl<'a> WaterLevelsRequest<'a> {
    pub(crate) fn new(client: &'a VandahClient) -> Self {
        Self {
            client,
            query: UrlEncodedQuery::from_static("water-levels"),
        }
    }

    /// Query by the 8-digit station ID.
    pub fn station_id(mut self, station_id: &str) -> Self {
        self.query.append("stationId", Some(station_id));
        self
    }

    /// Query by station ID as known by the operator of the station.
    pub fn operator_station_id(mut self, operator_station_id: &str) -> Self {
        self.query.append("operatorStationId", Some(operator_station_id));
        self
    }

    /// Query by measurement point. If not given, the service returns
    /// data for all measurement points.
    pub fn measurement_point_number(mut self, measurement_point_number: i32) -> Self {
        self.query.append(
            "measurementPointNumber",
            Some(&measurement_point_number.to_string()),
        );
        self
    }

    /// Query from the given timestamp. The service requires `from` and
    /// `to` together; without them it returns the last 24 hours.
    pub fn from<Tz: TimeZone>(mut self, point_in_time: &DateTime<Tz>) -> Self {
        self.query
            .append("from", Some(&format_utc_minutes(point_in_time)));
        self
    }

    /// Query until the given timestamp. The service requires `from` and
    /// `to` together; without them it returns the last 24 hours.
    pub fn to<Tz: TimeZone>(mut self, point_in_time: &DateTime<Tz>) -> Self {
        self.query
            .append("to", Some(&format_utc_minutes(point_in_time)));
        self
    }

    /// Keep only measurements registered after a point in time.
    pub fn created_after<Tz: TimeZone>(mut self, point_in_time: &DateTime<Tz>) -> Self {
        self.query
            .append("createdAfter", Some(&format_utc_minutes(point_in_time)));
        self
    }

    /// Performs the request and returns the measurements fulfilling all
    /// conditions of the request, stamped with their station's identity.
    ///
    /// # Errors
    ///
    /// [`VandahError::Transport`] for network trouble and non-200
    /// responses, [`VandahError::Decode`] when a non-empty body is not
    /// the expected JSON array.
    pub fn exec(self) -> Result<Measurements<WaterLevelMeasurement>, VandahError> {
        requests::fetch_measurements(self.client, &self.query)
    }

    /// Performs the request with the `format` parameter appended and
    /// returns the body undecoded, for the csv and parquet renditions
    /// of the operation.
    ///
    /// # Errors
    ///
    /// As [`WaterLevelsRequest::exec`], except decoding never happens.
    pub fn exec_raw(self, format: DataFormat) -> Result<ResponseBody, VandahError> {
        requests::fetch_raw(self.client, self.query, format)
    }
}
