//! The stations operation: metadata about gauge stations.

use crate::client::VandahClient;
use crate::decode;
use crate::error::VandahError;
use crate::http::query::UrlEncodedQuery;
use crate::http::transport::ResponseBody;
use crate::requests::{self, DataFormat};
use crate::time::format_utc_minutes;
use crate::types::station::Station;
use chrono::{DateTime, TimeZone};
use std::vec;

/// A single-use request for gauge stations. Obtained from
/// [`VandahClient::stations`]; parameters render on the wire in the
/// order the setters are called.
pub struct StationsRequest<'a> {
    client: &'a VandahClient,
    query: UrlEncodedQuery,
}

impl<'a> StationsRequest<'a> {
    pub(crate) fn new(client: &'a VandahClient) -> Self {
        Self {
            client,
            query: UrlEncodedQuery::from_static("stations"),
        }
    }

    /// Query by the 8-digit station ID.
    pub fn station_id(mut self, station_id: &str) -> Self {
        self.query.append("stationId", Some(station_id));
        self
    }

    /// Query by station ID as known by the operator of the station.
    /// This is normally 6 or 8 digits.
    pub fn operator_station_id(mut self, operator_station_id: &str) -> Self {
        self.query.append("operatorStationId", Some(operator_station_id));
        self
    }

    /// Query by CVR number of the station owner, in DK12345678 format.
    pub fn station_owner_cvr(mut self, station_owner_cvr: &str) -> Self {
        self.query.append("stationOwnerCvr", Some(station_owner_cvr));
        self
    }

    /// Query by CVR number of the station operator, in DK12345678 format.
    pub fn operator_cvr(mut self, operator_cvr: &str) -> Self {
        self.query.append("operatorCvr", Some(operator_cvr));
        self
    }

    /// Query by measured parameter as stancode.
    pub fn parameter_sc(mut self, parameter_sc: i32) -> Self {
        self.query.append("parameterSc", Some(&parameter_sc.to_string()));
        self
    }

    /// Query by examination type as stancode.
    pub fn examination_type_sc(mut self, examination_type_sc: i32) -> Self {
        self.query
            .append("examinationTypeSc", Some(&examination_type_sc.to_string()));
        self
    }

    /// Keep only stations with results measured after a point in time.
    pub fn with_results_after<Tz: TimeZone>(mut self, point_in_time: &DateTime<Tz>) -> Self {
        self.query
            .append("withResultsAfter", Some(&format_utc_minutes(point_in_time)));
        self
    }

    /// Keep only stations with results registered after a point in time.
    pub fn with_results_created_after<Tz: TimeZone>(
        mut self,
        point_in_time: &DateTime<Tz>,
    ) -> Self {
        self.query.append(
            "withResultsCreatedAfter",
            Some(&format_utc_minutes(point_in_time)),
        );
        self
    }

    /// Performs the request and returns the stations fulfilling all
    /// conditions of the request.
    ///
    /// # Errors
    ///
    /// [`VandahError::Transport`] for network trouble and non-200
    /// responses, [`VandahError::Decode`] when a non-empty body is not
    /// the expected JSON array.
    pub fn exec(self) -> Result<vec::IntoIter<Station>, VandahError> {
        let body = self
            .client
            .service()
            .get(self.query.path(), &self.query.query_string())?;
        let stations: Vec<Station> = decode::tolerant_array(Some(body))?;
        Ok(stations.into_iter())
    }

    /// Performs the request with the `format` parameter appended and
    /// returns the body undecoded, for the csv and parquet renditions
    /// of the operation.
    ///
    /// # Errors
    ///
    /// As [`StationsRequest::exec`], except decoding never happens.
    pub fn exec_raw(self, format: DataFormat) -> Result<ResponseBody, VandahError> {
        requests::fetch_raw(self.client, self.query, format)
    }
}
