//! The water-flows operation: current water-flow measurements, without
//! overwritten history.

use crate::client::VandahClient;
use crate::denormalize::Measurements;
use crate::error::VandahError;
use crate::http::query::UrlEncodedQuery;
use crate::http::transport::ResponseBody;
use crate::requests::{self, DataFormat};
use crate::time::format_utc_minutes;
use crate::types::measurement::Measurement;
use chrono::{DateTime, TimeZone};

/// A single-use request for water-flow measurements. Obtained from
/// [`VandahClient::water_flows`]; parameters render on the wire in the
/// order the setters are called.
///
/// The service requires a [station ID](Self::station_id) or an
/// [operator station ID](Self::operator_station_id); a request without
/// either is answered with an HTTP 400.
pub struct WaterFlowsRequest<'a> {
    client: &'a VandahClient,
    query: UrlEncodedQuery,
}

impl<'a> WaterFlowsRequest<'a> {
    pub(crate) fn new(client: &'a VandahClient) -> Self {
        Self {
            client,
            query: UrlEncodedQuery::from_static("water-flows"),
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
    pub fn exec(self) -> Result<Measurements<Measurement>, VandahError> {
        requests::fetch_measurements(self.client, &self.query)
    }

    /// Performs the request with the `format` parameter appended and
    /// returns the body undecoded, for the csv and parquet renditions
    /// of the operation.
    ///
    /// # Errors
    ///
    /// As [`WaterFlowsRequest::exec`], except decoding never happens.
    pub fn exec_raw(self, format: DataFormat) -> Result<ResponseBody, VandahError> {
        requests::fetch_raw(self.client, self.query, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticSink;
    use crate::testing::{MemorySink, RecordingService};
    use chrono::Utc;
    use std::sync::Arc;

    fn client_over(service: RecordingService) -> VandahClient {
        VandahClient::from_service(
            Arc::new(service),
            Arc::new(MemorySink::default()) as Arc<dyn DiagnosticSink>,
        )
    }

    #[test]
    fn parameters_render_in_call_order() {
        let service = RecordingService::returning("[]");
        let client = client_over(service.clone());
        let created_after = Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap();
        client
            .water_flows()
            .operator_station_id("610181")
            .created_after(&created_after)
            .exec()
            .unwrap();

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen[0].path, "water-flows");
        assert_eq!(
            seen[0].query,
            "operatorStationId=610181&createdAfter=2023-10-01T00%3A00Z"
        );
    }

    #[test]
    fn exec_denormalizes_the_envelopes() {
        let body = r#"[{"stationId": "61000181", "operatorStationId": "610181", "results": [{
            "measurementPointNumber": 1,
            "parameterSc": 1155,
            "parameter": "Vandføring",
            "examinationTypeSc": 27,
            "examinationType": "Vandføring",
            "measurementDateTime": "2023-10-02T18:10Z",
            "result": 14.5,
            "unitSc": 55,
            "unit": "l/s"
        }]}]"#;
        let client = client_over(RecordingService::returning(body));
        let flows: Vec<_> = client
            .water_flows()
            .station_id("61000181")
            .exec()
            .unwrap()
            .collect();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].station_id.as_deref(), Some("61000181"));
        assert_eq!(flows[0].operator_station_id.as_deref(), Some("610181"));
        assert_eq!(flows[0].parameter_sc, 1155);
        assert_eq!(flows[0].result, 14.5);
        assert_eq!(flows[0].unit.as_deref(), Some("l/s"));
    }

    #[test]
    fn exec_raw_appends_format() {
        let service = RecordingService::returning("");
        let client = client_over(service.clone());
        client
            .water_flows()
            .station_id("61000181")
            .exec_raw(DataFormat::Parquet)
            .unwrap();

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen[0].query, "stationId=61000181&format=parquet");
        assert!(seen[0].raw);
    }
}
