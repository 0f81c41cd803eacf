mod client;
mod decode;
mod denormalize;
mod diagnostics;
mod error;
mod http;
mod requests;
#[cfg(test)]
mod testing;
mod time;
mod types;

pub use client::{VandahClient, DEMO_API_BASE, PRODUCTION_API_BASE, TEST_API_BASE};
pub use error::VandahError;

pub use requests::stations::StationsRequest;
pub use requests::water_flows::WaterFlowsRequest;
pub use requests::water_levels::WaterLevelsRequest;
pub use requests::DataFormat;

pub use types::measurement::{Measurement, WaterLevelMeasurement};
pub use types::station::{Examination, MeasurementPoint, Point, Station};

pub use decode::DecodeError;
pub use denormalize::{Measurements, StationBound};
pub use diagnostics::{DiagnosticSink, LogSink};
pub use http::content_type::ContentType;
pub use http::query::{QueryError, UrlEncodedQuery};
pub use http::transport::{
    HttpStatusError, HttpStreamClient, ResponseBody, StreamService, TransportError,
};
pub use time::format_utc_minutes;
