//! The request operations of the hydrometry service. Each operation is a
//! consuming builder obtained from the client; setters append query
//! parameters in call order, and `exec` runs the request.

pub mod stations;
pub mod water_flows;
pub mod water_levels;

use crate::client::VandahClient;
use crate::decode;
use crate::denormalize::{self, Measurements, StationBound, StationResults};
use crate::error::VandahError;
use crate::http::query::UrlEncodedQuery;
use crate::http::transport::ResponseBody;
use serde::de::DeserializeOwned;

/// Alternative response encodings offered by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Semicolon-separated values.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl DataFormat {
    /// The value sent in the `format` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Parquet => "parquet",
        }
    }
}

/// The pipeline shared by the measurement operations: transport, tolerant
/// decode, then denormalization of the per-station envelopes.
pub(crate) fn fetch_measurements<M>(
    client: &VandahClient,
    query: &UrlEncodedQuery,
) -> Result<Measurements<M>, VandahError>
where
    M: DeserializeOwned + StationBound,
{
    let body = client.service().get(query.path(), &query.query_string())?;
    let envelopes: Vec<StationResults<M>> = decode::tolerant_array(Some(body))?;
    Ok(denormalize::denormalize(
        envelopes,
        &query.to_string(),
        client.diagnostics(),
    ))
}

/// Appends the `format` parameter and fetches the body undecoded.
pub(crate) fn fetch_raw(
    client: &VandahClient,
    mut query: UrlEncodedQuery,
    format: DataFormat,
) -> Result<ResponseBody, VandahError> {
    query.append("format", Some(format.as_str()));
    Ok(client
        .service()
        .get_raw(query.path(), &query.query_string())?)
}
