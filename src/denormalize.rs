//! Turns the envelope-per-station responses of the measurement operations
//! into one flat sequence of measurements stamped with station identity.

use crate::diagnostics::DiagnosticSink;
use serde::Deserialize;
use std::vec;

/// One envelope of a water-levels or water-flows response: the identity
/// of a matched station plus its nested results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StationResults<M> {
    pub station_id: Option<String>,
    pub operator_station_id: Option<String>,
    pub results: Option<Vec<M>>,
}

/// Gives a measurement its station identity from the enclosing envelope.
pub trait StationBound {
    /// Overwrites the station identifiers with the envelope's.
    fn bind_station(&mut self, station_id: Option<&str>, operator_station_id: Option<&str>);
}

/// Flattens envelopes into a single measurement sequence.
///
/// More than one envelope means the query matched several stations even
/// though these queries are expected to resolve to exactly one. That
/// draws a debug diagnostic listing every envelope's identity, and all
/// of them are still included in the output, in response order.
pub(crate) fn denormalize<M: StationBound>(
    envelopes: Vec<StationResults<M>>,
    request: &str,
    diagnostics: &dyn DiagnosticSink,
) -> Measurements<M> {
    if envelopes.len() > 1 {
        let ids = envelopes
            .iter()
            .map(|envelope| {
                format!(
                    "({}, {})",
                    envelope.station_id.as_deref().unwrap_or("-"),
                    envelope.operator_station_id.as_deref().unwrap_or("-")
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        diagnostics.debug(&format!(
            "Multiple stations in response from {request}: {ids}"
        ));
    }
    Measurements {
        envelopes: envelopes.into_iter(),
        current: None,
    }
}

/// A single-pass sequence of measurements produced by one request.
///
/// Envelopes are consumed lazily; each measurement is stamped with its
/// envelope's station identity as it is yielded. A null or absent nested
/// results list contributes nothing.
#[derive(Debug)]
pub struct Measurements<M> {
    envelopes: vec::IntoIter<StationResults<M>>,
    current: Option<CurrentEnvelope<M>>,
}

#[derive(Debug)]
struct CurrentEnvelope<M> {
    station_id: Option<String>,
    operator_station_id: Option<String>,
    results: vec::IntoIter<M>,
}

impl<M: StationBound> Iterator for Measurements<M> {
    type Item = M;

    fn next(&mut self) -> Option<M> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some(mut measurement) = current.results.next() {
                    measurement.bind_station(
                        current.station_id.as_deref(),
                        current.operator_station_id.as_deref(),
                    );
                    return Some(measurement);
                }
                self.current = None;
            }
            let envelope = self.envelopes.next()?;
            self.current = Some(CurrentEnvelope {
                station_id: envelope.station_id,
                operator_station_id: envelope.operator_station_id,
                results: envelope.results.unwrap_or_default().into_iter(),
            });
        }
    }
}
