//! Shared test doubles and fixtures: an in-memory [`StreamService`], a
//! capturing [`DiagnosticSink`], a one-shot HTTP server and wire-format
//! samples as the service sends them.

use crate::diagnostics::DiagnosticSink;
use crate::http::transport::{HttpStatusError, ResponseBody, StreamService, TransportError};
use encoding_rs::UTF_8;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::io::Cursor;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use url::Url;

/// Sink that collects messages instead of logging them.
#[derive(Default)]
pub struct MemorySink {
    pub debug: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl DiagnosticSink for MemorySink {
    fn debug(&self, message: &str) {
        self.debug.lock().unwrap().push(message.to_owned());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_owned());
    }
}

/// One GET observed by a [`RecordingService`].
pub struct Call {
    pub path: String,
    pub query: String,
    pub raw: bool,
}

/// Scripted [`StreamService`] that records every call. Clones share the
/// same call log, so tests keep one handle and give the other away.
#[derive(Clone)]
pub struct RecordingService {
    status: StatusCode,
    body: Arc<str>,
    pub seen: Arc<Mutex<Vec<Call>>>,
}

impl RecordingService {
    /// Responds 200 with the given body as `application/json` in UTF-8.
    pub fn returning(body: &str) -> Self {
        Self::scripted(StatusCode::OK, body)
    }

    /// Fails every call with the given status and body snapshot.
    pub fn failing(status: StatusCode, body: &str) -> Self {
        Self::scripted(status, body)
    }

    fn scripted(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: Arc::from(body),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(&self, path: &str, query: &str, raw: bool) -> Result<ResponseBody, TransportError> {
        self.seen.lock().unwrap().push(Call {
            path: path.to_owned(),
            query: query.to_owned(),
            raw,
        });
        if self.status != StatusCode::OK {
            let mut target = format!("http://localhost/api/{path}");
            if !query.is_empty() {
                target.push('?');
                target.push_str(query);
            }
            let url = Url::parse(&target).unwrap();
            return Err(
                HttpStatusError::new(self.status, url, HeaderMap::new(), self.body.to_string())
                    .into(),
            );
        }
        Ok(ResponseBody::new(
            Cursor::new(self.body.as_bytes().to_vec()),
            UTF_8,
            Some("application/json".to_owned()),
        ))
    }
}

impl StreamService for RecordingService {
    fn get(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError> {
        self.respond(path, query, false)
    }

    fn get_raw(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError> {
        self.respond(path, query, true)
    }
}

/// What the one-shot server saw in the request.
pub struct SeenRequest {
    pub url: String,
    pub accept: Option<String>,
}

/// Handle to a [`serve_once`] server.
pub struct TestServer {
    pub base: Url,
    pub seen: mpsc::Receiver<SeenRequest>,
}

/// Spawns a local HTTP server that answers exactly one request with the
/// given status, optional `Content-Type` and body, then shuts down. The
/// returned base URL ends in `/api/`.
pub fn serve_once(status: u16, content_type: Option<&str>, body: &str) -> TestServer {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let base = Url::parse(&format!("http://127.0.0.1:{port}/api/")).unwrap();
    let (sender, seen) = mpsc::channel();
    let content_type = content_type.map(str::to_owned);
    let body = body.to_owned();
    thread::spawn(move || {
        let Ok(request) = server.recv() else { return };
        let accept = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Accept"))
            .map(|h| h.value.as_str().to_owned());
        let _ = sender.send(SeenRequest {
            url: request.url().to_owned(),
            accept,
        });
        let mut response = tiny_http::Response::from_data(body.into_bytes())
            .with_status_code(tiny_http::StatusCode::from(status));
        if let Some(content_type) = content_type {
            response.add_header(
                tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
                    .unwrap(),
            );
        }
        let _ = request.respond(response);
    });
    TestServer { base, seen }
}

/// One station as the service sends it: the example station of the
/// service documentation, with one measurement point carrying three
/// examinations. The stations operation wraps this in a JSON array.
pub const STATION_61000181: &str = r#"{
    "stationUid": "2e76caf9-d772-4c07-a6f1-0b7b4cf4d187",
    "stationId": "61000181",
    "operatorStationId": null,
    "oldStationNumber": "61000399",
    "locationType": "Vandløb",
    "locationTypeSc": 1,
    "stationOwnerCvr": "DK25798376",
    "stationOwnerName": "Miljøstyrelsen",
    "operatorCvr": null,
    "operatorName": null,
    "name": "Tt Vålse Vig, Vålse Vig",
    "description": "Opland = 27,01 km2",
    "loggerId": "41662",
    "location": {
        "x": 679796.2734,
        "y": 6091352.6536,
        "srid": "25832"
    },
    "measurementPoints": [{
        "number": 1,
        "name": "Sted 1",
        "measurementPointType": "Vandløb",
        "measurementPointTypeSc": 1,
        "description": null,
        "location": {
            "x": 679796.2734,
            "y": 6091352.6536,
            "srid": "25832"
        },
        "intakeNumber": null,
        "examinations": [{
            "parameter": "Vandstand",
            "parameterSc": 1233,
            "examinationType": "Vandstand",
            "examinationTypeSc": 25,
            "unit": "cm",
            "unitSc": 19,
            "firstResult": "2001-01-28T11:00Z",
            "latestResult": "2024-03-05T09:15Z"
        }, {
            "parameter": "Vandføring",
            "parameterSc": 1155,
            "examinationType": "Vandføring",
            "examinationTypeSc": 27,
            "unit": "l/s",
            "unitSc": 55,
            "firstResult": "2002-03-25T11:10Z",
            "latestResult": "2023-11-14T09:42Z"
        }, {
            "parameter": "Vandføring",
            "parameterSc": 1155,
            "examinationType": "Beregnet vandføring",
            "examinationTypeSc": 27,
            "unit": "l/s",
            "unitSc": 55,
            "latestResult": null
        }]
    }]
}"#;

/// A water-levels response: one envelope for station 61000181 with two
/// measurements, the second without an elevation-corrected result.
pub const WATER_LEVELS_61000181: &str = r#"[{
    "stationId": "61000181",
    "operatorStationId": null,
    "results": [{
        "measurementPointNumber": 1,
        "parameterSc": 1233,
        "parameter": "Vandstand",
        "examinationTypeSc": 25,
        "examinationType": "Vandstand",
        "measurementDateTime": "2023-10-02T18:10Z",
        "result": 31.8,
        "resultElevationCorrected": -58.2,
        "unitSc": 19,
        "unit": "cm"
    }, {
        "measurementPointNumber": 1,
        "parameterSc": 1233,
        "parameter": "Vandstand",
        "examinationTypeSc": 25,
        "examinationType": "Vandstand",
        "measurementDateTime": "2023-10-02T18:15Z",
        "result": 31.9,
        "unitSc": 19,
        "unit": "cm"
    }]
}]"#;
