//! Blocking HTTP transport: sends GET requests against the service base URL
//! and hands back response bodies as streams tagged with their resolved
//! character set and media type.

use crate::diagnostics::DiagnosticSink;
use crate::http::content_type::ContentType;
use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// A non-200 response, captured eagerly so the connection is released
/// before the error starts travelling up the stack.
#[derive(Debug, Error)]
#[error("HTTP status {status} from {url}: {body}")]
pub struct HttpStatusError {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: String,
}

impl HttpStatusError {
    /// Builds a status error. Useful for [`StreamService`] implementations
    /// outside this crate.
    pub fn new(status: StatusCode, url: Url, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            url,
            headers,
            body,
        }
    }

    /// The HTTP status code of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The URL the request was sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Best-effort text of the response body, decoded with the charset the
    /// response declared (UTF-8 when it declared none). If the body could
    /// not be read, this is a placeholder describing the read failure.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Errors raised while setting up or talking to the service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("API base URL cannot be used as a base: {0}")]
    ApiBaseNotHierarchical(Url),

    #[error("API base URL should not have a query component: {0}")]
    ApiBaseQuery(Url),

    #[error("API base URL should not have a fragment component: {0}")]
    ApiBaseFragment(Url),

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Request URL built from {path_and_query:?} is invalid")]
    RequestUrl {
        path_and_query: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Network request failed for {0}")]
    Network(Url, #[source] reqwest::Error),

    #[error(transparent)]
    Status(#[from] HttpStatusError),
}

/// A response body stream plus the content metadata needed to read it.
///
/// Reading it to the end (or dropping it) releases the underlying
/// connection. An absent body is represented as an already-exhausted
/// stream, never as a missing one.
pub struct ResponseBody {
    reader: Box<dyn Read + Send>,
    charset: &'static Encoding,
    media_type: Option<String>,
}

impl ResponseBody {
    /// Wraps a reader with its resolved charset and declared media type.
    pub fn new(
        reader: impl Read + Send + 'static,
        charset: &'static Encoding,
        media_type: Option<String>,
    ) -> Self {
        Self {
            reader: Box::new(reader),
            charset,
            media_type,
        }
    }

    /// An exhausted UTF-8 body with no media type.
    pub fn empty() -> Self {
        Self::new(io::empty(), UTF_8, None)
    }

    /// The character set the body is declared (or defaulted) to be in.
    /// Defaults to UTF-8 when the response did not declare one.
    pub fn charset(&self) -> &'static Encoding {
        self.charset
    }

    /// The media type the response declared, if any.
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody")
            .field("charset", &self.charset.name())
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

/// The seam between the request operations and HTTP.
///
/// [`HttpStreamClient`] is the real implementation; tests and alternative
/// transports substitute their own.
pub trait StreamService: Send + Sync {
    /// Sends a GET for the given URL-encoded operation path and query,
    /// accepting JSON. A response with a non-JSON media type is reported
    /// through diagnostics but still returned.
    ///
    /// # Errors
    ///
    /// [`TransportError::Status`] for a non-200 response, other
    /// [`TransportError`] variants for I/O and URL trouble.
    fn get(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError>;

    /// Sends the same GET without JSON content negotiation. Used for the
    /// raw `format=csv` / `format=parquet` operation variants, where the
    /// body is passed through undecoded.
    ///
    /// # Errors
    ///
    /// As for [`StreamService::get`].
    fn get_raw(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError>;
}

/// [`StreamService`] over a blocking [`reqwest`] client.
///
/// Immutable after construction and safe to share across threads.
pub struct HttpStreamClient {
    http: Client,
    api_base: Url,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl HttpStreamClient {
    /// Builds the transport for a service base URL, e.g.
    /// `https://vandah.miljoeportal.dk/api/`.
    ///
    /// The base must be a hierarchical URL without query or fragment. A
    /// base path that does not end in `/` draws a warning through the
    /// sink, since request paths are appended by concatenation; a base
    /// path other than `/api/` draws a debug note.
    ///
    /// # Errors
    ///
    /// The `ApiBase*` variants of [`TransportError`] when the URL shape is
    /// unusable.
    pub fn new(
        api_base: Url,
        http: Client,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, TransportError> {
        if api_base.cannot_be_a_base() {
            return Err(TransportError::ApiBaseNotHierarchical(api_base));
        }
        if api_base.query().is_some() {
            return Err(TransportError::ApiBaseQuery(api_base));
        }
        if api_base.fragment().is_some() {
            return Err(TransportError::ApiBaseFragment(api_base));
        }
        if !api_base.path().ends_with('/') {
            diagnostics.warn(&format!("API base URL does not end with '/': {api_base}"));
        } else if api_base.path() != "/api/" {
            diagnostics.debug(&format!(
                "Given API base URL does not end with '/api/': {api_base}"
            ));
        }
        Ok(Self {
            http,
            api_base,
            diagnostics,
        })
    }

    /// Glues base, path and query together by plain concatenation. The
    /// base is kept whole, which is why construction warns about a base
    /// without a trailing slash.
    fn request_url(&self, path: &str, query: &str) -> Result<Url, TransportError> {
        let mut path_and_query = String::from(path);
        if !query.is_empty() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }
        let combined = format!("{}{}", self.api_base, path_and_query);
        Url::parse(&combined).map_err(|source| TransportError::RequestUrl {
            path_and_query,
            source,
        })
    }

    fn dispatch(
        &self,
        path: &str,
        query: &str,
        expect_json: bool,
    ) -> Result<ResponseBody, TransportError> {
        let url = self.request_url(path, query)?;
        self.diagnostics.debug(&format!("GET {url}"));
        let mut request = self.http.get(url.clone());
        if expect_json {
            request = request.header(ACCEPT, "application/json");
        }
        let response = request
            .send()
            .map_err(|source| TransportError::Network(url.clone(), source))?;
        if response.status() != StatusCode::OK {
            return Err(read_status_error(url, response).into());
        }
        let content_type = content_type_of(response.headers());
        if expect_json {
            self.check_content_type(&url, &content_type);
        }
        let charset = content_type.charset().unwrap_or(UTF_8);
        let media_type = content_type.media_type().map(str::to_owned);
        Ok(ResponseBody::new(response, charset, media_type))
    }

    fn check_content_type(&self, url: &Url, content_type: &ContentType) {
        if let Some(media_type) = content_type.media_type() {
            if !media_type.eq_ignore_ascii_case("application/json") {
                self.diagnostics.debug(&format!(
                    "Unexpected media type in response from {url}: {media_type}"
                ));
            }
        }
        if let Some(charset) = content_type.charset() {
            if charset != UTF_8 {
                self.diagnostics.debug(&format!(
                    "Unexpected charset in response from {url}: {}",
                    charset.name()
                ));
            }
        }
    }
}

impl StreamService for HttpStreamClient {
    fn get(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError> {
        self.dispatch(path, query, true)
    }

    fn get_raw(&self, path: &str, query: &str) -> Result<ResponseBody, TransportError> {
        self.dispatch(path, query, false)
    }
}

fn content_type_of(headers: &HeaderMap) -> ContentType {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ContentType::parse)
        .unwrap_or_else(ContentType::unspecified)
}

/// Drains the body into the error. Read failures become a placeholder so
/// the status error itself never fails to materialize.
fn read_status_error(url: Url, response: Response) -> HttpStatusError {
    let status = response.status();
    let headers = response.headers().clone();
    let charset = content_type_of(&headers).charset().unwrap_or(UTF_8);
    let body = match response.bytes() {
        Ok(bytes) => charset.decode(&bytes).0.into_owned(),
        Err(e) => format!("(at attempt to retrieve response body: {e})"),
    };
    HttpStatusError::new(status, url, headers, body)
}
