//! The main entry point for talking to the VanDa Hydro API: construct a
//! [`VandahClient`], then obtain and execute request operations from it.

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::VandahError;
use crate::http::transport::{HttpStreamClient, StreamService};
use crate::requests::stations::StationsRequest;
use crate::requests::water_flows::WaterFlowsRequest;
use crate::requests::water_levels::WaterLevelsRequest;
use bon::bon;
use reqwest::blocking::Client;
use std::sync::Arc;
use url::Url;

/// Base URL of the production environment of the service.
pub const PRODUCTION_API_BASE: &str = "https://vandah.miljoeportal.dk/api/";

/// Base URL of the test environment of the service.
pub const TEST_API_BASE: &str = "https://vandah.test.miljoeportal.dk/api/";

/// Base URL of the demo environment of the service.
pub const DEMO_API_BASE: &str = "https://vandah.demo.miljoeportal.dk/api/";

/// A client for the VanDa Hydro web service.
///
/// The client itself is immutable and safe to share across threads; the
/// request operations obtained from it are single-use and must stay on
/// one thread. Every operation is a blocking call on the invoking thread.
///
/// # Examples
///
/// ```no_run
/// use vandah::VandahClient;
///
/// # fn run() -> Result<(), vandah::VandahError> {
/// let client = VandahClient::builder().build()?;
/// for station in client.stations().station_id("61000181").exec()? {
///     println!("{:?}", station.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct VandahClient {
    service: Arc<dyn StreamService>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for VandahClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VandahClient").finish_non_exhaustive()
    }
}

#[bon]
impl VandahClient {
    /// Creates a client against an HTTP endpoint of the service.
    ///
    /// # Errors
    ///
    /// Returns [`VandahError::Transport`] when the base URL is not usable
    /// as an API base (opaque, or carrying a query or fragment).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use url::Url;
    /// use vandah::{VandahClient, TEST_API_BASE};
    ///
    /// # fn run() -> Result<(), vandah::VandahError> {
    /// let client = VandahClient::builder()
    ///     .api_base(Url::parse(TEST_API_BASE).unwrap())
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        /// Base URL of the service API, e.g. [`PRODUCTION_API_BASE`]
        /// (the default), [`TEST_API_BASE`] or [`DEMO_API_BASE`].
        api_base: Option<Url>,
        /// The HTTP client to send requests with. Connection reuse,
        /// timeouts and proxies are configured here; a default client is
        /// used when none is given.
        http_client: Option<Client>,
        /// Where the client's diagnostics go. Defaults to [`LogSink`],
        /// which forwards to the `log` facade.
        diagnostics: Option<Arc<dyn DiagnosticSink>>,
    ) -> Result<Self, VandahError> {
        let api_base = api_base
            .unwrap_or_else(|| Url::parse(PRODUCTION_API_BASE).expect("hard-coded URL is valid"));
        let diagnostics = diagnostics.unwrap_or_else(|| Arc::new(LogSink));
        let service = HttpStreamClient::new(
            api_base,
            http_client.unwrap_or_default(),
            diagnostics.clone(),
        )?;
        Ok(Self::from_service(Arc::new(service), diagnostics))
    }
}

impl VandahClient {
    /// Creates a client over any [`StreamService`], e.g. a test double or
    /// an alternative transport.
    pub fn from_service(
        service: Arc<dyn StreamService>,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            service,
            diagnostics,
        }
    }

    /// Starts a request for gauge stations.
    pub fn stations(&self) -> StationsRequest<'_> {
        StationsRequest::new(self)
    }

    /// Starts a request for water-level measurements. The request must be
    /// given a station ID or an operator station ID before execution.
    pub fn water_levels(&self) -> WaterLevelsRequest<'_> {
        WaterLevelsRequest::new(self)
    }

    /// Starts a request for water-flow measurements. The request must be
    /// given a station ID or an operator station ID before execution.
    pub fn water_flows(&self) -> WaterFlowsRequest<'_> {
        WaterFlowsRequest::new(self)
    }

    pub(crate) fn service(&self) -> &dyn StreamService {
        &*self.service
    }

    pub(crate) fn diagnostics(&self) -> &dyn DiagnosticSink {
        &*self.diagnostics
    }
}
