//! Builds relative references from an operation path and an ordered list of
//! query parameters, encoded according to the conventions for
//! [URL-encoded form data](https://url.spec.whatwg.org/#application/x-www-form-urlencoded)
//! with the exception that space encodes as `%20` rather than `+`.

use std::fmt;
use thiserror::Error;
use url::Url;

/// Errors from building or combining a [`UrlEncodedQuery`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// A relative path whose first segment contains `:` cannot be expressed
    /// as a relative URI reference (RFC 3986 section 4.2 would read the
    /// segment as a scheme).
    #[error("relative path {0:?} has a ':' in its first segment")]
    AmbiguousRelativePath(String),

    /// The append target is not a hierarchical URL.
    #[error("cannot append to non-hierarchical base URL: {0}")]
    OpaqueBase(Url),

    /// The base URL and relative reference did not combine into a valid URL.
    #[error("combined URL {combined:?} is invalid")]
    InvalidCombination {
        combined: String,
        #[source]
        source: url::ParseError,
    },
}

/// An operation path plus an ordered list of encoded query parameters.
///
/// Parameters render on the wire in insertion order, which is significant to
/// the service. A parameter without a value renders as a bare name. Space
/// encodes as `%20`, everything outside the RFC 3986 unreserved set is
/// percent-encoded with uppercase hex.
///
/// # Examples
///
/// ```
/// use vandah::UrlEncodedQuery;
///
/// let mut query = UrlEncodedQuery::new("water-levels")?;
/// query.append("stationId", Some("61000181"));
/// query.append("format", None);
/// assert_eq!(query.to_string(), "water-levels?stationId=61000181&format");
/// # Ok::<(), vandah::QueryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEncodedQuery {
    path: String,
    params: Vec<String>,
}

impl UrlEncodedQuery {
    /// Creates a query with the given operation path and no parameters.
    ///
    /// The path may be relative or absolute and is percent-encoded segment
    /// by segment, so it can contain spaces or non-ASCII characters.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::AmbiguousRelativePath`] if the path is relative
    /// and its first segment contains `:`. Such a path cannot be written as
    /// a relative reference; either lead with `/` or `./` or encode the
    /// colon yourself.
    pub fn new(path: &str) -> Result<Self, QueryError> {
        Ok(Self {
            path: encode_path(path)?,
            params: Vec::new(),
        })
    }

    /// Creates a query from a known-good, already encoded operation path.
    pub(crate) fn from_static(path: &'static str) -> Self {
        Self {
            path: path.to_owned(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter. `None` renders as a bare name without `=`.
    ///
    /// Name and value are encoded here; pass them raw.
    pub fn append(&mut self, name: &str, value: Option<&str>) {
        let mut param = urlencoding::encode(name).into_owned();
        if let Some(value) = value {
            param.push('=');
            param.push_str(&urlencoding::encode(value));
        }
        self.params.push(param);
    }

    /// The encoded operation path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The encoded query string, without a leading `?`. Empty if no
    /// parameters have been appended.
    pub fn query_string(&self) -> String {
        self.params.join("&")
    }

    /// Appends path and query to a base URL, keeping the base's own path.
    ///
    /// This is not URI-reference resolution: resolving `op` against
    /// `http://host/api` would drop the `api` segment, while this method
    /// yields `http://host/api/op`. At most one slash is trimmed from each
    /// side of the joint, so `http://host/api/` gives the same result.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::OpaqueBase`] if `base` is not hierarchical
    /// (e.g. a `mailto:` URL).
    pub fn append_to(&self, base: &Url) -> Result<Url, QueryError> {
        if base.cannot_be_a_base() {
            return Err(QueryError::OpaqueBase(base.clone()));
        }
        let relative = self.to_string();
        let mut combined = base
            .as_str()
            .strip_suffix('/')
            .unwrap_or(base.as_str())
            .to_owned();
        combined.push('/');
        combined.push_str(relative.strip_prefix('/').unwrap_or(&relative));
        Url::parse(&combined).map_err(|source| QueryError::InvalidCombination { combined, source })
    }
}

impl fmt::Display for UrlEncodedQuery {
    /// Renders the relative reference: the path, then `?` and the query
    /// string if any parameters are present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.params.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query_string())?;
        }
        Ok(())
    }
}

/// Percent-encodes a path segment by segment, preserving `/` separators.
///
/// A relative path whose first segment contains a literal `:` is rejected
/// rather than encoded, since the encoded form would no longer round-trip
/// to the same reference.
fn encode_path(path: &str) -> Result<String, QueryError> {
    if !path.starts_with('/') {
        let first = path.split('/').next().unwrap_or("");
        if first.contains(':') {
            return Err(QueryError::AmbiguousRelativePath(path.to_owned()));
        }
    }
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    Ok(segments.join("/"))
}
