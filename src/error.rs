use crate::decode::DecodeError;
use crate::http::query::QueryError;
use crate::http::transport::TransportError;
use thiserror::Error;

/// Any error the client can produce: query construction, transport
/// (including non-200 responses) or response decoding.
#[derive(Debug, Error)]
pub enum VandahError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
