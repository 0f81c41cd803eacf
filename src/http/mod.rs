pub mod content_type;
pub mod query;
pub mod transport;
