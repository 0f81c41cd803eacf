pub mod measurement;
pub mod station;
