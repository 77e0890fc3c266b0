//! Service layer between the HTTP handlers and the repositories.

pub mod climate;
pub mod date_policy;

pub use climate::ClimateError;
pub use date_policy::DateParamMode;
