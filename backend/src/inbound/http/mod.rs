//! HTTP inbound adapter exposing REST endpoints.

pub mod activities;
pub mod error;
pub mod health;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
