//! Thin client for the Sumsub identity-verification API.
//!
//! Every outgoing request is signed with the shared-secret HMAC-SHA256
//! scheme described in Sumsub's app-token documentation. The client is
//! synchronous and stateless: each operation is one signed round trip.

pub mod config;
pub mod models;
pub mod services;

pub use config::{ConfigError, SumsubConfig};
pub use services::crypto::{AuthHeaders, CryptoError, SigningService};
pub use services::sumsub_service::{SumsubClient, SumsubServiceError};
