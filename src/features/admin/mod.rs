//! Administrator feature.
//!
//! A single shared-secret password carried in each request body guards the
//! admin surface; the check sits behind the [`services::CredentialVerifier`]
//! trait so real authentication can replace it later.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::AdminService;
