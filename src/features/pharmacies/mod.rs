//! Pharmacy directory feature.
//!
//! Stores pharmacies with their weekly on-duty validity windows and answers
//! the public queries:
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/pharmacies/current-week` | Pharmacies on duty today |
//! | GET | `/api/pharmacies/search?q=` | Search by name or location |
//!
//! The whole dataset is replaced atomically on each spreadsheet import (see
//! the `imports` feature); there is no row-level mutation API.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::PharmacyService;
