//! Real-time dataset sync feature.
//!
//! Keeps one WebSocket per consumer and pushes a `PHARMACY_DATA_UPDATED`
//! message to every live subscriber whenever a spreadsheet import replaces
//! the dataset. Delivery is fire-and-forget: no acknowledgment, no retry,
//! at most one delivery per subscriber per import.
//!
//! ## Client contract
//!
//! Consumers of `GET /ws` are expected to:
//!
//! - keep a single live connection to the endpoint;
//! - on `PHARMACY_DATA_UPDATED`, invalidate any cached current-week and
//!   search results so the next read re-fetches;
//! - reconnect after a fixed backoff: 3 s after a clean close, 5 s after a
//!   connection failure, unconditionally and indefinitely;
//! - on becoming visible/foregrounded again, reconnect immediately if not
//!   already connected.
//!
//! The one-time `CONNECTION_ESTABLISHED` message sent on join is advisory
//! and carries no data.

pub mod broadcaster;
pub mod dtos;
pub mod handlers;
pub mod routes;

pub use broadcaster::Broadcaster;
