//! HTTP surface over the [`crate::api::API`] context.
//!
//! ## Routes
//!
//! - `GET  /species` — distinct species
//! - `GET  /species/{name}` — records, newest first (`limit`, `start_date`, `end_date`)
//! - `GET  /species/{name}/environment` — sst/sss/depth statistics
//! - `GET  /nearest_occurrence?lat=&lon=` — closest record in degree space
//! - `POST /predict` — habitat probability from a species model
//! - `GET  /health` — liveness
pub mod config;
pub mod handlers;
pub mod server;

pub use config::*;
pub use server::*;
