//! StayLink: hotel search and booking demo
//!
//! A fixed sample catalog, a price/location filter, stay pricing, owner
//! property listings, and mock two-role authentication.
//!
//! This lib exposes the domain logic plus the REST layer the server binary mounts.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod models;
pub mod property;
// REST API module: Axum HTTP handlers on port 11111
pub mod rest;
// Client-side session store (Sled) used by the CLI
pub mod storage;
pub mod telemetry;

pub use error::{Result, StayError};
