//! HTTP API for heroes, powers and the powers each hero wields.
//!
//! Every route maps directly onto one store operation; see
//! [`routes::create_router`] for the full route table.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
