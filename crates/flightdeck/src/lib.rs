//! `flightdeck` - An in-memory flight record server
//!
//! This library provides an ordered, in-memory store of open-ended flight
//! records and an HTTP layer exposing create, list, get, update and delete
//! operations on it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use flight::{Flight, FlightId};
pub use logging::init_logging;
pub use server::{AppState, Server};
pub use store::{FlightRepository, FlightStore, MemoryRepository};
