//! garagenet - Veteran's Garage Network directory client
//!
//! Garages, clubs, restoration projects, parts, events, rides and event
//! registrations. This crate owns the data shapes, their validation, the
//! per-entity form controllers, and the client that sends create requests
//! to the managed data service.

pub mod cli;
pub mod client;
pub mod config;
pub mod form;
pub mod location;
pub mod observability;
pub mod schema;
