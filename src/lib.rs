//! Search and booking core for a wedding-venue marketplace.
//!
//! - `search`: filter enums and state, query-string codec, phrase extraction,
//!   pagination and local catalog filtering
//! - `services`: prayer-times client, auth/booking/favorites API client,
//!   persisted admin session, cancellable fetch state

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;

pub use config::Config;
pub use error::{Error, Result};
