//! Utility modules
//!
//! This module contains common utilities used throughout the crate,
//! including error handling, logging setup, and input helpers.

pub mod errors;
pub mod logging;
pub mod helpers;

pub use errors::{EventsApiError, Result};
