//! # Lienguard Common Library
//!
//! Shared code for the lienguard tools:
//! - Error taxonomy (`Error` / `Result`)
//! - Settings loading and resolution

pub mod config;
pub mod error;

pub use config::Settings;
pub use error::{Error, Result};
