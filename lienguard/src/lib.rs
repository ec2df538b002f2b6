//! lienguard library interface
//!
//! Exposes the reconciliation engine for integration testing. The binary in
//! `main.rs` is a thin CLI over [`services::pipeline::ReconcilePipeline`].

pub mod models;
pub mod services;
pub mod store;

pub use lienguard_common::{Error, Result, Settings};
