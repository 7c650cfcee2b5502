//! Merchant and product management backend.
//!
//! This crate provides the pieces of a small merchant dashboard:
//!
//! - [`models`]: merchants, products, their create/update inputs and the
//!   sequential `M000001` / `P000001` identifiers.
//! - [`backend`]: the [`backend::Backend`] / [`backend::BlockingBackend`]
//!   traits and the [`backend::InMemoryStore`] fallback backend.
//! - [`client`]: typed HTTP clients (async and blocking) for a remote
//!   backend.
//! - [`actions`]: backend calls normalized into `{success, data|error}`
//!   results.
//! - [`list`]: search filtering and pagination over fetched collections.
//! - `server` (feature `server`): the axum fallback server.

extern crate alloc;

pub mod actions;
pub mod backend;
pub mod client;
pub mod error;
pub mod list;
pub mod models;
#[cfg(feature = "server")]
pub mod server;

pub use error::{DashboardError, Result};
