//! Core domain logic for the kabinet booking engine.
//!
//! Everything in this crate is transport- and storage-agnostic: the HTTP
//! layer lives in `kabinet-api` and the Postgres implementation of the
//! store traits lives in `kabinet-db`.

pub mod availability;
pub mod cache;
pub mod clock;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod reservations;
pub mod store;
pub mod time;
