//! Networking modules for the LAYRA HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements `AuthService` over REST and `types` defines the wire schema.

pub mod api;
pub mod types;
