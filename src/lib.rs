//! LAYRA sign-in client.
//!
//! ARCHITECTURE
//! ============
//! - `state`: form fields, submission lifecycle, notification banner
//! - `auth`: the `AuthService` seam and failure normalization
//! - `pages`: the sign-in controller tying state, service, and navigation together
//! - `components`: headless view models rendered by the binary
//! - `net`: REST implementation of `AuthService`
//! - `db`: startup migration for the backing database

pub mod auth;
pub mod components;
pub mod config;
pub mod db;
pub mod net;
pub mod pages;
pub mod state;
