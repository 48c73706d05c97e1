//! Headless view models for the sign-in page.
//!
//! ARCHITECTURE
//! ============
//! Components read controller state and produce plain data (labels, flags,
//! lines). They never mutate state, so any surface (terminal, HTML) can
//! render them.

pub mod alert;
pub mod auth_form;
