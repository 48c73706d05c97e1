//! Client-side state for the sign-in page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `form` holds field values and submission status; `notification` holds the
//! transient banner and its hide timer.

pub mod form;
pub mod notification;
