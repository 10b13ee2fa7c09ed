//! Networking modules for the user and blog services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the backend seam and its HTTP implementation, `session` the
//! locally held session token, and `types` the shared wire schema.

pub mod api;
pub mod session;
pub mod types;
