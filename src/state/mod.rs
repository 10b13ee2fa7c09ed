//! Client-side session and catalog state.
//!
//! DESIGN
//! ======
//! `app` is the plain state bundle and its reducer, `store` the shared handle
//! that owns it and runs the fetches, `notify` the toast messages the store
//! emits for the UI to show.

pub mod app;
pub mod notify;
pub mod store;
