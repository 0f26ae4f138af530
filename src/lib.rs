//! erp-relay: ERP outbound request client
//!
//! A library for sending JSON payloads to named ERP endpoints whose URL,
//! credential, enabled flag, and transport options are resolved from a
//! hierarchical key/value configuration store.

pub mod api;
pub mod config;
