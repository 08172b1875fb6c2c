//! HTTP transport layer
//!
//! Provides the external routing surface: the directory endpoint the phones
//! talk to, plus general metadata endpoints.

pub mod handlers;
