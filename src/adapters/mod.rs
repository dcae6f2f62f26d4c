//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed stores over the platform database
//! - `email` - Resend HTTP transport for outbound mail
//! - `memory` - in-memory implementations for tests

pub mod email;
pub mod memory;
pub mod postgres;
