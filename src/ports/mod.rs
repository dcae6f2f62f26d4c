//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MembershipStore` - Per-user membership persistence
//! - `OrderGateway` - Read-only view of platform orders plus the
//!   grant-once flag and order notes
//! - `UserDirectory` - Lookup of account name and email address
//! - `Mailer` - Outbound templated email transport

mod mailer;
mod membership_store;
mod order_gateway;
mod user_directory;

pub use mailer::{Mailer, MailerError, OutboundEmail};
pub use membership_store::MembershipStore;
pub use order_gateway::{Order, OrderGateway};
pub use user_directory::{UserAccount, UserDirectory};
