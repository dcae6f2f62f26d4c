//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the persistence ports, running
//! against the platform database.

mod membership_store;
mod order_gateway;
mod user_directory;

pub use membership_store::PostgresMembershipStore;
pub use order_gateway::PostgresOrderGateway;
pub use user_directory::PostgresUserDirectory;
