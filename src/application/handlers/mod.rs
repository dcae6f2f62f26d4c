//! Application handlers.
//!
//! Handlers that orchestrate the membership lifecycle over the ports.

pub mod expiration_sweep;
pub mod grant_on_order;
pub mod manual_grant;

pub use expiration_sweep::ExpirationSweepHandler;
pub use grant_on_order::{GrantOnOrderHandler, GrantOutcome, OrderLifecycleEvent};
pub use manual_grant::{
    GrantOrderManuallyHandler, GrantProfileCommand, GrantProfileHandler, ManualActionResult,
    ManualOrderGrantCommand, RevokeProfileCommand, RevokeProfileHandler,
};
