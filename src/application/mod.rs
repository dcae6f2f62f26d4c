//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports: the order-event grant workflow, the manual admin actions, and
//! the expiration sweep.

pub mod handlers;

pub use handlers::{
    // Grant workflow
    GrantOnOrderHandler, GrantOutcome, OrderLifecycleEvent,
    // Manual admin actions
    GrantOrderManuallyHandler, GrantProfileCommand, GrantProfileHandler, ManualActionResult,
    ManualOrderGrantCommand, RevokeProfileCommand, RevokeProfileHandler,
    // Expiration sweep
    ExpirationSweepHandler,
};
