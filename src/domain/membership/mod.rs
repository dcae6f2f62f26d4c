//! Membership domain module.
//!
//! Handles the premium tier lifecycle: activation on purchase, time-boxed
//! expiration, and the active-membership predicate the pricing engine
//! relies on.
//!
//! # Module Structure
//!
//! - `record` - Per-user persisted membership state
//! - `evaluator` - Store-backed "is this user an active member" predicate
//! - `policy` - Read-only premium configuration consumed by the core

mod evaluator;
mod policy;
mod record;

pub use evaluator::MembershipEvaluator;
pub use policy::PremiumPolicy;
pub use record::{MembershipRecord, MembershipStanding};
