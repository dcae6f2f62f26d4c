//! Per-user membership state.
//!
//! # Design Decisions
//!
//! - **One record per user**: keyed by `user_id`, created implicitly on
//!   first grant
//! - **Expiration is mandatory for active members**: a set `is_member`
//!   flag with no expiration date means *not active*, never
//!   active-forever
//! - **Last grant wins**: a renewal purchase extends from the moment of
//!   the new grant, not from the previous expiration

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Persisted membership attributes of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// User who owns this record.
    pub user_id: UserId,

    /// Role flag; active membership additionally requires an unexpired
    /// `expiration_at`.
    pub is_member: bool,

    /// When membership was (last) activated.
    pub activation_at: Option<Timestamp>,

    /// When membership expires. Always set while `is_member` is true.
    pub expiration_at: Option<Timestamp>,

    /// When the expiration sweep last demoted this user. Audit history,
    /// distinct from `expiration_at`.
    pub last_expired_at: Option<Timestamp>,
}

/// Coarse membership standing for admin display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStanding {
    /// Member with an unexpired expiration date.
    Active,

    /// Held membership at some point but is not active now.
    Lapsed,

    /// No grant on record.
    NeverMember,
}

impl MembershipRecord {
    /// Creates an empty record for a user with no membership history.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            is_member: false,
            activation_at: None,
            expiration_at: None,
            last_expired_at: None,
        }
    }

    /// Activates membership until `expires_at`.
    ///
    /// The activation date is overwritten: a renewal restarts the
    /// membership clock from the new grant.
    pub fn grant(&mut self, now: Timestamp, expires_at: Timestamp) {
        self.is_member = true;
        self.activation_at = Some(now);
        self.expiration_at = Some(expires_at);
    }

    /// Activates membership until `expires_at`, keeping an existing
    /// activation date.
    ///
    /// Used by the profile-level manual grant, where the original
    /// activation is meaningful history.
    pub fn grant_preserving_activation(&mut self, now: Timestamp, expires_at: Timestamp) {
        self.is_member = true;
        if self.activation_at.is_none() {
            self.activation_at = Some(now);
        }
        self.expiration_at = Some(expires_at);
    }

    /// Removes membership. The expiration date is left in place as a
    /// historical record.
    pub fn revoke(&mut self) {
        self.is_member = false;
    }

    /// Demotes an expired member, stamping the audit timestamp.
    pub fn expire(&mut self, now: Timestamp) {
        self.is_member = false;
        self.last_expired_at = Some(now);
    }

    /// True iff the user is an active member at `now`.
    ///
    /// Requires the member flag, a set expiration, and
    /// `expiration_at > now`; the exact boundary instant is already
    /// expired.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        if !self.is_member {
            return false;
        }
        match self.expiration_at {
            Some(expiration) => expiration.is_after(&now),
            None => false,
        }
    }

    /// True iff this member should be picked up by the expiration sweep
    /// at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        if !self.is_member {
            return false;
        }
        match self.expiration_at {
            Some(expiration) => expiration.is_before(&now),
            None => false,
        }
    }

    /// Coarse standing at `now`, for admin display.
    pub fn standing(&self, now: Timestamp) -> MembershipStanding {
        if self.is_active_at(now) {
            MembershipStanding::Active
        } else if self.activation_at.is_some() || self.expiration_at.is_some() {
            MembershipStanding::Lapsed
        } else {
            MembershipStanding::NeverMember
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new(42)
    }

    #[test]
    fn new_record_is_not_active() {
        let record = MembershipRecord::new(user());
        assert!(!record.is_active_at(Timestamp::now()));
        assert_eq!(record.standing(Timestamp::now()), MembershipStanding::NeverMember);
    }

    #[test]
    fn grant_sets_flag_and_dates() {
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(now, now.add_days(365));

        assert!(record.is_member);
        assert_eq!(record.activation_at, Some(now));
        assert_eq!(record.expiration_at, Some(now.add_days(365)));
        assert!(record.is_active_at(now));
    }

    #[test]
    fn regrant_overwrites_activation_date() {
        let first = Timestamp::now();
        let second = first.add_days(100);
        let mut record = MembershipRecord::new(user());
        record.grant(first, first.add_days(365));
        record.grant(second, second.add_days(365));

        assert_eq!(record.activation_at, Some(second));
        assert_eq!(record.expiration_at, Some(second.add_days(365)));
    }

    #[test]
    fn grant_preserving_activation_keeps_first_date() {
        let first = Timestamp::now();
        let second = first.add_days(100);
        let mut record = MembershipRecord::new(user());
        record.grant(first, first.add_days(365));
        record.grant_preserving_activation(second, second.add_days(30));

        assert_eq!(record.activation_at, Some(first));
        assert_eq!(record.expiration_at, Some(second.add_days(30)));
    }

    #[test]
    fn grant_preserving_activation_stamps_first_grant() {
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant_preserving_activation(now, now.add_days(30));

        assert_eq!(record.activation_at, Some(now));
    }

    #[test]
    fn member_flag_without_expiration_is_not_active() {
        let mut record = MembershipRecord::new(user());
        record.is_member = true;

        assert!(!record.is_active_at(Timestamp::now()));
    }

    #[test]
    fn expiration_boundary_is_not_active() {
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(now.minus_days(365), now);

        assert!(!record.is_active_at(now));
        assert!(record.is_active_at(now.minus_days(1)));
    }

    #[test]
    fn revoke_clears_flag_but_keeps_expiration_history() {
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(now, now.add_days(365));
        record.revoke();

        assert!(!record.is_member);
        assert_eq!(record.expiration_at, Some(now.add_days(365)));
        assert!(!record.is_active_at(now));
        assert_eq!(record.standing(now), MembershipStanding::Lapsed);
    }

    #[test]
    fn expire_stamps_audit_timestamp() {
        let granted = Timestamp::now().minus_days(400);
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(granted, granted.add_days(365));

        assert!(record.is_expired_at(now));
        record.expire(now);

        assert!(!record.is_member);
        assert_eq!(record.last_expired_at, Some(now));
        // Original expiration kept for history.
        assert_eq!(record.expiration_at, Some(granted.add_days(365)));
    }

    #[test]
    fn expired_member_leaves_sweep_selection() {
        let granted = Timestamp::now().minus_days(400);
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(granted, granted.add_days(365));
        record.expire(now);

        assert!(!record.is_expired_at(now));
    }

    #[test]
    fn boundary_expiration_is_not_swept_yet() {
        let now = Timestamp::now();
        let mut record = MembershipRecord::new(user());
        record.grant(now.minus_days(365), now);

        // Not active anymore, but the strict `<` selection leaves the
        // exact boundary for the next run.
        assert!(!record.is_active_at(now));
        assert!(!record.is_expired_at(now));
    }
}
