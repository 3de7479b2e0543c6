// SPDX-License-Identifier: MIT

//! One-play-per-day entitlement gate.

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Allow,
    Deny { reason: &'static str },
}

impl Entitlement {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Entitlement::Allow)
    }
}

/// Decide whether a user may generate a new vibe today.
///
/// Pure decision over (admin flag, today-vibe presence): a normal user gets
/// one play per calendar day, admins regenerate without limit. Callers must
/// read the today-vibe fact immediately before creation to keep the
/// duplicate window small.
pub fn check_entitlement(is_admin: bool, has_played_today: bool) -> Entitlement {
    if has_played_today && !is_admin {
        Entitlement::Deny {
            reason: "already played today",
        }
    } else {
        Entitlement::Allow
    }
}
