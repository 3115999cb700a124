use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a principal.
pub type UserId = u64;

/// The two named groups a principal can belong to.
///
/// Internal names follow the identity store: `Manager` and `delivery crew`.
/// External (URL-facing) names are mapped by
/// [`normalize_group`](crate::access::normalize_group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    Manager,
    DeliveryCrew,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Manager => write!(f, "Manager"),
            Group::DeliveryCrew => write!(f, "delivery crew"),
        }
    }
}

/// An authenticated principal as the identity store knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    /// Unique human key; order assignment references crew members by username.
    pub username: String,
    pub email: String,
    pub groups: BTreeSet<Group>,
    /// Set when the account is added to the Manager group; never cleared.
    pub is_staff: bool,
}

impl UserAccount {
    pub fn in_group(&self, group: Group) -> bool {
        self.groups.contains(&group)
    }
}

/// Payload for registering an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
}
