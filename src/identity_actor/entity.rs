//! [`Entity`] implementation for [`UserAccount`], plus the group membership
//! actions the identity actor understands.

use std::collections::BTreeSet;

use crate::domain::{Group, UserAccount, UserCreate, UserId};
use crate::framework::Entity;

/// Membership changes performed on an account.
#[derive(Debug, Clone)]
pub enum AccountAction {
    /// Add the account to a group. Joining the Manager group also grants
    /// staff status.
    Join(Group),
    /// Remove the account from a group. Removing a non-member is a no-op.
    Leave(Group),
}

/// Listing filter for accounts.
#[derive(Debug, Clone)]
pub enum AccountFilter {
    All,
    InGroup(Group),
}

impl Entity for UserAccount {
    type Id = UserId;
    type Key = String;
    type Filter = AccountFilter;
    type CreateParams = UserCreate;
    type UpdateParams = ();
    type Action = AccountAction;
    /// Whether the membership actually changed.
    type ActionResult = bool;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, String> {
        if params.username.trim().is_empty() {
            return Err("username must not be empty".into());
        }
        Ok(Self {
            id,
            username: params.username,
            email: params.email,
            groups: BTreeSet::new(),
            is_staff: false,
        })
    }

    fn id(&self) -> UserId {
        self.id
    }

    /// Accounts are looked up by username.
    fn key(&self) -> String {
        self.username.clone()
    }

    fn matches(&self, filter: &AccountFilter) -> bool {
        match filter {
            AccountFilter::All => true,
            AccountFilter::InGroup(group) => self.in_group(*group),
        }
    }

    fn apply_update(&mut self, _update: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: AccountAction) -> Result<bool, String> {
        match action {
            AccountAction::Join(group) => {
                let added = self.groups.insert(group);
                if group == Group::Manager {
                    self.is_staff = true;
                }
                Ok(added)
            }
            AccountAction::Leave(group) => Ok(self.groups.remove(&group)),
        }
    }
}
