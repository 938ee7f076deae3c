// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;

use crate::{GroupId, UserId};

/// An authenticated user, or an anonymous visitor, at resolution time.
///
/// Carries the group memberships in effect for this request. Groups are held
/// in a sorted set so that rules applied per group at the same path prefix
/// always run in a stable order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    groups: BTreeSet<GroupId>,
}

impl Principal {
    pub fn new(id: impl Into<UserId>, groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            id: id.into(),
            groups: groups.into_iter().collect(),
        }
    }

    /// An anonymous visitor: no account, no group memberships. The base-grant
    /// gate always yields zero for them, which is why anonymous share access
    /// goes through scope containment instead of permission resolution.
    pub fn anonymous() -> Self {
        Self {
            id: UserId::new(),
            groups: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Group ids in sorted order.
    pub fn groups(&self) -> impl Iterator<Item = &GroupId> {
        self.groups.iter()
    }

    pub fn is_member_of(&self, group_id: &str) -> bool {
        self.groups.contains(group_id)
    }
}
