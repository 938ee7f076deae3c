// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::GroupId;
use crate::perm::PermissionMask;

/// A group's base permission grant on the container root.
///
/// Groups without access are absent from the grant store, never present with
/// an empty mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGrant {
    pub group_id: GroupId,
    pub permissions: PermissionMask,
}

/// The principal a path-scoped rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleSubject<'a> {
    Group(&'a str),
    User(&'a str),
}

/// A path-scoped permission override.
///
/// `mask` selects which bits the rule controls and `permissions` supplies
/// their value; bits outside `mask` pass through unchanged. A rule can both
/// remove and add bits relative to the state it is applied onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclRule {
    pub mask: PermissionMask,
    pub permissions: PermissionMask,
}

impl AclRule {
    /// Overlay this rule onto previously resolved bits.
    pub fn apply(&self, effective: PermissionMask) -> PermissionMask {
        (effective & !self.mask) | (self.permissions & self.mask)
    }
}
