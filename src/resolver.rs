// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::{debug, warn};

use crate::path::PagePath;
use crate::perm::{PermissionMask, PermissionSummary};
use crate::principal::Principal;
use crate::provider::{AclRules, GroupGrants, GroupMembership, ProviderError};
use crate::rule::RuleSubject;

/// Resolves a principal's effective permissions on a path.
///
/// Resolution is a two-stage policy. Group membership is a gate: the OR of
/// all base grants for the principal's groups must be nonzero before any rule
/// is consulted. Once past the gate, ACL rules cascade from the container
/// root down to the requested path, each rule overriding only its masked
/// bits, so a deeper rule always wins over a shallower one for the bits it
/// controls. At one prefix, group rules are applied in sorted group order and
/// the user rule last, so a user-specific rule wins over a group rule for
/// overlapping bits.
///
/// One resolution issues a bounded number of lookups: one grant lookup per
/// group plus one rule lookup per path prefix and subject.
pub struct PermissionResolver<'a, G, A> {
    grants: &'a G,
    rules: &'a A,
}

impl<'a, G, A> PermissionResolver<'a, G, A>
where
    G: GroupGrants,
    A: AclRules,
{
    pub fn new(grants: &'a G, rules: &'a A) -> Self {
        Self { grants, rules }
    }

    /// Resolve effective permissions for a principal on a path.
    ///
    /// Never fails. A missing container degrades to full access so that a
    /// fresh install can be set up; any other provider failure degrades to
    /// read-only.
    pub fn resolve(&self, principal: &Principal, path: &PagePath) -> PermissionSummary {
        match self.try_resolve(principal, path) {
            Ok(mask) => mask.summary(),
            Err(err) => recover(err, path),
        }
    }

    /// Resolve for a bare user id, consulting the directory for group
    /// memberships first. Unknown accounts get no access.
    pub fn resolve_user<M>(
        &self,
        directory: &M,
        user_id: &str,
        path: &PagePath,
    ) -> PermissionSummary
    where
        M: GroupMembership,
    {
        match directory.groups_of(user_id) {
            Ok(groups) => self.resolve(&Principal::new(user_id, groups), path),
            Err(err) => recover(err, path),
        }
    }

    pub fn can_read(&self, principal: &Principal, path: &PagePath) -> bool {
        self.resolve(principal, path).can_read
    }

    pub fn can_write(&self, principal: &Principal, path: &PagePath) -> bool {
        self.resolve(principal, path).can_write
    }

    pub fn can_create(&self, principal: &Principal, path: &PagePath) -> bool {
        self.resolve(principal, path).can_create
    }

    pub fn can_delete(&self, principal: &Principal, path: &PagePath) -> bool {
        self.resolve(principal, path).can_delete
    }

    pub fn can_share(&self, principal: &Principal, path: &PagePath) -> bool {
        self.resolve(principal, path).can_share
    }

    /// The principal holds at least one bit on the container root.
    pub fn has_access(&self, principal: &Principal) -> bool {
        self.resolve(principal, &PagePath::root()).has_access()
    }

    /// The principal holds READ, UPDATE, CREATE and DELETE on the container
    /// root. SHARE is not required.
    pub fn is_admin(&self, principal: &Principal) -> bool {
        self.resolve(principal, &PagePath::root()).is_admin
    }

    fn try_resolve(
        &self,
        principal: &Principal,
        path: &PagePath,
    ) -> Result<PermissionMask, ProviderError> {
        let mut base = PermissionMask::empty();
        for group in principal.groups() {
            if let Some(grant) = self.grants.base_grant(group)? {
                base |= grant.permissions;
            }
        }

        // The gate: without a base grant from any group, rules are never
        // consulted.
        if base.is_empty() {
            debug!("no base grant for '{}', skipping rule cascade", principal.id());
            return Ok(base);
        }

        let mut effective = base;
        for prefix in path.prefixes() {
            for group in principal.groups() {
                if let Some(rule) = self.rules.rule(&prefix, RuleSubject::Group(group))? {
                    effective = rule.apply(effective);
                }
            }
            // The user rule runs after all group rules at this prefix.
            if let Some(rule) = self.rules.rule(&prefix, RuleSubject::User(principal.id()))? {
                effective = rule.apply(effective);
            }
        }

        debug!(
            "resolved '{}' on '{}': {:?} (base {:?})",
            principal.id(),
            path,
            effective,
            base
        );
        Ok(effective)
    }
}

/// Map a provider failure onto the documented conservative result.
fn recover(err: ProviderError, path: &PagePath) -> PermissionSummary {
    match err {
        ProviderError::ContainerMissing => {
            warn!("container not provisioned, granting full access for setup");
            PermissionMask::ALL.summary()
        }
        ProviderError::UnknownPrincipal(id) => {
            debug!("unknown principal '{}', no access", id);
            PermissionSummary::none()
        }
        ProviderError::Unavailable(reason) => {
            warn!(
                "permission lookup for '{}' degraded ({}), falling back to read-only",
                path, reason
            );
            PermissionMask::READ.summary()
        }
    }
}
