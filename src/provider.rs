// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seams to the external stores the core reads from.
//!
//! The core never owns grants, rules or the page tree; it re-reads them on
//! every resolution so concurrent rule mutations are picked up immediately.
//! Implementations should present a consistent snapshot across the several
//! lookups one resolution performs.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::path::PagePath;
use crate::rule::{AclRule, GroupGrant, RuleSubject};
use crate::{GroupId, PageId, UserId};

/// Failures surfaced by the external stores.
///
/// These are availability and data problems, not programming errors; the
/// resolver recovers from each of them with a documented fallback and never
/// propagates them to its callers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backing store could not be reached or answered with an I/O error.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// The access-controlled root container has not been provisioned yet.
    #[error("content container is not provisioned")]
    ContainerMissing,

    /// No account matches the given principal id.
    #[error("unknown principal: {0}")]
    UnknownPrincipal(UserId),
}

/// Directory lookup of the groups a user belongs to.
pub trait GroupMembership {
    fn groups_of(&self, user_id: &str) -> Result<BTreeSet<GroupId>, ProviderError>;
}

/// Base permission grants per group on the container root.
pub trait GroupGrants {
    /// The grant for a group, or `None` when the group has no access at all.
    fn base_grant(&self, group_id: &str) -> Result<Option<GroupGrant>, ProviderError>;
}

/// Path-scoped override rules, keyed by `(prefix, subject)`.
pub trait AclRules {
    /// The rule for the exact key, if any. At most one rule exists per key.
    fn rule(
        &self,
        prefix: &PagePath,
        subject: RuleSubject<'_>,
    ) -> Result<Option<AclRule>, ProviderError>;
}

/// Read access to the external page storage tree.
///
/// Consumed only by [`PagePathIndex`](crate::PagePathIndex) while building
/// the page-id to path map.
pub trait PageTreeSource {
    type Node;

    /// Child folders of the given node.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, ProviderError>;

    /// Folder name of the node; one path segment.
    fn folder_name(&self, node: &Self::Node) -> String;

    /// Page id declared by the node's page file, if it carries one.
    fn declared_page_id(&self, node: &Self::Node) -> Option<PageId>;
}
