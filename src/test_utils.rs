// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory providers for tests and examples.

use std::collections::{BTreeSet, HashMap};

use crate::path::PagePath;
use crate::perm::PermissionMask;
use crate::provider::{
    AclRules, GroupGrants, GroupMembership, PageTreeSource, ProviderError,
};
use crate::rule::{AclRule, GroupGrant, RuleSubject};
use crate::{GroupId, PageId, UserId};

/// Directory of user accounts and their group memberships.
#[derive(Clone, Debug, Default)]
pub struct MemDirectory {
    users: HashMap<UserId, BTreeSet<GroupId>>,
}

impl MemDirectory {
    pub fn insert<const N: usize>(&mut self, user_id: &str, groups: [&str; N]) {
        self.users.insert(
            user_id.to_string(),
            groups.iter().map(|group| group.to_string()).collect(),
        );
    }
}

impl GroupMembership for MemDirectory {
    fn groups_of(&self, user_id: &str) -> Result<BTreeSet<GroupId>, ProviderError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownPrincipal(user_id.to_string()))
    }
}

/// Base grants per group on the container root.
#[derive(Clone, Debug, Default)]
pub struct MemGrants {
    grants: HashMap<GroupId, PermissionMask>,
}

impl MemGrants {
    pub fn grant(&mut self, group_id: &str, permissions: PermissionMask) {
        self.grants.insert(group_id.to_string(), permissions);
    }
}

impl GroupGrants for MemGrants {
    fn base_grant(&self, group_id: &str) -> Result<Option<GroupGrant>, ProviderError> {
        Ok(self.grants.get(group_id).map(|permissions| GroupGrant {
            group_id: group_id.to_string(),
            permissions: *permissions,
        }))
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
enum SubjectKey {
    Group(String),
    User(String),
}

impl From<RuleSubject<'_>> for SubjectKey {
    fn from(subject: RuleSubject<'_>) -> Self {
        match subject {
            RuleSubject::Group(id) => SubjectKey::Group(id.to_string()),
            RuleSubject::User(id) => SubjectKey::User(id.to_string()),
        }
    }
}

/// Path-scoped rules keyed by `(prefix, subject)`.
#[derive(Clone, Debug, Default)]
pub struct MemRules {
    rules: HashMap<(PagePath, SubjectKey), AclRule>,
}

impl MemRules {
    pub fn insert(&mut self, prefix: PagePath, subject: RuleSubject<'_>, rule: AclRule) {
        self.rules.insert((prefix, subject.into()), rule);
    }
}

impl AclRules for MemRules {
    fn rule(
        &self,
        prefix: &PagePath,
        subject: RuleSubject<'_>,
    ) -> Result<Option<AclRule>, ProviderError> {
        Ok(self
            .rules
            .get(&(prefix.clone(), subject.into()))
            .copied())
    }
}

/// Provider that always fails, for exercising the resolver's fallbacks.
#[derive(Clone, Copy, Debug)]
pub struct BrokenStore {
    container_missing: bool,
}

impl BrokenStore {
    /// Fails every lookup with [`ProviderError::ContainerMissing`].
    pub fn container_missing() -> Self {
        Self {
            container_missing: true,
        }
    }

    /// Fails every lookup with [`ProviderError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            container_missing: false,
        }
    }

    fn error(&self) -> ProviderError {
        if self.container_missing {
            ProviderError::ContainerMissing
        } else {
            ProviderError::Unavailable("store offline".to_string())
        }
    }
}

impl GroupMembership for BrokenStore {
    fn groups_of(&self, _user_id: &str) -> Result<BTreeSet<GroupId>, ProviderError> {
        Err(self.error())
    }
}

impl GroupGrants for BrokenStore {
    fn base_grant(&self, _group_id: &str) -> Result<Option<GroupGrant>, ProviderError> {
        Err(self.error())
    }
}

impl AclRules for BrokenStore {
    fn rule(
        &self,
        _prefix: &PagePath,
        _subject: RuleSubject<'_>,
    ) -> Result<Option<AclRule>, ProviderError> {
        Err(self.error())
    }
}

/// One folder of an in-memory page tree.
#[derive(Clone, Debug)]
pub struct MemFolder {
    pub name: String,
    pub page_id: Option<PageId>,
    pub children: Vec<MemFolder>,
}

impl MemFolder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            page_id: None,
            children: Vec::new(),
        }
    }

    pub fn with_page(mut self, page_id: &str) -> Self {
        self.page_id = Some(page_id.to_string());
        self
    }

    pub fn with_children(mut self, children: Vec<MemFolder>) -> Self {
        self.children = children;
        self
    }
}

/// Page tree walker over [`MemFolder`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemPageTree;

impl PageTreeSource for MemPageTree {
    type Node = MemFolder;

    fn children(&self, node: &MemFolder) -> Result<Vec<MemFolder>, ProviderError> {
        Ok(node.children.clone())
    }

    fn folder_name(&self, node: &MemFolder) -> String {
        node.name.clone()
    }

    fn declared_page_id(&self, node: &MemFolder) -> Option<PageId> {
        node.page_id.clone()
    }
}
