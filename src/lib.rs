// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access-control resolution and visibility filtering for hierarchical wiki
//! content.
//!
//! Pages, navigation and shares live as a folder hierarchy inside one shared
//! content container. A principal's effective permissions on a path are
//! computed in two stages: coarse group-based grants on the container root act
//! as a gate, and fine-grained path-scoped override rules cascade from the
//! root down to the requested path. The same resolution then drives a generic
//! tree filter which prunes navigation menus and page trees down to what a
//! principal, or an anonymous share visitor, may see.
//!
//! The crate holds no state of its own between invocations. Group grants, ACL
//! rules and the page tree are owned by external stores accessed through the
//! traits in [`provider`].

pub mod filter;
mod index;
mod path;
mod perm;
mod principal;
pub mod provider;
mod resolver;
mod rule;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod tree;

pub use filter::{
    PermissionPolicy, ShareScope, ShareScopePolicy, TreeFilter, Visibility, VisibilityPolicy,
};
pub use index::PagePathIndex;
pub use path::PagePath;
pub use perm::{PermissionMask, PermissionSummary};
pub use principal::Principal;
pub use resolver::PermissionResolver;
pub use rule::{AclRule, GroupGrant, RuleSubject};
pub use tree::{NavLink, NavNode, VisibleNode};

/// Identifier of a user account, assigned by the external directory.
pub type UserId = String;

/// Identifier of a group, assigned by the external directory.
pub type GroupId = String;

/// Opaque identifier a page declares in its page file.
pub type PageId = String;
