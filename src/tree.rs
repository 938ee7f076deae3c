// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::PageId;

/// Where a navigation or page-tree entry points.
///
/// Serialized flat into the owning node, matching the stored navigation
/// item shape: a `uniqueId` key for internal pages, a `url` key for external
/// links, neither for pure grouping entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavLink {
    /// An internal page, referenced by its declared page id. The id is
    /// translated to a storage path via [`PagePathIndex`](crate::PagePathIndex)
    /// during filtering.
    Page {
        #[serde(rename = "uniqueId")]
        page_id: PageId,
    },

    /// An opaque external URL; carries no internal path semantics.
    External { url: String },

    /// No link: a grouping entry that only exists to hold children.
    None {},
}

impl Default for NavLink {
    fn default() -> Self {
        NavLink::None {}
    }
}

/// One raw entry of a navigation menu or page tree, as supplied by the
/// rendering layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub link: NavLink,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn page(id: impl Into<String>, page_id: impl Into<PageId>) -> Self {
        Self {
            id: id.into(),
            link: NavLink::Page {
                page_id: page_id.into(),
            },
            ..Self::default()
        }
    }

    pub fn external(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            link: NavLink::External { url: url.into() },
            ..Self::default()
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.children = children;
        self
    }
}

/// A surviving node of a filtered tree.
///
/// Always a freshly constructed value; the filter never mutates or aliases
/// the input tree. `tag` carries the visibility policy's per-node annotation,
/// the permission descriptor in the authenticated case, and serializes under
/// the `permissions` key the UI expects.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisibleNode<T> {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(flatten)]
    pub link: NavLink,

    #[serde(rename = "permissions", skip_serializing_if = "Option::is_none")]
    pub tag: Option<T>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VisibleNode<T>>,
}
