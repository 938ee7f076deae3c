// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic tree pruning over navigation and page trees.
//!
//! One recursive traversal serves both visibility models: permission-driven
//! filtering for authenticated principals and scope containment for anonymous
//! share visitors. Only the leaf predicate differs, supplied as a
//! [`VisibilityPolicy`].

use tracing::debug;

use crate::index::PagePathIndex;
use crate::path::PagePath;
use crate::perm::PermissionSummary;
use crate::principal::Principal;
use crate::provider::{AclRules, GroupGrants};
use crate::resolver::PermissionResolver;
use crate::tree::{NavLink, NavNode, VisibleNode};

/// Outcome of a visibility check on one page path.
#[derive(Clone, Debug, PartialEq)]
pub enum Visibility<T> {
    /// The page is hidden; the node and its subtree are pruned.
    Hidden,

    /// The page is visible, nothing to attach.
    Visible,

    /// The page is visible; attach an annotation to the emitted node.
    Annotated(T),
}

/// Pluggable visibility decision for page-linked nodes.
pub trait VisibilityPolicy {
    /// Annotation attached to emitted page nodes, e.g. a permission
    /// descriptor for UI affordances.
    type Tag;

    fn check(&self, path: &PagePath) -> Visibility<Self::Tag>;
}

/// Prunes a raw tree down to the nodes the policy allows.
///
/// Inclusion rules per node:
///
/// - Page link: included iff the page id resolves to a path in the index and
///   the policy admits that path. A reference the index cannot resolve is
///   hidden, never shown blindly. Children are filtered and attached even
///   when none survive.
/// - External link: always included, children filtered.
/// - Grouping entry (no link): included iff at least one child survives.
///
/// Denied content is simply absent from the output; the filter never emits
/// partial or redacted nodes.
pub struct TreeFilter<'a, P> {
    index: &'a PagePathIndex,
    policy: P,
}

impl<'a, P> TreeFilter<'a, P>
where
    P: VisibilityPolicy,
{
    pub fn new(index: &'a PagePathIndex, policy: P) -> Self {
        Self { index, policy }
    }

    /// Filter a forest of sibling items.
    pub fn filter_all(&self, items: &[NavNode]) -> Vec<VisibleNode<P::Tag>> {
        items.iter().filter_map(|node| self.filter(node)).collect()
    }

    /// Filter one node; `None` when the node and its subtree are hidden.
    pub fn filter(&self, node: &NavNode) -> Option<VisibleNode<P::Tag>> {
        match &node.link {
            NavLink::Page { page_id } => {
                let Some(path) = self.index.path_of(page_id) else {
                    debug!(
                        "page id '{}' not in index, hiding node '{}'",
                        page_id, node.id
                    );
                    return None;
                };
                let tag = match self.policy.check(path) {
                    Visibility::Hidden => return None,
                    Visibility::Visible => None,
                    Visibility::Annotated(tag) => Some(tag),
                };
                Some(self.emit(node, tag))
            }
            NavLink::External { .. } => Some(self.emit(node, None)),
            NavLink::None {} => {
                let children = self.filter_all(&node.children);
                if children.is_empty() {
                    // A grouping entry is never independently visible.
                    return None;
                }
                Some(VisibleNode {
                    id: node.id.clone(),
                    title: node.title.clone(),
                    link: NavLink::None {},
                    tag: None,
                    children,
                })
            }
        }
    }

    fn emit(&self, node: &NavNode, tag: Option<P::Tag>) -> VisibleNode<P::Tag> {
        VisibleNode {
            id: node.id.clone(),
            title: node.title.clone(),
            link: node.link.clone(),
            tag,
            children: self.filter_all(&node.children),
        }
    }
}

/// Permission-driven visibility for an authenticated principal.
///
/// A page is visible when the principal can read its path; every surviving
/// page node is annotated with the full permission descriptor so the UI can
/// gate its edit and delete affordances.
pub struct PermissionPolicy<'a, G, A> {
    resolver: &'a PermissionResolver<'a, G, A>,
    principal: &'a Principal,
}

impl<'a, G, A> PermissionPolicy<'a, G, A> {
    pub fn new(resolver: &'a PermissionResolver<'a, G, A>, principal: &'a Principal) -> Self {
        Self {
            resolver,
            principal,
        }
    }
}

impl<G, A> VisibilityPolicy for PermissionPolicy<'_, G, A>
where
    G: GroupGrants,
    A: AclRules,
{
    type Tag = PermissionSummary;

    fn check(&self, path: &PagePath) -> Visibility<PermissionSummary> {
        let summary = self.resolver.resolve(self.principal, path);
        if summary.can_read {
            Visibility::Annotated(summary)
        } else {
            Visibility::Hidden
        }
    }
}

/// The root path an anonymous share exposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareScope {
    root: PagePath,
}

impl ShareScope {
    pub fn new(root: PagePath) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PagePath {
        &self.root
    }

    /// A path is inside the scope iff it equals the scope root or the scope
    /// root is a segment-wise prefix of it. Exact segment matching: scope
    /// `hr` does not contain `hr2/page`. A root scope contains everything.
    pub fn contains(&self, path: &PagePath) -> bool {
        self.root.is_prefix_of(path)
    }
}

/// Scope-containment visibility for anonymous share visitors.
pub struct ShareScopePolicy {
    scope: ShareScope,
}

impl ShareScopePolicy {
    pub fn new(scope: ShareScope) -> Self {
        Self { scope }
    }
}

impl VisibilityPolicy for ShareScopePolicy {
    type Tag = ();

    fn check(&self, path: &PagePath) -> Visibility<()> {
        if self.scope.contains(path) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PermissionPolicy, ShareScope, ShareScopePolicy, TreeFilter};
    use crate::index::PagePathIndex;
    use crate::path::PagePath;
    use crate::perm::PermissionMask;
    use crate::principal::Principal;
    use crate::resolver::PermissionResolver;
    use crate::rule::{AclRule, RuleSubject};
    use crate::test_utils::{MemFolder, MemGrants, MemPageTree, MemRules};
    use crate::tree::{NavLink, NavNode, VisibleNode};

    /// Storage layout used across these tests:
    ///
    /// ```text
    /// (root, page "home")
    /// ├── hr (page "hr-index")
    /// │   └── salary (page "salary-tables")
    /// └── finance
    ///     └── budget (page "budget-2026")
    /// ```
    fn index() -> PagePathIndex {
        let tree = MemFolder::new("en")
            .with_page("home")
            .with_children(vec![
                MemFolder::new("hr").with_page("hr-index").with_children(vec![
                    MemFolder::new("salary").with_page("salary-tables"),
                ]),
                MemFolder::new("finance").with_children(vec![
                    MemFolder::new("budget").with_page("budget-2026"),
                ]),
            ]);
        PagePathIndex::build(&MemPageTree, &tree).unwrap()
    }

    fn navigation() -> Vec<NavNode> {
        vec![
            NavNode::page("nav-home", "home").with_title("Home"),
            NavNode::page("nav-hr", "hr-index")
                .with_title("HR")
                .with_children(vec![NavNode::page("nav-salary", "salary-tables")]),
            NavNode::group("nav-finance")
                .with_title("Finance")
                .with_children(vec![NavNode::page("nav-budget", "budget-2026")]),
        ]
    }

    /// Strip annotations so a filtered tree can be filtered again.
    fn as_input<T>(nodes: &[VisibleNode<T>]) -> Vec<NavNode> {
        nodes
            .iter()
            .map(|node| NavNode {
                id: node.id.clone(),
                title: node.title.clone(),
                link: node.link.clone(),
                children: as_input(&node.children),
            })
            .collect()
    }

    #[test]
    fn prunes_unreadable_pages_and_empty_groups() {
        // bob can read everything except hr/salary and finance/budget.
        let mut grants = MemGrants::default();
        grants.grant("editors", PermissionMask::READ | PermissionMask::UPDATE);
        let mut rules = MemRules::default();
        rules.insert(
            PagePath::parse("hr/salary"),
            RuleSubject::User("bob"),
            AclRule {
                mask: PermissionMask::ALL,
                permissions: PermissionMask::empty(),
            },
        );
        rules.insert(
            PagePath::parse("finance/budget"),
            RuleSubject::Group("editors"),
            AclRule {
                mask: PermissionMask::ALL,
                permissions: PermissionMask::empty(),
            },
        );
        let resolver = PermissionResolver::new(&grants, &rules);
        let bob = Principal::new("bob", ["editors".to_string()]);
        let index = index();
        let filter = TreeFilter::new(&index, PermissionPolicy::new(&resolver, &bob));

        let visible = filter.filter_all(&navigation());

        // Salary is gone but HR stays, even with no surviving children; the
        // Finance group disappears with its only child.
        let ids: Vec<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["nav-home", "nav-hr"]);
        assert!(visible[1].children.is_empty());

        // Surviving page nodes carry their permission descriptor.
        let home = &visible[0];
        let permissions = home.tag.as_ref().unwrap();
        assert!(permissions.can_read);
        assert!(permissions.can_write);
        assert!(!permissions.can_delete);
    }

    #[test]
    fn external_links_always_survive() {
        let grants = MemGrants::default();
        let rules = MemRules::default();
        let resolver = PermissionResolver::new(&grants, &rules);
        // No grants at all: every page is unreadable.
        let visitor = Principal::new("zoe", []);
        let index = index();
        let filter = TreeFilter::new(&index, PermissionPolicy::new(&resolver, &visitor));

        let items = vec![
            NavNode::external("nav-ext", "https://status.example.org")
                .with_children(vec![NavNode::page("nav-hr", "hr-index")]),
            NavNode::page("nav-home", "home"),
        ];
        let visible = filter.filter_all(&items);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "nav-ext");
        assert!(visible[0].children.is_empty());
        assert!(visible[0].tag.is_none());
    }

    #[test]
    fn unresolvable_page_reference_is_hidden() {
        let mut grants = MemGrants::default();
        grants.grant("editors", PermissionMask::ALL);
        let rules = MemRules::default();
        let resolver = PermissionResolver::new(&grants, &rules);
        let bob = Principal::new("bob", ["editors".to_string()]);
        let index = index();
        let filter = TreeFilter::new(&index, PermissionPolicy::new(&resolver, &bob));

        let items = vec![NavNode::page("nav-orphan", "deleted-page")];
        assert!(filter.filter_all(&items).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut grants = MemGrants::default();
        grants.grant("editors", PermissionMask::READ);
        let mut rules = MemRules::default();
        rules.insert(
            PagePath::parse("hr"),
            RuleSubject::Group("editors"),
            AclRule {
                mask: PermissionMask::READ,
                permissions: PermissionMask::empty(),
            },
        );
        let resolver = PermissionResolver::new(&grants, &rules);
        let bob = Principal::new("bob", ["editors".to_string()]);
        let index = index();
        let filter = TreeFilter::new(&index, PermissionPolicy::new(&resolver, &bob));

        let once = filter.filter_all(&navigation());
        let twice = filter.filter_all(&as_input(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn share_scope_prunes_to_the_shared_subtree() {
        let index = index();
        let scope = ShareScope::new(PagePath::parse("hr"));
        let filter = TreeFilter::new(&index, ShareScopePolicy::new(scope));

        let visible = filter.filter_all(&navigation());

        // Only the HR subtree is inside the scope; home and finance are not.
        let ids: Vec<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["nav-hr"]);
        assert_eq!(visible[0].children.len(), 1);
        assert_eq!(visible[0].children[0].id, "nav-salary");
        assert!(visible[0].tag.is_none());
    }

    #[test]
    fn root_scope_exposes_everything() {
        let index = index();
        let filter = TreeFilter::new(
            &index,
            ShareScopePolicy::new(ShareScope::new(PagePath::root())),
        );

        let visible = filter.filter_all(&navigation());
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn share_scope_rejects_sibling_string_prefixes() {
        let tree = MemFolder::new("en").with_children(vec![
            MemFolder::new("hr").with_page("hr-index"),
            MemFolder::new("hr2").with_children(vec![
                MemFolder::new("page").with_page("hr2-page"),
            ]),
        ]);
        let index = PagePathIndex::build(&MemPageTree, &tree).unwrap();
        let scope = ShareScope::new(PagePath::parse("hr"));
        assert!(scope.contains(&PagePath::parse("hr")));
        assert!(!scope.contains(&PagePath::parse("hr2/page")));

        let filter = TreeFilter::new(&index, ShareScopePolicy::new(scope));
        let items = vec![
            NavNode::page("nav-hr", "hr-index"),
            NavNode::page("nav-hr2", "hr2-page"),
        ];
        let ids: Vec<String> = filter.filter_all(&items).into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["nav-hr"]);
    }

    #[test]
    fn share_scope_comparison_is_nfc_normalized() {
        // Scope parsed from a precomposed spelling, page path from a
        // decomposed one.
        let tree = MemFolder::new("en").with_children(vec![
            MemFolder::new("caf\u{65}\u{301}").with_page("menu"),
        ]);
        let index = PagePathIndex::build(&MemPageTree, &tree).unwrap();
        let scope = ShareScope::new(PagePath::parse("caf\u{e9}"));
        let filter = TreeFilter::new(&index, ShareScopePolicy::new(scope));

        let items = vec![NavNode::page("nav-menu", "menu")];
        assert_eq!(filter.filter_all(&items).len(), 1);
    }

    #[test]
    fn grouping_nodes_never_survive_empty() {
        let index = index();
        let filter = TreeFilter::new(
            &index,
            ShareScopePolicy::new(ShareScope::new(PagePath::parse("hr"))),
        );

        let items = vec![
            NavNode::group("nav-empty"),
            NavNode::group("nav-out-of-scope")
                .with_children(vec![NavNode::page("nav-budget", "budget-2026")]),
        ];
        assert!(filter.filter_all(&items).is_empty());
    }

    #[test]
    fn filtered_tree_serializes_for_the_ui() {
        let mut grants = MemGrants::default();
        grants.grant("editors", PermissionMask::ALL);
        let rules = MemRules::default();
        let resolver = PermissionResolver::new(&grants, &rules);
        let bob = Principal::new("bob", ["editors".to_string()]);
        let index = index();
        let filter = TreeFilter::new(&index, PermissionPolicy::new(&resolver, &bob));

        let visible = filter.filter(&NavNode::page("nav-home", "home")).unwrap();
        let value = serde_json::to_value(&visible).unwrap();
        assert_eq!(value["uniqueId"], "home");
        assert_eq!(value["permissions"]["isAdmin"], true);

        let node = match visible.link {
            NavLink::Page { ref page_id } => page_id.clone(),
            _ => unreachable!(),
        };
        assert_eq!(node, "home");
    }
}
