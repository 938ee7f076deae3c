// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::PageId;
use crate::path::PagePath;
use crate::provider::{PageTreeSource, ProviderError};

/// Folder names reserved for media and resource sidecars; never page-bearing
/// and skipped while walking the page tree.
pub const RESERVED_FOLDERS: [&str; 4] = ["_media", "_resources", "images", ".nomedia"];

/// Map from declared page ids to their storage paths.
///
/// Built by walking the external page tree once, depth-first, from a root
/// scope (typically one language root). The index is valid for a single
/// filtering pass only: pages can be added or moved between requests, so
/// callers rebuild it instead of caching it.
#[derive(Clone, Debug, Default)]
pub struct PagePathIndex {
    entries: HashMap<PageId, PagePath>,
}

impl PagePathIndex {
    pub fn build<S>(source: &S, root: &S::Node) -> Result<Self, ProviderError>
    where
        S: PageTreeSource,
    {
        let mut entries = HashMap::new();
        walk(source, root, PagePath::root(), &mut entries)?;
        Ok(Self { entries })
    }

    /// Path of the page with the given id, relative to the root scope the
    /// index was built against.
    pub fn path_of(&self, page_id: &str) -> Option<&PagePath> {
        self.entries.get(page_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk<S>(
    source: &S,
    node: &S::Node,
    path: PagePath,
    entries: &mut HashMap<PageId, PagePath>,
) -> Result<(), ProviderError>
where
    S: PageTreeSource,
{
    if let Some(page_id) = source.declared_page_id(node) {
        match entries.entry(page_id) {
            Entry::Vacant(vacant) => {
                vacant.insert(path.clone());
            }
            Entry::Occupied(occupied) => {
                // Duplicate declared ids are a storage-layer data-quality
                // problem; the first page encountered wins.
                debug!(
                    "duplicate page id '{}' at '{}', keeping '{}'",
                    occupied.key(),
                    path,
                    occupied.get()
                );
            }
        }
    }

    for child in source.children(node)? {
        let name = source.folder_name(&child);
        if RESERVED_FOLDERS.contains(&name.as_str()) {
            continue;
        }
        walk(source, &child, path.join(&name), entries)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::PagePathIndex;
    use crate::path::PagePath;
    use crate::test_utils::{MemFolder, MemPageTree};

    fn sample_tree() -> MemFolder {
        MemFolder::new("en")
            .with_page("home")
            .with_children(vec![
                MemFolder::new("hr").with_page("hr-index").with_children(vec![
                    MemFolder::new("salary").with_page("salary-tables"),
                    MemFolder::new("_media"),
                    MemFolder::new("images"),
                ]),
                MemFolder::new("finance").with_children(vec![
                    MemFolder::new("budget").with_page("budget-2026"),
                ]),
                MemFolder::new("_resources"),
            ])
    }

    #[test]
    fn maps_declared_ids_to_paths() {
        let index = PagePathIndex::build(&MemPageTree, &sample_tree()).unwrap();

        assert_eq!(index.path_of("home"), Some(&PagePath::root()));
        assert_eq!(index.path_of("hr-index"), Some(&PagePath::parse("hr")));
        assert_eq!(
            index.path_of("salary-tables"),
            Some(&PagePath::parse("hr/salary"))
        );
        assert_eq!(
            index.path_of("budget-2026"),
            Some(&PagePath::parse("finance/budget"))
        );
        assert_eq!(index.path_of("missing"), None);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn reserved_folders_are_skipped() {
        let tree = MemFolder::new("en").with_children(vec![
            MemFolder::new("_media")
                .with_children(vec![MemFolder::new("sneaky").with_page("hidden-page")]),
            MemFolder::new("_resources")
                .with_children(vec![MemFolder::new("x").with_page("sidecar-page")]),
            MemFolder::new("images").with_page("gallery"),
            MemFolder::new(".nomedia").with_page("marker"),
        ]);
        let index = PagePathIndex::build(&MemPageTree, &tree).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn content_folder_named_files_is_indexed() {
        // "files" is ordinary content, not a sidecar name.
        let tree = MemFolder::new("en").with_children(vec![
            MemFolder::new("files").with_page("downloads"),
        ]);
        let index = PagePathIndex::build(&MemPageTree, &tree).unwrap();
        assert_eq!(index.path_of("downloads"), Some(&PagePath::parse("files")));
    }

    #[test]
    fn first_declared_id_wins() {
        let tree = MemFolder::new("en").with_children(vec![
            MemFolder::new("alpha").with_page("dup"),
            MemFolder::new("beta").with_page("dup"),
        ]);
        let index = PagePathIndex::build(&MemPageTree, &tree).unwrap();
        assert_eq!(index.path_of("dup"), Some(&PagePath::parse("alpha")));
        assert_eq!(index.len(), 1);
    }
}
