//! Tree table: expand/collapse state and flattening of hierarchical rows.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

/// Hierarchical rows shown by a tree table.
///
/// # Example
///
/// ```
/// use mero_lib::tree::TreeItem;
///
/// struct Folder {
///     path: String,
///     children: Vec<Folder>,
/// }
///
/// impl TreeItem for Folder {
///     fn id(&self) -> String { self.path.clone() }
///     fn children(&self) -> &[Self] { &self.children }
/// }
/// ```
pub trait TreeItem: Sized {
    /// Unique identifier, stable across re-renders.
    fn id(&self) -> String;

    /// Child rows, in display order.
    fn children(&self) -> &[Self];
}

/// A visible row of the flattened tree.
#[derive(Debug, PartialEq)]
pub struct FlatNode<'a, T> {
    /// The item itself.
    pub item: &'a T,
    /// Depth in tree (0 = root).
    pub depth: u16,
    /// Whether this node has children.
    pub has_children: bool,
    /// Whether this node is currently expanded.
    pub is_expanded: bool,
}

impl<T> Clone for FlatNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FlatNode<'_, T> {}

/// Expanded-node state of a tree table, by node ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeState {
    expanded: HashSet<String>,
}

impl TreeState {
    /// Create a state with every node collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, id: &str) -> bool {
        self.expanded.insert(id.to_string())
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    /// Flip a node. Returns the new expanded state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Expand every node that has children.
    pub fn expand_all<T: TreeItem>(&mut self, roots: &[T]) {
        for item in roots {
            if !item.children().is_empty() {
                self.expanded.insert(item.id());
                self.expand_all(item.children());
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Flatten the visible rows: roots, plus the children of expanded nodes,
    /// depth first.
    pub fn flatten<'a, T: TreeItem>(&self, roots: &'a [T]) -> Vec<FlatNode<'a, T>> {
        let mut out = Vec::new();
        self.collect_visible(roots, 0, &mut out);
        out
    }

    fn collect_visible<'a, T: TreeItem>(
        &self,
        items: &'a [T],
        depth: u16,
        out: &mut Vec<FlatNode<'a, T>>,
    ) {
        for item in items {
            let has_children = !item.children().is_empty();
            let is_expanded = has_children && self.expanded.contains(&item.id());

            out.push(FlatNode {
                item,
                depth,
                has_children,
                is_expanded,
            });

            if is_expanded {
                self.collect_visible(item.children(), depth + 1, out);
            }
        }
    }

    /// Flatten only the rows that match `predicate`, plus their ancestors.
    ///
    /// Ancestors of a match are shown expanded whatever their stored state,
    /// so every match is visible. Expanded state is not modified.
    pub fn flatten_matching<'a, T, P>(&self, roots: &'a [T], predicate: P) -> Vec<FlatNode<'a, T>>
    where
        T: TreeItem,
        P: Fn(&T) -> bool,
    {
        let mut out = Vec::new();
        collect_matching(roots, 0, &predicate, &mut out);
        out
    }
}

/// Push matching rows and their ancestors. Returns `true` if anything in
/// `items` (or below) matched.
fn collect_matching<'a, T, P>(
    items: &'a [T],
    depth: u16,
    predicate: &P,
    out: &mut Vec<FlatNode<'a, T>>,
) -> bool
where
    T: TreeItem,
    P: Fn(&T) -> bool,
{
    let mut any = false;
    for item in items {
        let slot = out.len();
        let self_match = predicate(item);
        let child_match = collect_matching(item.children(), depth + 1, predicate, out);

        if self_match || child_match {
            out.insert(
                slot,
                FlatNode {
                    item,
                    depth,
                    has_children: !item.children().is_empty(),
                    is_expanded: child_match,
                },
            );
            any = true;
        }
    }
    any
}
