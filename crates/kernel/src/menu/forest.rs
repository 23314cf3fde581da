//! Forest assembly: turns the flat list of view menus into top-level groups.

use std::cmp::Reverse;

use tracing::debug;

use super::node::MenuNode;

/// Assemble view menu nodes into a sorted forest.
///
/// Nodes without a parent become top-level entries. Nodes with a parent are
/// appended to that parent's children, and the parent is promoted to the
/// top level the first time it is seen. Parents are identified by name, so
/// a group shared by several views yields a single top-level entry.
///
/// Top-level entries are sorted by descending weight; ties keep their
/// registration order. Children keep their registration order.
pub fn assemble_forest<I>(nodes: I) -> Vec<MenuNode>
where
    I: IntoIterator<Item = MenuNode>,
{
    let mut roots: Vec<MenuNode> = Vec::new();

    for node in nodes {
        match node.parent_menu.clone() {
            None => match roots.iter().position(|r| r.name == node.name) {
                // A group promoted earlier turns out to be a view of its own.
                Some(idx) => merge_into(&mut roots[idx], node),
                None => roots.push(node),
            },
            Some(parent) => {
                let idx = match roots.iter().position(|r| r.name == parent.name) {
                    Some(idx) => idx,
                    None => {
                        let mut promoted = parent.as_ref().clone();
                        promoted.parent_menu = None;
                        roots.push(promoted);
                        roots.len() - 1
                    }
                };
                push_unique(&mut roots[idx].sub_menus, node);
            }
        }
    }

    roots.sort_by_key(|m| Reverse(m.sort));

    debug!(top_level = roots.len(), "assembled menu forest");
    roots
}

fn push_unique(siblings: &mut Vec<MenuNode>, node: MenuNode) {
    if !siblings.iter().any(|s| s.same_entry(&node)) {
        siblings.push(node);
    }
}

fn merge_into(existing: &mut MenuNode, node: MenuNode) {
    let children = std::mem::take(&mut existing.sub_menus);
    *existing = node;
    for child in children {
        push_unique(&mut existing.sub_menus, child);
    }
}
