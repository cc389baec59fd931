use std::fmt;

use crate::types::Caret;

/// Read-only view of one editable surface's content tree.
///
/// A surface is an editable region the host exposes: a rich-text field, a
/// code cell, a contenteditable region. Its content is a tree of nodes in
/// which some leaves carry text. The engine reads the tree through this
/// trait on every keystroke and never caches what it saw, so host-side
/// edits between keystrokes are always picked up.
///
/// Implementations are cheap handles (clone duplicates the handle, not the
/// content), mirroring how host toolkits hand out element references.
pub trait Surface: Clone {
    /// Handle to a node within this surface's content tree.
    type Node: Clone + Eq + fmt::Debug;

    /// The tree's root node.
    fn root(&self) -> Self::Node;

    /// Child nodes in document order. Empty for leaves.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// The node's own text, if it is a text-bearing leaf.
    ///
    /// Returns `None` for structural nodes; their text lives in descendant
    /// leaves.
    fn node_text(&self, node: &Self::Node) -> Option<String>;

    /// The host's current collapsed selection anchor in this surface, if
    /// the selection sits inside it.
    fn caret(&self) -> Option<Caret<Self::Node>>;

    /// The surface's full text: every text leaf concatenated in
    /// depth-first document order, no separators.
    fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &self.root(), &mut out);
        out
    }
}

fn collect_text<S: Surface>(surface: &S, node: &S::Node, out: &mut String) {
    match surface.node_text(node) {
        Some(text) => out.push_str(&text),
        None => {
            for child in surface.children(node) {
                collect_text(surface, &child, out);
            }
        }
    }
}
