//! Conversion between tree-anchored carets and linear character offsets.
//!
//! Motions are computed over a surface's flat text, but the host's
//! selection lives on a node within the content tree. These walks map
//! between the two views. Both visit text leaves in depth-first document
//! order, the same order [`Surface::text`] concatenates them, so an offset
//! into `surface.text()` and a caret found here always agree.

use std::ops::ControlFlow;

use crate::traits::Surface;
use crate::types::Caret;

/// Where the surface's caret sits in its flat text, as a character offset.
///
/// Returns 0 when the surface has no caret or the caret's node is not one
/// of the surface's text leaves. A caret offset past its node's own text
/// clamps to that node's length.
pub fn to_linear_offset<S: Surface>(surface: &S) -> usize {
    let Some(caret) = surface.caret() else {
        return 0;
    };
    match offset_of(surface, &surface.root(), &caret, 0) {
        ControlFlow::Break(offset) => offset,
        ControlFlow::Continue(_) => 0,
    }
}

fn offset_of<S: Surface>(
    surface: &S,
    node: &S::Node,
    caret: &Caret<S::Node>,
    acc: usize,
) -> ControlFlow<usize, usize> {
    if let Some(text) = surface.node_text(node) {
        let len = text.chars().count();
        if *node == caret.node {
            return ControlFlow::Break(acc + caret.offset.min(len));
        }
        return ControlFlow::Continue(acc + len);
    }
    let mut acc = acc;
    for child in surface.children(node) {
        acc = offset_of(surface, &child, caret, acc)?;
    }
    ControlFlow::Continue(acc)
}

/// The tree anchor for a linear character offset into the surface's text.
///
/// The caret lands on the text leaf containing the offset. An offset on a
/// boundary between two leaves anchors at the start of the later leaf, so
/// `to_linear_offset` maps it straight back. Offsets beyond the text clamp
/// to the end of the last text leaf. A surface with no text leaves anchors
/// at the root with offset 0.
pub fn to_caret<S: Surface>(surface: &S, offset: usize) -> Caret<S::Node> {
    match locate(surface, &surface.root(), offset, (0, None)) {
        ControlFlow::Break(caret) => caret,
        ControlFlow::Continue((_, Some(last))) => last,
        ControlFlow::Continue((_, None)) => Caret { node: surface.root(), offset: 0 },
    }
}

type Locate<N> = ControlFlow<Caret<N>, (usize, Option<Caret<N>>)>;

fn locate<S: Surface>(
    surface: &S,
    node: &S::Node,
    offset: usize,
    state: (usize, Option<Caret<S::Node>>),
) -> Locate<S::Node> {
    if let Some(text) = surface.node_text(node) {
        let (acc, _) = state;
        let len = text.chars().count();
        if acc + len > offset {
            return ControlFlow::Break(Caret { node: node.clone(), offset: offset - acc });
        }
        return ControlFlow::Continue((acc + len, Some(Caret { node: node.clone(), offset: len })));
    }
    let mut state = state;
    for child in surface.children(node) {
        state = locate(surface, &child, offset, state)?;
    }
    ControlFlow::Continue(state)
}
