#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vim_overlay::traits::Surface;
use vim_overlay::types::{Caret, Command};

/// Declarative shape for building a mock content tree.
#[derive(Debug, Clone)]
pub enum Spec {
    Text(String),
    Element(Vec<Spec>),
}

pub fn text(s: &str) -> Spec {
    Spec::Text(s.to_string())
}

pub fn elem(children: Vec<Spec>) -> Spec {
    Spec::Element(children)
}

#[derive(Debug, Clone)]
enum MockNode {
    Element { children: Vec<usize> },
    Text(String),
}

#[derive(Debug)]
struct SurfaceState {
    nodes: Vec<MockNode>,
    caret: Option<Caret<usize>>,
}

/// In-memory surface: an arena of nodes with node 0 as the root element.
///
/// Cloning shares the state, like host element handles do, so the host
/// side of a test can move the caret and the engine sees it.
#[derive(Debug, Clone)]
pub struct MockSurface {
    inner: Rc<RefCell<SurfaceState>>,
}

impl PartialEq for MockSurface {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for MockSurface {}

impl MockSurface {
    pub fn new(children: Vec<Spec>) -> Self {
        let mut nodes = vec![MockNode::Element { children: Vec::new() }];
        let ids: Vec<usize> = children.into_iter().map(|c| Self::build(&mut nodes, c)).collect();
        nodes[0] = MockNode::Element { children: ids };
        Self { inner: Rc::new(RefCell::new(SurfaceState { nodes, caret: None })) }
    }

    /// A surface whose root holds a single text leaf.
    pub fn flat(text: &str) -> Self {
        Self::new(vec![Spec::Text(text.to_string())])
    }

    fn build(nodes: &mut Vec<MockNode>, spec: Spec) -> usize {
        match spec {
            Spec::Text(text) => {
                nodes.push(MockNode::Text(text));
                nodes.len() - 1
            }
            Spec::Element(children) => {
                let ids: Vec<usize> =
                    children.into_iter().map(|c| Self::build(nodes, c)).collect();
                nodes.push(MockNode::Element { children: ids });
                nodes.len() - 1
            }
        }
    }

    pub fn set_caret(&self, caret: Option<Caret<usize>>) {
        self.inner.borrow_mut().caret = caret;
    }

    /// Node id of the nth text leaf in document order.
    pub fn nth_leaf(&self, n: usize) -> usize {
        let state = self.inner.borrow();
        let mut seen = 0;
        let mut stack = vec![0usize];
        // depth-first, children pushed in reverse for document order
        while let Some(id) = stack.pop() {
            match &state.nodes[id] {
                MockNode::Text(_) => {
                    if seen == n {
                        return id;
                    }
                    seen += 1;
                }
                MockNode::Element { children } => {
                    for &child in children.iter().rev() {
                        stack.push(child);
                    }
                }
            }
        }
        panic!("no text leaf #{n}");
    }
}

impl Surface for MockSurface {
    type Node = usize;

    fn root(&self) -> usize {
        0
    }

    fn children(&self, node: &usize) -> Vec<usize> {
        match &self.inner.borrow().nodes[*node] {
            MockNode::Element { children } => children.clone(),
            MockNode::Text(_) => Vec::new(),
        }
    }

    fn node_text(&self, node: &usize) -> Option<String> {
        match &self.inner.borrow().nodes[*node] {
            MockNode::Text(text) => Some(text.clone()),
            MockNode::Element { .. } => None,
        }
    }

    fn caret(&self) -> Option<Caret<usize>> {
        self.inner.borrow().caret
    }
}

/// Applies engine commands the way a real host would, and checks the
/// subscription invariant while doing it.
pub struct MockHost {
    pub surfaces: Vec<MockSurface>,
    pub focused: Option<MockSurface>,
    pub listening: Vec<MockSurface>,
    pub indicator: Option<&'static str>,
}

impl MockHost {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            surfaces: lines.iter().map(|text| MockSurface::flat(text)).collect(),
            focused: None,
            listening: Vec::new(),
            indicator: None,
        }
    }

    pub fn apply(&mut self, commands: Vec<Command<MockSurface>>) {
        for command in commands {
            match command {
                Command::Focus(surface) => self.focused = Some(surface),
                Command::Listen(surface) => self.listening.push(surface),
                Command::Unlisten(surface) => self.listening.retain(|s| *s != surface),
                Command::SetCaret { surface, caret } => surface.set_caret(Some(caret)),
                Command::Indicator(label) => self.indicator = Some(label),
            }
            assert!(
                self.listening.len() <= 1,
                "more than one surface subscribed: {}",
                self.listening.len()
            );
        }
    }
}
