//! The generic container capability: ordered-children operations shared by
//! every node kind that may hold children, parameterized by the kind of
//! child it accepts.
//!
//! Structural edits mutate the engine's linked tree and the wrapper-side
//! ownership flag in lockstep: a successfully linked child is owned by the
//! tree from then on, a removed child is owned by the caller's wrapper
//! again. Link failures are routine outcomes (the engine refuses, for
//! example, to relink an already-linked node) and are reported as `false`
//! rather than as errors.

use std::marker::PhantomData;

use markdown_arbor_engine as engine;
use markdown_arbor_engine::LinkStatus;

use crate::document::Document;
use crate::tree::blocks::{Block, BlockQuote, Heading, Item, List, Paragraph};
use crate::tree::inlines::{Emphasis, Image, Inline, Link, Strong};
use crate::tree::node::{Node, TypedNode};

/// Ordered-children operations for container node kinds.
pub trait Container: TypedNode {
    /// The category of child this container accepts. Children of any other
    /// kind are invisible through the typed view.
    type Child: TypedNode;

    /// The container's children, in order. Lazy and restartable: each call
    /// walks the engine's sibling links afresh, wrapping every child anew.
    fn children(&self) -> Children<Self::Child> {
        Children {
            next: engine::first_child(self.as_node().handle()),
            _typed: PhantomData,
        }
    }

    /// Replace the full child list.
    ///
    /// Every current child is removed first and handed back detached; the
    /// new children are then appended in order. Not atomic: if an append
    /// fails partway through, the children appended so far stay in place
    /// and the failed node is released with its wrapper. Callers that need
    /// all-or-nothing behavior should link into a scratch container first.
    fn set_children<I>(&self, new_children: I) -> Vec<Self::Child>
    where
        I: IntoIterator<Item = Self::Child>,
    {
        let removed: Vec<Self::Child> = self.children().collect();
        for child in &removed {
            self.remove(child);
        }
        for child in new_children {
            self.append(&child);
        }
        removed
    }

    /// Link `child` as the first child. Returns `false` if the engine
    /// refuses, e.g. because `child` is already linked elsewhere.
    fn prepend(&self, child: &Self::Child) -> bool {
        linked(
            child.as_node(),
            engine::prepend_child(self.as_node().handle(), child.as_node().handle()),
        )
    }

    /// Link `child` as the last child. Returns `false` if the engine
    /// refuses, e.g. because `child` is already linked elsewhere.
    fn append(&self, child: &Self::Child) -> bool {
        linked(
            child.as_node(),
            engine::append_child(self.as_node().handle(), child.as_node().handle()),
        )
    }

    /// Link `child` immediately before `sibling`. The sibling relationship
    /// is validated by the engine, not here.
    fn insert_before(&self, child: &Self::Child, sibling: &Self::Child) -> bool {
        linked(
            child.as_node(),
            engine::insert_before(sibling.as_node().handle(), child.as_node().handle()),
        )
    }

    /// Link `child` immediately after `sibling`. The sibling relationship
    /// is validated by the engine, not here.
    fn insert_after(&self, child: &Self::Child, sibling: &Self::Child) -> bool {
        linked(
            child.as_node(),
            engine::insert_after(sibling.as_node().handle(), child.as_node().handle()),
        )
    }

    /// Unlink `child` from this container. Fails without touching the
    /// engine unless `child`'s current parent is this very container. On
    /// success the caller's wrapper owns the now-detached node again.
    fn remove(&self, child: &Self::Child) -> bool {
        let node = child.as_node();
        match node.parent() {
            Some(ref parent) if parent == self.as_node() => {}
            _ => return false,
        }
        engine::unlink(node.handle());
        node.set_owned(true);
        true
    }
}

/// On success the tree takes ownership of the child; the caller's wrapper
/// becomes a plain view. The status set is closed by construction, so
/// there is no malformed third outcome to guard against.
fn linked(child: &Node, status: LinkStatus) -> bool {
    match status {
        LinkStatus::Succeeded => {
            child.set_owned(false);
            true
        }
        LinkStatus::Failed => false,
    }
}

/// Iterator over a container's typed children. Children whose engine type
/// does not match the container's declared category are silently skipped,
/// which keeps the typed view total even over malformed trees.
pub struct Children<T: TypedNode> {
    next: Option<engine::NodeHandle>,
    _typed: PhantomData<T>,
}

impl<T: TypedNode> Iterator for Children<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while let Some(handle) = self.next {
            self.next = engine::next_sibling(handle);
            if let Some(node) = Node::acquire(handle)
                && let Some(typed) = T::from_node(node)
            {
                return Some(typed);
            }
        }
        None
    }
}

impl Container for Document {
    type Child = Block;
}

impl Container for BlockQuote {
    type Child = Block;
}

impl Container for Heading {
    type Child = Inline;
}

impl Container for Paragraph {
    type Child = Inline;
}

impl Container for Emphasis {
    type Child = Inline;
}

impl Container for Strong {
    type Child = Inline;
}

impl Container for Link {
    type Child = Inline;
}

impl Container for Image {
    type Child = Inline;
}

impl Container for List {
    type Child = Item;
}

// List items hold anything: block content in loose lists, bare inlines in
// tight ones.
impl Container for Item {
    type Child = Node;
}
