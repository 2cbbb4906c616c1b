//! The ownership-aware node wrapper.
//!
//! Exactly one wrapper is *responsible* for any engine node at a time:
//! either a detached wrapper whose `owned` flag is set, or (transitively)
//! the root wrapper of the tree the node is linked into. Non-owning
//! wrappers are cheap views; traversal creates them freshly on every walk.
//! Equality and hashing follow handle identity, never content, because two
//! wrappers must compare equal exactly when edits through one are visible
//! through the other.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::rc::Rc;

use markdown_arbor_engine as engine;

pub use markdown_arbor_engine::NodeType;

use crate::position::Position;

pub struct Node {
    handle: engine::NodeHandle,
    /// Whether this wrapper must free the engine node when dropped.
    owned: Cell<bool>,
    // Engine storage is thread-local; wrappers must not leave the thread
    // that created them.
    _confined: PhantomData<Rc<()>>,
}

impl Node {
    /// Wrap an existing engine node without taking ownership. `None` for a
    /// dead handle.
    pub(crate) fn acquire(handle: engine::NodeHandle) -> Option<Node> {
        engine::node_type(handle)?;
        Some(Node {
            handle,
            owned: Cell::new(false),
            _confined: PhantomData,
        })
    }

    /// Allocate a fresh detached engine node owned by the new wrapper.
    pub(crate) fn detached(node_type: NodeType) -> Node {
        Node {
            handle: engine::create(node_type),
            owned: Cell::new(true),
            _confined: PhantomData,
        }
    }

    pub(crate) fn handle(&self) -> engine::NodeHandle {
        self.handle
    }

    pub(crate) fn set_owned(&self, owned: bool) {
        self.owned.set(owned);
    }

    /// The node's type tag, or `None` once the underlying node has been
    /// freed (for example by dropping the document that owned it).
    pub fn kind(&self) -> Option<NodeType> {
        engine::node_type(self.handle)
    }

    /// Whether this wrapper is responsible for releasing the engine node.
    /// True for detached nodes; false while the node is linked into a tree.
    pub fn is_owned(&self) -> bool {
        self.owned.get()
    }

    /// The node's current parent. A derived engine query, not a stored
    /// reference; `None` for roots and detached nodes.
    pub fn parent(&self) -> Option<Node> {
        engine::parent_of(self.handle).and_then(Node::acquire)
    }

    /// Where this node started in the parsed source, if it came out of a
    /// parse.
    pub fn start(&self) -> Option<Position> {
        engine::extent(self.handle).map(|e| Position::new(e.start_line, e.start_column))
    }

    /// Where this node ended in the parsed source.
    pub fn end(&self) -> Option<Position> {
        engine::extent(self.handle).map(|e| Position::new(e.end_line, e.end_column))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("owned", &self.owned.get())
            .finish()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        if self.owned.get() {
            engine::free(self.handle);
        }
    }
}

/// Conversion between [`Node`] and the typed wrappers around it.
pub trait TypedNode: Sized {
    /// Wrap `node` if its engine type matches; hand it back otherwise
    /// implicitly by returning `None` (the node is dropped, which is safe
    /// because non-owning drops never free).
    fn from_node(node: Node) -> Option<Self>;
    fn as_node(&self) -> &Node;
    fn into_node(self) -> Node;
}

impl TypedNode for Node {
    fn from_node(node: Node) -> Option<Self> {
        Some(node)
    }

    fn as_node(&self) -> &Node {
        self
    }

    fn into_node(self) -> Node {
        self
    }
}

/// Declares a typed newtype over [`Node`] for one engine node type.
macro_rules! node_kind {
    ($(#[$meta:meta])* $name:ident => $tag:ident) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Hash)]
        pub struct $name($crate::tree::node::Node);

        impl $crate::tree::node::TypedNode for $name {
            fn from_node(node: $crate::tree::node::Node) -> Option<Self> {
                if node.kind() == Some($crate::tree::node::NodeType::$tag) {
                    Some($name(node))
                } else {
                    None
                }
            }

            fn as_node(&self) -> &$crate::tree::node::Node {
                &self.0
            }

            fn into_node(self) -> $crate::tree::node::Node {
                self.0
            }
        }

        impl From<$name> for $crate::tree::node::Node {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use node_kind;
