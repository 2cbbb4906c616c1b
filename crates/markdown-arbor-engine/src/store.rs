//! Canonical tree storage.
//!
//! Nodes live in a thread-local arena and are referenced by [`NodeHandle`],
//! an index paired with a generation counter. Freeing a node bumps the
//! generation of its slot, so a stale handle can never observe (or corrupt)
//! whatever node is allocated into that slot later; every operation on a
//! dead handle answers `None` or [`LinkStatus::Failed`].
//!
//! The arena is thread-local because a tree and everything reaching into it
//! is confined to one thread by contract. Handles sent across threads are
//! meaningless; the wrapper layer prevents that statically.

use std::cell::RefCell;

/// Reference to one node slot in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

/// Type tag of a tree node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeType {
    Document,
    BlockQuote,
    List,
    Item,
    CodeBlock,
    HtmlBlock,
    Paragraph,
    Heading,
    ThematicBreak,
    Text,
    SoftBreak,
    LineBreak,
    Code,
    HtmlInline,
    Emphasis,
    Strong,
    Link,
    Image,
}

impl NodeType {
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeType::Document
                | NodeType::BlockQuote
                | NodeType::List
                | NodeType::Item
                | NodeType::CodeBlock
                | NodeType::HtmlBlock
                | NodeType::Paragraph
                | NodeType::Heading
                | NodeType::ThematicBreak
        )
    }

    pub fn is_inline(self) -> bool {
        !self.is_block()
    }

    /// Whether nodes of this type carry a text literal.
    pub fn has_literal(self) -> bool {
        matches!(
            self,
            NodeType::CodeBlock
                | NodeType::HtmlBlock
                | NodeType::Text
                | NodeType::Code
                | NodeType::HtmlInline
        )
    }

    /// Whether nodes of this type may hold children at all.
    fn takes_children(self) -> bool {
        !matches!(
            self,
            NodeType::CodeBlock
                | NodeType::HtmlBlock
                | NodeType::ThematicBreak
                | NodeType::Text
                | NodeType::SoftBreak
                | NodeType::LineBreak
                | NodeType::Code
                | NodeType::HtmlInline
        )
    }
}

/// Type-level containment rules: leaves take no children, a document is
/// never a child, and items pair exclusively with lists.
fn can_contain(parent: NodeType, child: NodeType) -> bool {
    if !parent.takes_children() || child == NodeType::Document {
        return false;
    }
    match (parent, child) {
        (NodeType::List, child) => child == NodeType::Item,
        (_, NodeType::Item) => false,
        _ => true,
    }
}

/// Bullet vs. ordered list.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ListKind {
    #[default]
    Bullet,
    Ordered,
}

/// Outcome of a link operation. The set is closed: there is no third state
/// a caller could be handed.
#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LinkStatus {
    Succeeded,
    Failed,
}

impl LinkStatus {
    pub fn succeeded(self) -> bool {
        self == LinkStatus::Succeeded
    }
}

/// Source extent of a node, in one-based lines and columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Extent {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

#[derive(Debug)]
struct NodeData {
    node_type: NodeType,
    parent: Option<NodeHandle>,
    first_child: Option<NodeHandle>,
    last_child: Option<NodeHandle>,
    prev_sibling: Option<NodeHandle>,
    next_sibling: Option<NodeHandle>,
    literal: String,
    heading_level: u32,
    list_kind: ListKind,
    list_start: u64,
    list_tight: bool,
    fence_info: String,
    url: String,
    title: String,
    extent: Option<Extent>,
}

impl NodeData {
    fn new(node_type: NodeType) -> Self {
        NodeData {
            node_type,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            literal: String::new(),
            heading_level: 1,
            list_kind: ListKind::Bullet,
            list_start: 1,
            list_tight: true,
            fence_info: String::new(),
            url: String::new(),
            title: String::new(),
            extent: None,
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

#[derive(Debug, Default)]
struct Store {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
}

enum Edge {
    First,
    Last,
}

enum Side {
    Before,
    After,
}

impl Store {
    fn alloc(&mut self, node_type: NodeType) -> NodeHandle {
        match self.free_slots.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.data = Some(NodeData::new(node_type));
                NodeHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    data: Some(NodeData::new(node_type)),
                });
                NodeHandle {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn get(&self, handle: NodeHandle) -> Option<&NodeData> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Whether `node` appears on the parent chain above `cursor`.
    fn is_above(&self, node: NodeHandle, mut cursor: NodeHandle) -> bool {
        while let Some(data) = self.get(cursor) {
            match data.parent {
                Some(p) if p == node => return true,
                Some(p) => cursor = p,
                None => return false,
            }
        }
        false
    }

    /// Preconditions common to every link operation: both nodes alive, the
    /// child currently detached, the types compatible, and no cycle would
    /// form.
    fn can_link(&self, parent: NodeHandle, child: NodeHandle) -> bool {
        if parent == child {
            return false;
        }
        let Some(parent_data) = self.get(parent) else {
            return false;
        };
        let Some(child_data) = self.get(child) else {
            return false;
        };
        if child_data.parent.is_some() {
            return false;
        }
        if !can_contain(parent_data.node_type, child_data.node_type) {
            return false;
        }
        !self.is_above(child, parent)
    }

    fn link_child(&mut self, parent: NodeHandle, child: NodeHandle, edge: Edge) -> LinkStatus {
        if !self.can_link(parent, child) {
            return LinkStatus::Failed;
        }
        match edge {
            Edge::First => {
                let old_first = self.get(parent).and_then(|p| p.first_child);
                if let Some(first) = old_first
                    && let Some(data) = self.get_mut(first)
                {
                    data.prev_sibling = Some(child);
                }
                if let Some(data) = self.get_mut(child) {
                    data.parent = Some(parent);
                    data.prev_sibling = None;
                    data.next_sibling = old_first;
                }
                if let Some(data) = self.get_mut(parent) {
                    data.first_child = Some(child);
                    if data.last_child.is_none() {
                        data.last_child = Some(child);
                    }
                }
            }
            Edge::Last => {
                let old_last = self.get(parent).and_then(|p| p.last_child);
                if let Some(last) = old_last
                    && let Some(data) = self.get_mut(last)
                {
                    data.next_sibling = Some(child);
                }
                if let Some(data) = self.get_mut(child) {
                    data.parent = Some(parent);
                    data.prev_sibling = old_last;
                    data.next_sibling = None;
                }
                if let Some(data) = self.get_mut(parent) {
                    data.last_child = Some(child);
                    if data.first_child.is_none() {
                        data.first_child = Some(child);
                    }
                }
            }
        }
        LinkStatus::Succeeded
    }

    fn link_sibling(&mut self, sibling: NodeHandle, child: NodeHandle, side: Side) -> LinkStatus {
        let Some(parent) = self.get(sibling).and_then(|s| s.parent) else {
            // Roots and detached nodes have no siblings.
            return LinkStatus::Failed;
        };
        if !self.can_link(parent, child) {
            return LinkStatus::Failed;
        }
        match side {
            Side::Before => {
                let prev = self.get(sibling).and_then(|s| s.prev_sibling);
                if let Some(data) = self.get_mut(child) {
                    data.parent = Some(parent);
                    data.prev_sibling = prev;
                    data.next_sibling = Some(sibling);
                }
                if let Some(data) = self.get_mut(sibling) {
                    data.prev_sibling = Some(child);
                }
                match prev {
                    Some(p) => {
                        if let Some(data) = self.get_mut(p) {
                            data.next_sibling = Some(child);
                        }
                    }
                    None => {
                        if let Some(data) = self.get_mut(parent) {
                            data.first_child = Some(child);
                        }
                    }
                }
            }
            Side::After => {
                let next = self.get(sibling).and_then(|s| s.next_sibling);
                if let Some(data) = self.get_mut(child) {
                    data.parent = Some(parent);
                    data.prev_sibling = Some(sibling);
                    data.next_sibling = next;
                }
                if let Some(data) = self.get_mut(sibling) {
                    data.next_sibling = Some(child);
                }
                match next {
                    Some(n) => {
                        if let Some(data) = self.get_mut(n) {
                            data.prev_sibling = Some(child);
                        }
                    }
                    None => {
                        if let Some(data) = self.get_mut(parent) {
                            data.last_child = Some(child);
                        }
                    }
                }
            }
        }
        LinkStatus::Succeeded
    }

    /// Splice a node out of its parent's child list. No-op for roots.
    fn detach(&mut self, handle: NodeHandle) {
        let Some(data) = self.get(handle) else {
            return;
        };
        let Some(parent) = data.parent else {
            return;
        };
        let (prev, next) = (data.prev_sibling, data.next_sibling);
        match prev {
            Some(p) => {
                if let Some(d) = self.get_mut(p) {
                    d.next_sibling = next;
                }
            }
            None => {
                if let Some(d) = self.get_mut(parent) {
                    d.first_child = next;
                }
            }
        }
        match next {
            Some(n) => {
                if let Some(d) = self.get_mut(n) {
                    d.prev_sibling = prev;
                }
            }
            None => {
                if let Some(d) = self.get_mut(parent) {
                    d.last_child = prev;
                }
            }
        }
        if let Some(d) = self.get_mut(handle) {
            d.parent = None;
            d.prev_sibling = None;
            d.next_sibling = None;
        }
    }

    /// Release a detached node and every descendant.
    fn release_subtree(&mut self, root: NodeHandle) {
        let mut pending = vec![root];
        while let Some(handle) = pending.pop() {
            let Some(data) = self.get(handle) else {
                continue;
            };
            let mut child = data.first_child;
            while let Some(c) = child {
                child = self.get(c).and_then(|d| d.next_sibling);
                pending.push(c);
            }
            if let Some(slot) = self.slots.get_mut(handle.index as usize) {
                slot.data = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_slots.push(handle.index);
            }
        }
    }
}

thread_local! {
    static STORE: RefCell<Store> = RefCell::new(Store::default());
}

fn with<R>(f: impl FnOnce(&Store) -> R) -> R {
    STORE.with(|store| f(&store.borrow()))
}

fn with_mut<R>(f: impl FnOnce(&mut Store) -> R) -> R {
    STORE.with(|store| f(&mut store.borrow_mut()))
}

/// Allocate a new detached node.
pub fn create(node_type: NodeType) -> NodeHandle {
    with_mut(|store| store.alloc(node_type))
}

/// Type tag of a node, or `None` for a dead handle.
pub fn node_type(handle: NodeHandle) -> Option<NodeType> {
    with(|store| store.get(handle).map(|data| data.node_type))
}

pub fn first_child(handle: NodeHandle) -> Option<NodeHandle> {
    with(|store| store.get(handle).and_then(|data| data.first_child))
}

pub fn last_child(handle: NodeHandle) -> Option<NodeHandle> {
    with(|store| store.get(handle).and_then(|data| data.last_child))
}

pub fn next_sibling(handle: NodeHandle) -> Option<NodeHandle> {
    with(|store| store.get(handle).and_then(|data| data.next_sibling))
}

pub fn previous_sibling(handle: NodeHandle) -> Option<NodeHandle> {
    with(|store| store.get(handle).and_then(|data| data.prev_sibling))
}

pub fn parent_of(handle: NodeHandle) -> Option<NodeHandle> {
    with(|store| store.get(handle).and_then(|data| data.parent))
}

/// Link `child` as the first child of `parent`.
pub fn prepend_child(parent: NodeHandle, child: NodeHandle) -> LinkStatus {
    with_mut(|store| store.link_child(parent, child, Edge::First))
}

/// Link `child` as the last child of `parent`.
pub fn append_child(parent: NodeHandle, child: NodeHandle) -> LinkStatus {
    with_mut(|store| store.link_child(parent, child, Edge::Last))
}

/// Link `child` immediately before `sibling` under `sibling`'s parent.
pub fn insert_before(sibling: NodeHandle, child: NodeHandle) -> LinkStatus {
    with_mut(|store| store.link_sibling(sibling, child, Side::Before))
}

/// Link `child` immediately after `sibling` under `sibling`'s parent.
pub fn insert_after(sibling: NodeHandle, child: NodeHandle) -> LinkStatus {
    with_mut(|store| store.link_sibling(sibling, child, Side::After))
}

/// Detach a node from its parent, keeping it and its subtree alive.
pub fn unlink(handle: NodeHandle) {
    with_mut(|store| store.detach(handle));
}

/// Detach a node and release it together with its whole subtree.
pub fn free(handle: NodeHandle) {
    // try_with: wrappers may be dropped during thread teardown, after the
    // store itself has been destroyed.
    let _ = STORE.try_with(|store| {
        let mut store = store.borrow_mut();
        store.detach(handle);
        store.release_subtree(handle);
    });
}

/// Text literal of a literal-bearing node.
pub fn literal(handle: NodeHandle) -> Option<String> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type.has_literal())
            .map(|data| data.literal.clone())
    })
}

pub fn set_literal(handle: NodeHandle, literal: &str) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type.has_literal() => {
            data.literal = literal.to_owned();
            true
        }
        _ => false,
    })
}

pub(crate) fn push_literal(handle: NodeHandle, chunk: &str) {
    with_mut(|store| {
        if let Some(data) = store.get_mut(handle) {
            data.literal.push_str(chunk);
        }
    });
}

pub fn heading_level(handle: NodeHandle) -> Option<u32> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type == NodeType::Heading)
            .map(|data| data.heading_level)
    })
}

pub fn set_heading_level(handle: NodeHandle, level: u32) -> bool {
    if !(1..=6).contains(&level) {
        return false;
    }
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type == NodeType::Heading => {
            data.heading_level = level;
            true
        }
        _ => false,
    })
}

pub fn list_kind(handle: NodeHandle) -> Option<ListKind> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type == NodeType::List)
            .map(|data| data.list_kind)
    })
}

pub fn set_list_kind(handle: NodeHandle, kind: ListKind) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type == NodeType::List => {
            data.list_kind = kind;
            true
        }
        _ => false,
    })
}

/// Starting number of an ordered list.
pub fn list_start(handle: NodeHandle) -> Option<u64> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type == NodeType::List)
            .map(|data| data.list_start)
    })
}

pub fn set_list_start(handle: NodeHandle, start: u64) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type == NodeType::List => {
            data.list_start = start;
            true
        }
        _ => false,
    })
}

pub fn list_tight(handle: NodeHandle) -> Option<bool> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type == NodeType::List)
            .map(|data| data.list_tight)
    })
}

pub fn set_list_tight(handle: NodeHandle, tight: bool) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type == NodeType::List => {
            data.list_tight = tight;
            true
        }
        _ => false,
    })
}

/// Info string of a fenced code block (the text after the opening fence).
pub fn fence_info(handle: NodeHandle) -> Option<String> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| data.node_type == NodeType::CodeBlock)
            .map(|data| data.fence_info.clone())
    })
}

pub fn set_fence_info(handle: NodeHandle, info: &str) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if data.node_type == NodeType::CodeBlock => {
            data.fence_info = info.to_owned();
            true
        }
        _ => false,
    })
}

pub fn url(handle: NodeHandle) -> Option<String> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| matches!(data.node_type, NodeType::Link | NodeType::Image))
            .map(|data| data.url.clone())
    })
}

pub fn set_url(handle: NodeHandle, url: &str) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if matches!(data.node_type, NodeType::Link | NodeType::Image) => {
            data.url = url.to_owned();
            true
        }
        _ => false,
    })
}

pub fn title(handle: NodeHandle) -> Option<String> {
    with(|store| {
        store
            .get(handle)
            .filter(|data| matches!(data.node_type, NodeType::Link | NodeType::Image))
            .map(|data| data.title.clone())
    })
}

pub fn set_title(handle: NodeHandle, title: &str) -> bool {
    with_mut(|store| match store.get_mut(handle) {
        Some(data) if matches!(data.node_type, NodeType::Link | NodeType::Image) => {
            data.title = title.to_owned();
            true
        }
        _ => false,
    })
}

/// Source extent of a node, if it came out of a parse.
pub fn extent(handle: NodeHandle) -> Option<Extent> {
    with(|store| store.get(handle).and_then(|data| data.extent))
}

pub(crate) fn set_extent(handle: NodeHandle, extent: Extent) {
    with_mut(|store| {
        if let Some(data) = store.get_mut(handle) {
            data.extent = Some(extent);
        }
    });
}
