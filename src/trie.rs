use std::io;

use crate::mask::Mask;
use crate::node::{Node, NodeId, NodeRef};
use crate::symbol::{self, Symbol};

pub(crate) const ROOT: NodeId = NodeId(0);

const DEBUG_MAX_INDENT: usize = 32;

/// Character trie with subsequence ("fuzzy") search.
///
/// Nodes live in an arena of slots; a node's `parent` is a slot index, and
/// each node owns the slots of its children. The root always sits in slot 0.
pub struct Trie<T> {
    pub(crate) nodes: Vec<Option<Node<T>>>,
    pub(crate) free: Vec<NodeId>,
    pub(crate) size: usize,
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Trie<T> {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates a trie whose arena has room for `nodes` nodes (root included)
    /// before reallocating.
    pub fn with_capacity(nodes: usize) -> Self {
        let mut slots = Vec::with_capacity(nodes.max(1));
        slots.push(Some(Node::root()));
        Self {
            nodes: slots,
            free: vec![],
            size: 0,
        }
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT.index()] = Some(Node::root());
        self.free.clear();
        self.size = 0;
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        let id = self.sentinel(key)?;
        self.node_at(id).payload.as_ref()
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        let id = self.sentinel(key)?;
        self.node_at_mut(id).payload.as_mut()
    }

    /// The terminal sentinel node for `key`.
    pub fn find_node(&self, key: &str) -> Option<NodeRef<'_, T>> {
        let id = self.sentinel(key)?;
        Some(NodeRef { trie: self, id })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sentinel(key).is_some()
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef { trie: self, id: ROOT }
    }

    /// Looks up a node by handle. Returns `None` if the slot has been freed.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        match self.nodes.get(id.index()) {
            Some(Some(_)) => Some(NodeRef { trie: self, id }),
            _ => None,
        }
    }

    pub(crate) fn node_at(&self, id: NodeId) -> &Node<T> {
        match self.nodes.get(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("Dangling node id: {:?}", id),
        }
    }

    pub(crate) fn node_at_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.nodes.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => panic!("Dangling node id: {:?}", id),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.nodes[id.index()].is_none());
                self.nodes[id.index()] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Creates a child of `parent` labelled `symbol` and ORs `mask` into both
    /// the child and the parent.
    pub(crate) fn new_child(&mut self, parent: NodeId, symbol: Symbol, mask: Mask) -> NodeId {
        let depth = self.node_at(parent).depth + 1;
        let id = self.alloc(Node::child(parent, depth, symbol, mask));
        let parent = self.node_at_mut(parent);
        parent.children.insert(symbol, id);
        parent.mask |= mask;
        id
    }

    /// Follows `symbols` down from the root.
    pub(crate) fn descend(&self, symbols: &[Symbol]) -> Option<NodeId> {
        symbols
            .iter()
            .try_fold(ROOT, |id, s| self.node_at(id).children.get(s).copied())
    }

    pub(crate) fn sentinel(&self, key: &str) -> Option<NodeId> {
        let symbols = symbol::symbols(key).ok()?;
        let end = self.descend(&symbols)?;
        self.node_at(end).children.get(&Symbol::TERMINAL).copied()
    }

    /// Rebuilds the key for a terminal sentinel by walking parent links up to
    /// (but excluding) the root.
    pub(crate) fn key_of(&self, sentinel: NodeId) -> String {
        let mut chars = Vec::with_capacity(self.node_at(sentinel).depth);
        let mut cur = self.node_at(sentinel).parent;
        while let Some(id) = cur {
            let node = self.node_at(id);
            if node.depth == 0 {
                break;
            }
            chars.extend(node.symbol.and_then(Symbol::to_char));
            cur = node.parent;
        }
        chars.iter().rev().collect()
    }

    /// Writes the tree to `out`, one node per line. Indentation stops growing
    /// past `DEBUG_MAX_INDENT` levels; the printed depth stays exact.
    pub fn debug(&self, out: &mut impl io::Write) -> io::Result<()> {
        writeln!(out, "Trie {{ keys: {}, slots: {}, free: {} }}", self.size, self.nodes.len(), self.free.len())?;
        self.debug_line(ROOT, out)?;

        let mut stack = vec![];
        self.push_debug_children(ROOT, &mut stack);
        while let Some((id, is_last)) = stack.pop() {
            let node = self.node_at(id);
            let pad = 2 * (node.depth - 1).min(DEBUG_MAX_INDENT);
            let branch = if is_last { '\u{2514}' } else { '\u{251C}' };
            let label = node.symbol.unwrap_or(Symbol::TERMINAL);
            write!(out, "{:pad$}{} {:?}: ", "", branch, label, pad = pad)?;
            self.debug_line(id, out)?;
            self.push_debug_children(id, &mut stack);
        }
        Ok(())
    }

    fn debug_line(&self, id: NodeId, out: &mut impl io::Write) -> io::Result<()> {
        let node = self.node_at(id);
        writeln!(
            out,
            "Node {{ id: {}, depth: {}, mask: {:?}, terminal: {:?} }}",
            id.index(),
            node.depth,
            node.mask,
            node.is_terminal(),
        )
    }

    // Pushed in reverse symbol order so children pop in ascending order.
    fn push_debug_children(&self, id: NodeId, stack: &mut Vec<(NodeId, bool)>) {
        let mut children = self.node_at(id).children.iter().collect::<Vec<_>>();
        children.sort();
        let last = children.len().saturating_sub(1);
        for (i, &(_, &child)) in children.iter().enumerate().rev() {
            stack.push((child, i == last));
        }
    }
}
