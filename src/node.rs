use hashbrown::HashMap;

use crate::mask::Mask;
use crate::symbol::Symbol;
use crate::trie::Trie;

/// Index of a node's slot in the trie's arena.
///
/// Handles are plain indices, not owners. Once the node is pruned by
/// `Trie::remove` its slot may be reused by a later `Trie::add`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

pub(crate) struct Node<T> {
    // `None` only for the root.
    pub symbol: Option<Symbol>,
    pub payload: Option<T>,
    pub mask: Mask,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: HashMap<Symbol, NodeId>,
}

impl<T> Node<T> {
    pub fn root() -> Self {
        Self {
            symbol: None,
            payload: None,
            mask: Mask::new(),
            depth: 0,
            parent: None,
            children: HashMap::new(),
        }
    }

    pub fn child(parent: NodeId, depth: usize, symbol: Symbol, mask: Mask) -> Self {
        Self {
            symbol: Some(symbol),
            payload: None,
            mask,
            depth,
            parent: Some(parent),
            children: HashMap::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.symbol.map_or(false, Symbol::is_terminal)
    }

    /// The bit this node contributes to its own mask.
    pub fn own_mask(&self) -> Mask {
        self.symbol.map_or(Mask::new(), Mask::of)
    }
}

/// Read-only view of a node, borrowed from its trie.
pub struct NodeRef<'a, T> {
    pub(crate) trie: &'a Trie<T>,
    pub(crate) id: NodeId,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            id: self.id,
        }
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    fn node(&self) -> &'a Node<T> {
        self.trie.node_at(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The character on the edge into this node. `None` for the root and for
    /// terminal sentinels.
    pub fn symbol(&self) -> Option<char> {
        self.node().symbol.and_then(Symbol::to_char)
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.node().is_terminal()
    }

    pub fn payload(&self) -> Option<&'a T> {
        self.node().payload.as_ref()
    }

    pub fn mask(&self) -> Mask {
        self.node().mask
    }

    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        let trie = self.trie;
        self.node().parent.map(|id| NodeRef { trie, id })
    }

    pub fn child(&self, ch: char) -> Option<NodeRef<'a, T>> {
        let trie = self.trie;
        let symbol = Symbol::from_char(ch)?;
        self.node().children.get(&symbol).map(|&id| NodeRef { trie, id })
    }

    /// Children with the character on their edge. The sentinel child, if
    /// any, comes with `None`.
    pub fn children(&self) -> impl Iterator<Item = (Option<char>, NodeRef<'a, T>)> + 'a {
        let trie = self.trie;
        self.node()
            .children
            .iter()
            .map(move |(&symbol, &id)| (symbol.to_char(), NodeRef { trie, id }))
    }

    /// The key ending at this node, if it is a terminal sentinel.
    pub fn key(&self) -> Option<String> {
        if self.is_terminal() {
            Some(self.trie.key_of(self.id))
        } else {
            None
        }
    }
}
