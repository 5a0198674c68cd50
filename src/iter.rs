use crate::node::NodeId;
use crate::symbol;
use crate::trie::{Trie, ROOT};

/// Depth-first walk over the terminal sentinels below a node. Uses an explicit
/// stack so deep keys can't overflow the call stack.
pub(crate) struct Terminals<'a, T> {
    trie: &'a Trie<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Terminals<'a, T> {
    pub(crate) fn new(trie: &'a Trie<T>, from: NodeId) -> Self {
        Self {
            trie,
            stack: vec![from],
        }
    }
}

impl<'a, T> Iterator for Terminals<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            let node = self.trie.node_at(id);
            self.stack.extend(node.children.values().copied());
            if node.is_terminal() {
                return Some(id);
            }
        }
        None
    }
}

/// Iterator over `(key, payload)` pairs, in no particular order.
pub struct Iter<'a, T> {
    terminals: Terminals<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (String, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.terminals.trie;
        for id in &mut self.terminals {
            if let Some(payload) = trie.node_at(id).payload.as_ref() {
                return Some((trie.key_of(id), payload));
            }
        }
        None
    }
}

impl<T> Trie<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            terminals: Terminals::new(self, ROOT),
        }
    }

    /// Every stored key.
    pub fn keys(&self) -> Vec<String> {
        self.prefix_search("")
    }

    /// Every stored key starting with `prefix`. Sibling order is unspecified.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        let node = symbol::symbols(prefix)
            .ok()
            .and_then(|symbols| self.descend(&symbols));
        match node {
            Some(id) => self.collect_keys(id),
            None => vec![],
        }
    }

    pub(crate) fn collect_keys(&self, from: NodeId) -> Vec<String> {
        Terminals::new(self, from).map(|id| self.key_of(id)).collect()
    }
}
