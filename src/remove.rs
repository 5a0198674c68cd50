// Removing a key means detaching the part of its path that no other key
// uses. Walking up from the key's sentinel, every node with a single child
// exists only for this key. The first ancestor with more than one child (or
// the root, if there is none) is where the path branches off, so we cut the
// edge into the dead branch there and free everything below it.
//
// ```
//        root                     root
//         | c                      | c
//         o                        o
//         | a                      | a
//         o       remove "cat"     o
//       t/ \r         ==>           \r
//       o   o                        o
//       |   |\                       |\
//       $   $ t                      $ t
//             |                        |
//             $                        $
// ```
//
// Masks above the cut may now contain symbols that only the dead branch had.
// Each node's mask is defined as its own bit plus its children's masks, so we
// rebuild it that way from the node that lost the child up to the root.

use tracing::trace;

use crate::node::NodeId;
use crate::trie::{Trie, ROOT};

impl<T> Trie<T> {
    /// Removes `key`, returning its payload, or `None` if it wasn't stored.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let sentinel = self.sentinel(key)?;
        let (parent, branch) = self.branch_point(sentinel)?;

        let payload = self.node_at_mut(sentinel).payload.take();
        let symbol = self.node_at(branch).symbol;
        if let Some(symbol) = symbol {
            self.node_at_mut(parent).children.remove(&symbol);
        }
        let freed = self.free_subtree(branch);
        self.recompute_masks(parent);
        self.size -= 1;

        trace!(key, freed, size = self.size, "removed key");
        payload
    }

    /// Finds the highest node that only the key ending at `sentinel` uses,
    /// returned with its parent.
    fn branch_point(&self, sentinel: NodeId) -> Option<(NodeId, NodeId)> {
        let mut branch = sentinel;
        loop {
            let parent = self.node_at(branch).parent?;
            if parent == ROOT || self.node_at(parent).children.len() > 1 {
                return Some((parent, branch));
            }
            branch = parent;
        }
    }

    /// Frees `id` and all its descendants, returning how many slots were
    /// released.
    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes[id.index()].take() {
                stack.extend(node.children.values().copied());
                self.free.push(id);
                freed += 1;
            }
        }
        freed
    }

    fn recompute_masks(&mut self, from: NodeId) {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let node = self.node_at(id);
            let mask = node
                .children
                .values()
                .fold(node.own_mask(), |m, &child| m | self.node_at(child).mask);
            let node = self.node_at_mut(id);
            node.mask = mask;
            cur = node.parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Trie;
    use std::collections::BTreeSet;

    fn keys(t: &Trie<i32>) -> BTreeSet<String> {
        t.keys().into_iter().collect()
    }

    fn strs(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_remove_leaf_keeps_sibling() {
        let mut t = Trie::new();
        t.add("cat", 1).unwrap();
        t.add("cart", 2).unwrap();

        assert_eq!(t.remove("cat"), Some(1));
        assert_eq!(t.find("cat"), None);
        assert_eq!(t.find("cart"), Some(&2));
        assert_eq!(t.len(), 1);
        assert_eq!(keys(&t), strs(&["cart"]));

        // Only "t" and its sentinel were freed.
        assert_eq!(t.free.len(), 2);
        let a = t.root().child('c').and_then(|c| c.child('a')).unwrap();
        assert_eq!(a.children().count(), 1);
        assert_eq!(a.mask().chars().collect::<String>(), "art");
    }

    #[test]
    fn test_remove_inner_key() {
        let mut t = Trie::new();
        t.add("a", 1).unwrap();
        t.add("ab", 2).unwrap();
        t.add("abc", 3).unwrap();

        assert_eq!(t.remove("ab"), Some(2));
        assert_eq!(keys(&t), strs(&["a", "abc"]));
        assert_eq!(t.find("ab"), None);
        assert_eq!(t.find("a"), Some(&1));
        assert_eq!(t.find("abc"), Some(&3));
        // Just the sentinel under "ab" goes away.
        assert_eq!(t.free.len(), 1);
    }

    #[test]
    fn test_remove_prefix_keeps_longer_key() {
        let mut t = Trie::new();
        t.add("car", 1).unwrap();
        t.add("cart", 2).unwrap();

        assert_eq!(t.remove("car"), Some(1));
        assert_eq!(t.find("cart"), Some(&2));
        assert_eq!(t.prefix_search("ca"), vec!["cart".to_string()]);
    }

    #[test]
    fn test_remove_last_key() {
        let mut t = Trie::new();
        t.add("dog", 1).unwrap();
        assert_eq!(t.remove("dog"), Some(1));
        assert!(t.is_empty());
        assert!(t.keys().is_empty());
        assert!(t.root().mask().is_empty());
        assert_eq!(t.root().children().count(), 0);
        assert_eq!(t.free.len(), 4);
    }

    #[test]
    fn test_remove_absent() {
        let mut t = Trie::new();
        t.add("cart", 1).unwrap();
        assert_eq!(t.remove("car"), None);
        assert_eq!(t.remove("carts"), None);
        assert_eq!(t.remove("dog"), None);
        assert_eq!(t.remove(""), None);
        assert_eq!(t.remove("CART"), None);
        assert_eq!(t.len(), 1);
        assert_eq!(t.find("cart"), Some(&1));
        assert!(t.free.is_empty());
    }

    #[test]
    fn test_remove_clears_stale_mask_bits() {
        let mut t = Trie::new();
        t.add("cat", 1).unwrap();
        t.add("cxz", 2).unwrap();
        assert_eq!(t.fuzzy_search("cz"), vec!["cxz".to_string()]);

        t.remove("cxz");
        let c = t.root().child('c').unwrap();
        assert_eq!(c.mask().chars().collect::<String>(), "act");
        assert_eq!(t.root().mask().chars().collect::<String>(), "act");
        assert!(t.fuzzy_search("cz").is_empty());
        assert_eq!(t.fuzzy_search("ct"), vec!["cat".to_string()]);
    }

    #[test]
    fn test_slots_reused() {
        let mut t = Trie::new();
        t.add("ab", 1).unwrap();
        t.add("ac", 2).unwrap();
        let slots = t.nodes.len();

        t.remove("ac");
        t.add("ad", 3).unwrap();
        assert_eq!(t.nodes.len(), slots);
        assert!(t.free.is_empty());
        assert_eq!(keys(&t), strs(&["ab", "ad"]));
    }

    #[test]
    fn test_readd_after_remove() {
        let mut t = Trie::new();
        for round in 0..3 {
            t.add("status", round).unwrap();
            t.add("stats", round).unwrap();
            assert_eq!(t.remove("status"), Some(round));
            assert_eq!(t.remove("stats"), Some(round));
            assert!(t.is_empty());
            assert!(t.root().mask().is_empty());
        }
    }
}
