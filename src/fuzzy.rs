use std::cmp::Ordering;

use crate::mask::Mask;
use crate::node::NodeId;
use crate::symbol::{self, Symbol};
use crate::trie::{Trie, ROOT};

/// Orders keys by length alone, shortest first.
pub fn by_length<S: AsRef<str>>(a: &S, b: &S) -> Ordering {
    a.as_ref().len().cmp(&b.as_ref().len())
}

#[derive(Clone, Copy)]
struct Candidate {
    node: NodeId,
    // Index of the next pattern symbol still to be matched.
    next: usize,
}

impl<T> Trie<T> {
    /// Keys containing `pattern` as a subsequence, shortest first. Keys of
    /// equal length keep the order they were found in.
    ///
    /// An empty pattern matches every key; a pattern with characters outside
    /// the alphabet matches nothing.
    pub fn fuzzy_search(&self, pattern: &str) -> Vec<String> {
        let pattern = match symbol::symbols(pattern) {
            Ok(p) => p,
            Err(_) => return vec![],
        };
        let mut keys = if pattern.is_empty() {
            self.keys()
        } else {
            self.fuzzy_collect(&pattern)
        };
        keys.sort_by(by_length);
        keys
    }

    fn fuzzy_collect(&self, pattern: &[Symbol]) -> Vec<String> {
        let remaining = Mask::suffixes(pattern);
        let mut keys = vec![];

        let mut potential = vec![Candidate { node: ROOT, next: 0 }];
        while let Some(Candidate { node: id, mut next }) = potential.pop() {
            let node = self.node_at(id);
            // Nothing below can supply every symbol still needed. Passing
            // this check says nothing about order.
            if !node.mask.contains_all(remaining[next]) {
                continue;
            }

            if node.symbol == Some(pattern[next]) {
                next += 1;
                if next == pattern.len() {
                    keys.extend(self.collect_keys(id));
                    continue;
                }
            }

            potential.extend(node.children.values().map(|&child| Candidate { node: child, next }));
        }
        keys
    }
}
