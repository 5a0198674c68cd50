use tracing::{debug, trace};

use crate::error::KeyError;
use crate::mask::Mask;
use crate::node::NodeId;
use crate::symbol::{self, Symbol};
use crate::trie::{Trie, ROOT};

impl<T> Trie<T> {
    /// Stores `payload` under `key`, overwriting any payload already there,
    /// and returns the key's terminal sentinel.
    pub fn add(&mut self, key: &str, payload: T) -> Result<NodeId, KeyError> {
        let symbols = validate(key)?;
        let (id, _) = self.add_symbols(key, &symbols, payload);
        Ok(id)
    }

    /// Like `add`, but hands back the payload that was replaced, if any.
    pub fn insert(&mut self, key: &str, payload: T) -> Result<Option<T>, KeyError> {
        let symbols = validate(key)?;
        let (_, old) = self.add_symbols(key, &symbols, payload);
        Ok(old)
    }

    // Each node on the path gets the mask of the key's suffix starting at its
    // own symbol, so the root sees the whole key:
    // ```
    //   root  mask |= {c,a,r,t}
    //    | c  mask |= {c,a,r,t}
    //    | a  mask |= {a,r,t}
    //    | r  mask |= {r,t}
    //    | t  mask |= {t}
    //    $    payload
    // ```
    fn add_symbols(&mut self, key: &str, symbols: &[Symbol], payload: T) -> (NodeId, Option<T>) {
        let suffixes = Mask::suffixes(symbols);

        let mut cur = ROOT;
        self.node_at_mut(cur).mask |= suffixes[0];
        for (i, &symbol) in symbols.iter().enumerate() {
            let existing = self.node_at(cur).children.get(&symbol).copied();
            cur = match existing {
                Some(child) => {
                    self.node_at_mut(child).mask |= suffixes[i];
                    child
                }
                None => self.new_child(cur, symbol, suffixes[i]),
            };
        }

        let existing = self.node_at(cur).children.get(&Symbol::TERMINAL).copied();
        match existing {
            Some(sentinel) => {
                let old = self.node_at_mut(sentinel).payload.replace(payload);
                trace!(key, "overwrote payload");
                (sentinel, old)
            }
            None => {
                let sentinel = self.new_child(cur, Symbol::TERMINAL, Mask::new());
                self.node_at_mut(sentinel).payload = Some(payload);
                self.size += 1;
                trace!(key, size = self.size, "added key");
                (sentinel, None)
            }
        }
    }
}

fn validate(key: &str) -> Result<Vec<Symbol>, KeyError> {
    symbol::key_symbols(key).map_err(|err| {
        debug!(key, %err, "rejected key");
        err
    })
}

#[cfg(test)]
mod tests {
    use crate::error::KeyError;
    use crate::Trie;

    #[test]
    fn test_add_masks() {
        let mut t = Trie::new();
        t.add("cart", ()).unwrap();
        t.add("dog", ()).unwrap();

        let mask = |path: &str| {
            let mut n = t.root();
            for ch in path.chars() {
                n = n.child(ch).unwrap();
            }
            n.mask().chars().collect::<String>()
        };
        assert_eq!(mask(""), "acdgort");
        assert_eq!(mask("c"), "acrt");
        assert_eq!(mask("ca"), "art");
        assert_eq!(mask("car"), "rt");
        assert_eq!(mask("cart"), "t");
        assert_eq!(mask("do"), "go");
    }

    #[test]
    fn test_overwrite() {
        let mut t = Trie::new();
        let first = t.add("part", 1).unwrap();
        let second = t.add("part", 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(t.len(), 1);
        assert_eq!(t.find("part"), Some(&2));

        assert_eq!(t.insert("part", 3), Ok(Some(2)));
        assert_eq!(t.insert("parted", 4), Ok(None));
        assert_eq!(t.len(), 2);
        assert_eq!(t.find("part"), Some(&3));
    }

    #[test]
    fn test_prefix_keys_coexist() {
        let mut t = Trie::new();
        t.add("car", 1).unwrap();
        t.add("ca", 2).unwrap();
        t.add("cart", 3).unwrap();
        assert_eq!(t.find("ca"), Some(&2));
        assert_eq!(t.find("car"), Some(&1));
        assert_eq!(t.find("cart"), Some(&3));
        assert_eq!(t.find("c"), None);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_rejected_keys_leave_trie_untouched() {
        let mut t = Trie::new();
        t.add("ab", 0).unwrap();
        let slots = t.nodes.len();
        let mask = t.root().mask();

        assert_eq!(t.add("", 1), Err(KeyError::Empty));
        assert_eq!(
            t.add("abZ", 1),
            Err(KeyError::InvalidCharacter { ch: 'Z', position: 2 })
        );
        assert_eq!(
            t.insert("x y", 1),
            Err(KeyError::InvalidCharacter { ch: ' ', position: 1 })
        );
        assert_eq!(t.nodes.len(), slots);
        assert_eq!(t.root().mask(), mask);
        assert_eq!(t.len(), 1);
        assert_eq!(t.keys(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_channel_names() {
        let mut t = Trie::new();
        t.add("#rust", "channel").unwrap();
        t.add("#rust-beginners", "channel").unwrap();
        t.add("join", "command").unwrap();
        assert_eq!(t.find("#rust"), Some(&"channel"));
        assert!(t.root().mask().contains('#'));
        assert!(t.root().mask().contains('-'));
    }
}
