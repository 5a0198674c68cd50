//! An ordered character trie with prefix and subsequence ("fuzzy") search,
//! meant for autocompleting short names such as commands, nicknames and
//! channels.
//!
//! Every node keeps a bitmask of the symbols that appear anywhere below it.
//! Fuzzy search uses it to skip subtrees that can't contain the rest of the
//! pattern, then checks the actual order symbol by symbol.
//!
//! Keys are restricted to the alphabet in [`ALPHABET`] so that a symbol set
//! fits in one `u64`.
//!
//! ```
//! use fuzzytrie::Trie;
//!
//! let mut t = Trie::new();
//! t.add("cat", 1).unwrap();
//! t.add("cart", 2).unwrap();
//! t.add("cot", 3).unwrap();
//!
//! assert_eq!(t.find("cart"), Some(&2));
//! assert_eq!(t.prefix_search("car"), vec!["cart".to_string()]);
//! assert_eq!(t.fuzzy_search("ct").last().map(|k| k.as_str()), Some("cart"));
//! ```

mod error;
mod fuzzy;
mod insert;
mod iter;
mod mask;
mod node;
mod remove;
mod symbol;
mod trie;


pub use error::KeyError;
pub use fuzzy::by_length;
pub use iter::Iter;
pub use mask::Mask;
pub use node::{NodeId, NodeRef};
pub use symbol::{Symbol, ALPHABET};
pub use trie::Trie;
