use thiserror::Error;

/// Why a key was refused by `Trie::add` or `Trie::insert`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,
    #[error("character {ch:?} at position {position} is not in the key alphabet")]
    InvalidCharacter { ch: char, position: usize },
}
