use std::fmt;

use crate::error::KeyError;

/// Every character a key may contain. The position of a character in this
/// table is its bit in a `Mask`, so the table must stay within 64 entries.
pub const ALPHABET: &[u8; 49] = b"abcdefghijklmnopqrstuvwxyz0123456789#&-_.[]\\`^{}|";

const NOT_IN_ALPHABET: u8 = u8::MAX;

const fn build_index() -> [u8; 128] {
    let mut table = [NOT_IN_ALPHABET; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static INDEX: [u8; 128] = build_index();

/// A validated key character, stored as its index into `ALPHABET`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Symbol(u8);

impl Symbol {
    /// Reserved symbol for the sentinel child that marks the end of a key.
    /// It has no character and no mask bit.
    pub const TERMINAL: Symbol = Symbol(NOT_IN_ALPHABET);

    pub fn from_char(ch: char) -> Option<Symbol> {
        if !ch.is_ascii() {
            return None;
        }
        match INDEX[ch as usize] {
            NOT_IN_ALPHABET => None,
            i => Some(Symbol(i)),
        }
    }

    pub fn to_char(self) -> Option<char> {
        ALPHABET.get(self.0 as usize).map(|&b| b as char)
    }

    pub fn is_terminal(self) -> bool {
        self == Symbol::TERMINAL
    }

    pub(crate) fn bit(self) -> u64 {
        if self.is_terminal() {
            0
        } else {
            1 << self.0
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_char() {
            Some(ch) => write!(f, "{:?}", ch),
            None => f.write_str("$"),
        }
    }
}

/// Converts `s` into symbols. The empty string is accepted, since it is a
/// valid prefix and pattern.
pub(crate) fn symbols(s: &str) -> Result<Vec<Symbol>, KeyError> {
    s.chars()
        .enumerate()
        .map(|(position, ch)| Symbol::from_char(ch).ok_or(KeyError::InvalidCharacter { ch, position }))
        .collect()
}

/// Like `symbols`, but for keys being stored, which must be non-empty.
pub(crate) fn key_symbols(key: &str) -> Result<Vec<Symbol>, KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    symbols(key)
}
