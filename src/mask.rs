use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::symbol::{Symbol, ALPHABET};

/// Set of alphabet symbols, one bit per symbol.
///
/// Used as a negative filter during fuzzy search: if a subtree's mask lacks a
/// symbol the pattern still needs, nothing below it can match.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Mask {
    bits: u64,
}

impl Mask {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn of(symbol: Symbol) -> Self {
        Self { bits: symbol.bit() }
    }

    pub fn from_symbols(symbols: &[Symbol]) -> Self {
        symbols.iter().fold(Mask::new(), |m, &s| m | Mask::of(s))
    }

    /// `out[i]` is the mask of `symbols[i..]`; the result has one extra
    /// trailing empty mask so `out[symbols.len()]` is valid.
    pub(crate) fn suffixes(symbols: &[Symbol]) -> Vec<Mask> {
        let mut out = vec![Mask::new(); symbols.len() + 1];
        for (i, &s) in symbols.iter().enumerate().rev() {
            out[i] = out[i + 1] | Mask::of(s);
        }
        out
    }

    pub fn bits(self) -> u64 {
        self.bits
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, ch: char) -> bool {
        match Symbol::from_char(ch) {
            Some(s) => self.bits & s.bit() != 0,
            None => false,
        }
    }

    pub fn contains_all(self, other: Mask) -> bool {
        self.bits & other.bits == other.bits
    }

    pub fn chars(self) -> impl Iterator<Item = char> {
        ALPHABET
            .iter()
            .enumerate()
            .filter(move |&(i, _)| self.bits & (1 << i) != 0)
            .map(|(_, &b)| b as char)
    }
}

impl BitOr for Mask {
    type Output = Mask;

    fn bitor(self, rhs: Mask) -> Mask {
        Mask { bits: self.bits | rhs.bits }
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Mask) {
        self.bits |= rhs.bits;
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mask({:?})", self.chars().collect::<String>())
    }
}
