//! Phase conductor sets for three-phase distribution elements.
//!
//! Elements are attached to some subset of the A, B, C conductors. A
//! [`PhaseSet`] is built with the bitwise-or operator, exactly like the
//! `phases = A|B|C` notation used in feeder models:
//!
//! ```
//! use gat_core::{Phase, PhaseSet};
//!
//! let ab = PhaseSet::A | PhaseSet::B;
//! assert!(ab.contains_all(PhaseSet::A | PhaseSet::B));
//! assert!(!ab.contains(Phase::C));
//!
//! let parsed: PhaseSet = "BCN".parse().unwrap();
//! assert_eq!(parsed, PhaseSet::B | PhaseSet::C);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

/// A single primary phase conductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// All phases in matrix order.
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    /// Row/column index of this phase in a 3×3 phase-frame matrix.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Phase::A => 0,
            Phase::B => 1,
            Phase::C => 2,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self.index()
    }

    pub const fn letter(self) -> char {
        match self {
            Phase::A => 'A',
            Phase::B => 'B',
            Phase::C => 'C',
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of primary phase conductors an element is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY: Self = Self(0);
    pub const A: Self = Self(1);
    pub const B: Self = Self(1 << 1);
    pub const C: Self = Self(1 << 2);
    pub const ABC: Self = Self(0b111);

    #[inline]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// True when `phase` is attached.
    #[inline]
    pub const fn contains(self, phase: Phase) -> bool {
        self.0 & phase.bit() != 0
    }

    /// True when every phase of `mask` is attached.
    #[inline]
    pub const fn contains_all(self, mask: PhaseSet) -> bool {
        self.0 & mask.0 == mask.0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Attached phases in A, B, C order.
    pub fn iter(self) -> impl Iterator<Item = Phase> {
        Phase::ALL.into_iter().filter(move |p| self.contains(*p))
    }

    /// The attached phase when exactly one is attached.
    pub fn single(self) -> Option<Phase> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }
}

impl From<Phase> for PhaseSet {
    fn from(phase: Phase) -> Self {
        Self(phase.bit())
    }
}

impl BitOr for PhaseSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Phase> for PhaseSet {
    type Output = Self;
    fn bitor(self, rhs: Phase) -> Self::Output {
        Self(self.0 | rhs.bit())
    }
}

impl BitOrAssign for PhaseSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PhaseSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl FromIterator<Phase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = Phase>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PhaseSet::EMPTY, |set, phase| set | phase)
    }
}

impl std::fmt::Display for PhaseSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        for phase in self.iter() {
            write!(f, "{}", phase)?;
        }
        Ok(())
    }
}

/// Parses phase strings such as `"ABCN"`, `"AS"` or `"B|C"`.
///
/// Neutral, split, delta and ground markers (`N`, `S`, `D`, `G`) are accepted
/// and ignored; they carry no primary conductor.
impl FromStr for PhaseSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = PhaseSet::EMPTY;
        for ch in s.chars() {
            match ch.to_ascii_uppercase() {
                'A' => set |= PhaseSet::A,
                'B' => set |= PhaseSet::B,
                'C' => set |= PhaseSet::C,
                'N' | 'S' | 'D' | 'G' | '|' | ' ' => {}
                other => return Err(format!("invalid phase '{}' in '{}'", other, s)),
            }
        }
        Ok(set)
    }
}

impl TryFrom<String> for PhaseSet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PhaseSet> for String {
    fn from(value: PhaseSet) -> Self {
        if value.is_empty() {
            String::new()
        } else {
            value.to_string()
        }
    }
}
