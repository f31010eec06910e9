//! Name and label handles.
//!
//! Both are dense 32-bit indices: [`Name`] into the name arena, [`LabelIndex`]
//! into the defined-label table. Neither is ever reused.

use std::fmt;

use crate::NameError;

/// Handle to an entry in the name arena.
///
/// Comparing or hashing two names is an integer operation; the textual label
/// (if any) lives in the repository.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty, anonymous name. Always the first arena entry.
    pub const EMPTY: Name = Name(0);

    /// Create from raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Name for arena position `index`, if it fits in 32 bits.
    pub(crate) fn try_from_index(index: usize) -> Result<Self, NameError> {
        u32::try_from(index)
            .map(Name)
            .map_err(|_| NameError::ArenaOverflow { count: index })
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Position of a label in the defined-label table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LabelIndex(u32);

impl LabelIndex {
    /// Index of the empty label.
    pub const EMPTY: LabelIndex = LabelIndex(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn try_from_index(index: usize) -> Result<Self, NameError> {
        u32::try_from(index)
            .map(LabelIndex)
            .map_err(|_| NameError::ArenaOverflow { count: index })
    }
}

impl fmt::Debug for LabelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelIndex({})", self.0)
    }
}

#[cfg(test)]
mod tests;
