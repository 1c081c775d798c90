//! FLAGS update behaviors for different instruction classes.

use crate::{Flag, RegisterFile};

/// Pending change to the `FLAG` register.
///
/// Only bits inside `mask` are written; every other bit of `FLAG` is
/// preserved when the update is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FlagsUpdate {
    mask: u16,
    values: u16,
}

impl FlagsUpdate {
    /// Update that leaves `FLAG` untouched.
    pub const NONE: Self = Self { mask: 0, values: 0 };

    /// Records `flag` as set or cleared.
    #[must_use]
    pub const fn with(self, flag: Flag, enabled: bool) -> Self {
        let values = if enabled {
            self.values | flag.mask()
        } else {
            self.values & !flag.mask()
        };
        Self {
            mask: self.mask | flag.mask(),
            values,
        }
    }

    /// Drops `flag` from the update so its current value survives.
    #[must_use]
    pub const fn without(self, flag: Flag) -> Self {
        Self {
            mask: self.mask & !flag.mask(),
            values: self.values & !flag.mask(),
        }
    }

    /// Returns the recorded value of `flag`, or `None` when it is not updated.
    #[must_use]
    pub const fn get(self, flag: Flag) -> Option<bool> {
        if self.mask & flag.mask() == 0 {
            None
        } else {
            Some(self.values & flag.mask() != 0)
        }
    }

    /// Bits of `FLAG` this update writes.
    #[must_use]
    pub const fn mask(self) -> u16 {
        self.mask
    }

    /// Merges the update into `flags`.
    #[must_use]
    pub const fn merge_into(self, flags: u16) -> u16 {
        (flags & !self.mask) | (self.values & self.mask)
    }

    /// Writes the update into the register file.
    pub const fn apply(self, registers: &mut RegisterFile) {
        let merged = self.merge_into(registers.flags());
        registers.write(crate::Register::Flag, merged);
    }
}
