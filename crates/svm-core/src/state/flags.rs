/// Named single-bit flag inside the `FLAG` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Flag {
    /// Unsigned carry or borrow (`CF`).
    Carry = 0,
    /// Even parity of the low result byte (`PF`).
    Parity = 2,
    /// Carry or borrow out of bit 3 (`AF`).
    AuxCarry = 4,
    /// Result is zero (`ZF`).
    Zero = 6,
    /// Sign bit of the result (`SF`).
    Sign = 7,
    /// Single-step trap (`TF`).
    Trap = 8,
    /// Interrupt enable (`IF`).
    Interrupt = 9,
    /// String direction, set means decrement (`DF`).
    Direction = 10,
    /// Signed overflow (`OF`).
    Overflow = 11,
}

/// Mask of the flags copied by `LAHF` and restored by `SAHF`.
pub const FLAGS_LAHF_MASK: u16 = Flag::Carry.mask()
    | Flag::Parity.mask()
    | Flag::AuxCarry.mask()
    | Flag::Zero.mask()
    | Flag::Sign.mask();

impl Flag {
    /// Every defined flag in bit order.
    pub const ALL: [Self; 9] = [
        Self::Carry,
        Self::Parity,
        Self::AuxCarry,
        Self::Zero,
        Self::Sign,
        Self::Trap,
        Self::Interrupt,
        Self::Direction,
        Self::Overflow,
    ];

    /// Bit position inside `FLAG`.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this flag.
    #[must_use]
    pub const fn mask(self) -> u16 {
        1 << self.bit()
    }
}

#[cfg(test)]
mod tests {
    use super::{Flag, FLAGS_LAHF_MASK};

    #[test]
    fn bit_positions_match_architecture() {
        let bits: Vec<u8> = Flag::ALL.iter().map(|flag| flag.bit()).collect();
        assert_eq!(bits, vec![0, 2, 4, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn masks_are_disjoint() {
        let combined = Flag::ALL.iter().fold(0u16, |acc, flag| {
            assert_eq!(acc & flag.mask(), 0);
            acc | flag.mask()
        });
        assert_eq!(combined, 0x0FD5);
    }

    #[test]
    fn lahf_mask_covers_low_status_bits() {
        assert_eq!(FLAGS_LAHF_MASK, 0x00D5);
    }
}
