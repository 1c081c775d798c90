//! Shared arithmetic and flag computation.
//!
//! Every flag-affecting instruction funnels through [`compute`] (add/sub
//! family) or [`logic_flags`] (bitwise family), so carry, overflow, auxiliary
//! carry and parity have one definition for both operand widths.

use super::FlagsUpdate;
use crate::Flag;

/// Arithmetic direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// `destination + source + carry_in`.
    Add,
    /// `destination - (source + carry_in)`.
    Sub,
}

/// Operand width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8-bit operands.
    Byte,
    /// 16-bit operands.
    Word,
}

impl Width {
    /// Mask of the bits that belong to this width.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Byte => 0x00FF,
            Self::Word => 0xFFFF,
        }
    }

    /// Most significant bit of this width.
    #[must_use]
    pub const fn sign_bit(self) -> u32 {
        match self {
            Self::Byte => 0x0080,
            Self::Word => 0x8000,
        }
    }
}

/// Truncated result and the flags it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AluOutput {
    /// Result truncated to the operation width.
    pub value: u16,
    /// CF, PF, AF, ZF, SF and OF.
    pub flags: FlagsUpdate,
}

/// Even parity of the low byte (`true` when the count of set bits is even).
#[must_use]
pub const fn parity(value: u16) -> bool {
    (value & 0x00FF).count_ones() % 2 == 0
}

/// Computes an add or subtract with carry-in at the given width.
#[must_use]
pub const fn compute(op: ArithOp, dst: u16, src: u16, carry_in: bool, width: Width) -> AluOutput {
    let mask = width.mask();
    let sign = width.sign_bit();
    let d = dst as u32 & mask;
    let s = src as u32 & mask;
    let c = carry_in as u32;

    let (raw, carry, aux, overflow_bits) = match op {
        ArithOp::Add => {
            let raw = d + s + c;
            let result = raw & mask;
            let aux = (d & 0xF) + (s & 0xF) + c > 0xF;
            (raw, raw > mask, aux, (d ^ result) & (s ^ result))
        }
        ArithOp::Sub => {
            let raw = d.wrapping_sub(s + c);
            let result = raw & mask;
            let aux = (d ^ s ^ result) & 0x10 != 0;
            (raw, d < s + c, aux, (d ^ s) & (d ^ result))
        }
    };

    let result = raw & mask;
    let flags = FlagsUpdate::NONE
        .with(Flag::Carry, carry)
        .with(Flag::Parity, parity(result as u16))
        .with(Flag::AuxCarry, aux)
        .with(Flag::Zero, result == 0)
        .with(Flag::Sign, result & sign != 0)
        .with(Flag::Overflow, overflow_bits & sign != 0);

    AluOutput {
        value: result as u16,
        flags,
    }
}

/// Flag policy for AND, OR, XOR and TEST.
///
/// CF and OF are cleared, SF/ZF/PF follow the result, AF is not written.
#[must_use]
pub const fn logic_flags(result: u16, width: Width) -> FlagsUpdate {
    let value = result as u32 & width.mask();
    FlagsUpdate::NONE
        .with(Flag::Carry, false)
        .with(Flag::Overflow, false)
        .with(Flag::Sign, value & width.sign_bit() != 0)
        .with(Flag::Zero, value == 0)
        .with(Flag::Parity, parity(value as u16))
}

/// SF, ZF and PF for a result, leaving every other flag alone.
#[must_use]
pub const fn result_flags(result: u16, width: Width) -> FlagsUpdate {
    let value = result as u32 & width.mask();
    FlagsUpdate::NONE
        .with(Flag::Sign, value & width.sign_bit() != 0)
        .with(Flag::Zero, value == 0)
        .with(Flag::Parity, parity(value as u16))
}
