//! Decimal adjustment of the accumulator halves.
//!
//! AAA/AAS correct unpacked BCD in AX and report the decimal carry in AF and
//! CF. DAA/DAS correct packed BCD in AL and also set SF, ZF and PF. AAD/AAM
//! split or join base-10 digits and leave FLAG alone.

use super::alu::{self, Width};
use super::FlagsUpdate;
use crate::{ByteRegister, Cpu, Flag, Trap};

impl Cpu {
    const fn low_nibble_needs_adjust(&self) -> bool {
        (self.registers.read_byte(ByteRegister::Al) & 0x0F) > 9
            || self.registers.flag(Flag::AuxCarry)
    }

    fn ascii_adjust(&mut self, subtract: bool) {
        let mut al = self.registers.read_byte(ByteRegister::Al);
        let mut ah = self.registers.read_byte(ByteRegister::Ah);
        let adjust = self.low_nibble_needs_adjust();
        if adjust {
            if subtract {
                al = al.wrapping_sub(6);
                ah = ah.wrapping_sub(1);
            } else {
                let ax = u16::from_be_bytes([ah, al]).wrapping_add(0x0106);
                [ah, al] = ax.to_be_bytes();
            }
        }
        self.registers.write_byte(ByteRegister::Ah, ah);
        self.registers.write_byte(ByteRegister::Al, al & 0x0F);
        FlagsUpdate::NONE
            .with(Flag::AuxCarry, adjust)
            .with(Flag::Carry, adjust)
            .apply(&mut self.registers);
    }

    /// ASCII adjust after addition.
    #[must_use]
    pub fn aaa(&mut self) -> Trap {
        self.ascii_adjust(false);
        Trap::Ok
    }

    /// ASCII adjust after subtraction.
    #[must_use]
    pub fn aas(&mut self) -> Trap {
        self.ascii_adjust(true);
        Trap::Ok
    }

    /// `AL = AH * 10 + AL`, `AH = 0`. FLAG is untouched.
    #[must_use]
    pub fn aad(&mut self) -> Trap {
        let al = self.registers.read_byte(ByteRegister::Al);
        let ah = self.registers.read_byte(ByteRegister::Ah);
        let joined = ah.wrapping_mul(10).wrapping_add(al);
        self.registers.write_byte(ByteRegister::Al, joined);
        self.registers.write_byte(ByteRegister::Ah, 0);
        Trap::Ok
    }

    /// `AH = AL / 10`, `AL = AL % 10`. FLAG is untouched.
    #[must_use]
    pub fn aam(&mut self) -> Trap {
        let al = self.registers.read_byte(ByteRegister::Al);
        self.registers.write_byte(ByteRegister::Ah, al / 10);
        self.registers.write_byte(ByteRegister::Al, al % 10);
        Trap::Ok
    }

    fn decimal_adjust(&mut self, subtract: bool) {
        let original = self.registers.read_byte(ByteRegister::Al);
        let carry = self.registers.flag(Flag::Carry);
        let step = |al: u8, by: u8| {
            if subtract {
                al.wrapping_sub(by)
            } else {
                al.wrapping_add(by)
            }
        };

        let aux = self.low_nibble_needs_adjust();
        let mut al = original;
        // DAS keeps a borrow out of the low-digit step; DAA's CF comes only
        // from the high-digit test.
        let mut carry_out = subtract && aux && original < 0x06;
        if aux {
            al = step(al, 0x06);
        }
        let decimal_carry = original > 0x99 || carry;
        if decimal_carry {
            al = step(al, 0x60);
        }
        carry_out |= decimal_carry;

        self.registers.write_byte(ByteRegister::Al, al);
        alu::result_flags(u16::from(al), Width::Byte)
            .with(Flag::AuxCarry, aux)
            .with(Flag::Carry, carry_out)
            .apply(&mut self.registers);
    }

    /// Decimal adjust AL after a packed BCD addition.
    #[must_use]
    pub fn daa(&mut self) -> Trap {
        self.decimal_adjust(false);
        Trap::Ok
    }

    /// Decimal adjust AL after a packed BCD subtraction.
    #[must_use]
    pub fn das(&mut self) -> Trap {
        self.decimal_adjust(true);
        Trap::Ok
    }
}
