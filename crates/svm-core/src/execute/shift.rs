//! Word shifts and rotates.
//!
//! The count comes from an immediate or from CL and is masked to five bits.
//! A masked count of zero is a no-op for both the operand and FLAG. Shifts
//! write CF, OF, SF, ZF and PF; rotates write only CF and OF.

use super::alu::{self, Width};
use super::helpers::validate_destination;
use super::FlagsUpdate;
use crate::{ByteRegister, Cpu, FaultCode, Flag, Operand, Register, Trap};

const COUNT_MASK: u8 = 0x1F;
const SIGN: u16 = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShiftOp {
    Shl,
    Shr,
    Sar,
    Rol,
    Ror,
    Rcl,
    Rcr,
}

const fn msb(value: u16) -> bool {
    value & SIGN != 0
}

const fn bit(value: u16, index: u8) -> bool {
    (value >> index) & 1 != 0
}

/// Result and flag writes of one shift or rotate with an already-masked,
/// nonzero `count`.
fn evaluate(op: ShiftOp, value: u16, count: u8, carry_in: bool) -> (u16, FlagsUpdate) {
    let (result, carry, overflow) = match op {
        ShiftOp::Shl => {
            let result = if count < 16 { value << count } else { 0 };
            let carry = count <= 16 && bit(value, 16 - count);
            (result, carry, msb(result) ^ carry)
        }
        ShiftOp::Shr => {
            let result = if count < 16 { value >> count } else { 0 };
            let carry = count <= 16 && bit(value, count - 1);
            (result, carry, msb(value))
        }
        ShiftOp::Sar => {
            let fill = if msb(value) { 0xFFFF } else { 0x0000 };
            if count < 16 {
                let result = (value >> count) | (fill & !(0xFFFF >> count));
                (result, bit(value, count - 1), false)
            } else {
                (fill, msb(value), false)
            }
        }
        ShiftOp::Rol => {
            let result = value.rotate_left(u32::from(count % 16));
            let carry = bit(result, 0);
            (result, carry, msb(result) ^ carry)
        }
        ShiftOp::Ror => {
            let result = value.rotate_right(u32::from(count % 16));
            (result, msb(result), msb(result) ^ bit(result, 14))
        }
        ShiftOp::Rcl => {
            let (mut result, mut carry) = (value, carry_in);
            for _ in 0..count % 17 {
                let out = msb(result);
                result = (result << 1) | u16::from(carry);
                carry = out;
            }
            (result, carry, msb(result) ^ carry)
        }
        ShiftOp::Rcr => {
            let (mut result, mut carry) = (value, carry_in);
            for _ in 0..count % 17 {
                let out = bit(result, 0);
                result = (result >> 1) | if carry { SIGN } else { 0 };
                carry = out;
            }
            (result, carry, msb(result) ^ bit(result, 14))
        }
    };

    let flags = match op {
        ShiftOp::Shl | ShiftOp::Shr | ShiftOp::Sar => alu::result_flags(result, Width::Word),
        ShiftOp::Rol | ShiftOp::Ror | ShiftOp::Rcl | ShiftOp::Rcr => FlagsUpdate::NONE,
    };
    (
        result,
        flags
            .with(Flag::Carry, carry)
            .with(Flag::Overflow, overflow),
    )
}

impl Cpu {
    /// Resolves a shift count operand to its masked value.
    fn shift_count(&self, count: Operand) -> Result<u8, FaultCode> {
        let raw = match count {
            Operand::Immediate(value) => value.to_be_bytes()[1],
            Operand::Register(Register::Cx) => self.registers.read_byte(ByteRegister::Cl),
            Operand::Register(_) | Operand::Memory(_) => return Err(FaultCode::Illegal),
        };
        Ok(raw & COUNT_MASK)
    }

    fn shift(&mut self, op: ShiftOp, dst: Operand, count: Operand) -> Result<(), FaultCode> {
        validate_destination(dst)?;
        let count = self.shift_count(count)?;
        let value = self.load(dst)?;
        if count == 0 {
            return Ok(());
        }
        let (result, flags) = evaluate(op, value, count, self.registers.flag(Flag::Carry));
        self.store(dst, result)?;
        flags.apply(&mut self.registers);
        Ok(())
    }

    /// Shift left; CF is the last bit shifted out.
    #[must_use]
    pub fn shl(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Shl, dst, count).into()
    }

    /// Same operation as [`Cpu::shl`].
    #[must_use]
    pub fn sal(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Shl, dst, count).into()
    }

    /// Logical shift right; OF is the original sign bit.
    #[must_use]
    pub fn shr(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Shr, dst, count).into()
    }

    /// Arithmetic shift right; the sign bit is replicated and OF cleared.
    #[must_use]
    pub fn sar(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Sar, dst, count).into()
    }

    /// Rotate left.
    #[must_use]
    pub fn rol(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Rol, dst, count).into()
    }

    /// Rotate right.
    #[must_use]
    pub fn ror(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Ror, dst, count).into()
    }

    /// Rotate left through CF (17-bit rotate).
    #[must_use]
    pub fn rcl(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Rcl, dst, count).into()
    }

    /// Rotate right through CF (17-bit rotate).
    #[must_use]
    pub fn rcr(&mut self, dst: Operand, count: Operand) -> Trap {
        self.shift(ShiftOp::Rcr, dst, count).into()
    }
}
