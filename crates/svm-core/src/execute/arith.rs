//! ADD/ADC/SUB/SBB/CMP, INC/DEC and the complement forms NEG/NOT.

use super::alu::{self, ArithOp, Width};
use super::helpers::{validate_destination, validate_shape};
use crate::{Cpu, FaultCode, Flag, Operand, Trap};

impl Cpu {
    /// Add/sub through the ALU; operands read, destination written, then FLAG.
    fn arithmetic(
        &mut self,
        op: ArithOp,
        dst: Operand,
        src: Operand,
        carry_in: bool,
        write_back: bool,
    ) -> Result<(), FaultCode> {
        validate_shape(dst, src)?;
        let lhs = self.load(dst)?;
        let rhs = self.load(src)?;
        let out = alu::compute(op, lhs, rhs, carry_in, Width::Word);
        if write_back {
            self.store(dst, out.value)?;
        }
        out.flags.apply(&mut self.registers);
        Ok(())
    }

    /// `dst += src`.
    #[must_use]
    pub fn add(&mut self, dst: Operand, src: Operand) -> Trap {
        self.arithmetic(ArithOp::Add, dst, src, false, true).into()
    }

    /// `dst += src + CF`.
    #[must_use]
    pub fn adc(&mut self, dst: Operand, src: Operand) -> Trap {
        let carry = self.registers.flag(Flag::Carry);
        self.arithmetic(ArithOp::Add, dst, src, carry, true).into()
    }

    /// `dst -= src`.
    #[must_use]
    pub fn sub(&mut self, dst: Operand, src: Operand) -> Trap {
        self.arithmetic(ArithOp::Sub, dst, src, false, true).into()
    }

    /// `dst -= src + CF`.
    #[must_use]
    pub fn sbb(&mut self, dst: Operand, src: Operand) -> Trap {
        let borrow = self.registers.flag(Flag::Carry);
        self.arithmetic(ArithOp::Sub, dst, src, borrow, true).into()
    }

    /// Sets flags from `dst - src` without writing `dst`.
    #[must_use]
    pub fn cmp(&mut self, dst: Operand, src: Operand) -> Trap {
        self.arithmetic(ArithOp::Sub, dst, src, false, false).into()
    }

    /// INC/DEC: ALU with a source of one, CF preserved.
    fn step_by_one(&mut self, op: ArithOp, dst: Operand) -> Result<(), FaultCode> {
        validate_destination(dst)?;
        let value = self.load(dst)?;
        let out = alu::compute(op, value, 1, false, Width::Word);
        self.store(dst, out.value)?;
        out.flags.without(Flag::Carry).apply(&mut self.registers);
        Ok(())
    }

    /// `dst += 1`; CF is left unchanged.
    #[must_use]
    pub fn inc(&mut self, dst: Operand) -> Trap {
        self.step_by_one(ArithOp::Add, dst).into()
    }

    /// `dst -= 1`; CF is left unchanged.
    #[must_use]
    pub fn dec(&mut self, dst: Operand) -> Trap {
        self.step_by_one(ArithOp::Sub, dst).into()
    }

    fn complement(&mut self, dst: Operand) -> Result<(), FaultCode> {
        validate_destination(dst)?;
        let value = self.load(dst)?;
        self.store(dst, !value)
    }

    /// Writes the bitwise complement of `dst` back to `dst`.
    ///
    /// This is one's complement, not two's complement negation, and it leaves
    /// FLAG untouched. Callers wanting `0 - dst` must add one themselves.
    #[must_use]
    pub fn neg(&mut self, dst: Operand) -> Trap {
        self.complement(dst).into()
    }

    /// Bitwise complement of `dst`; no flags affected.
    #[must_use]
    pub fn not(&mut self, dst: Operand) -> Trap {
        self.complement(dst).into()
    }
}
