//! AND/OR/XOR/TEST.

use super::alu::{self, Width};
use super::helpers::validate_shape;
use crate::{Cpu, FaultCode, Operand, Trap};

#[derive(Clone, Copy)]
enum LogicOp {
    And,
    Or,
    Xor,
}

impl LogicOp {
    const fn combine(self, lhs: u16, rhs: u16) -> u16 {
        match self {
            Self::And => lhs & rhs,
            Self::Or => lhs | rhs,
            Self::Xor => lhs ^ rhs,
        }
    }
}

impl Cpu {
    fn logic(
        &mut self,
        op: LogicOp,
        dst: Operand,
        src: Operand,
        write_back: bool,
    ) -> Result<(), FaultCode> {
        validate_shape(dst, src)?;
        let lhs = self.load(dst)?;
        let rhs = self.load(src)?;
        let result = op.combine(lhs, rhs);
        if write_back {
            self.store(dst, result)?;
        }
        alu::logic_flags(result, Width::Word).apply(&mut self.registers);
        Ok(())
    }

    /// `dst &= src`; CF and OF cleared, AF untouched.
    #[must_use]
    pub fn and(&mut self, dst: Operand, src: Operand) -> Trap {
        self.logic(LogicOp::And, dst, src, true).into()
    }

    /// `dst |= src`; CF and OF cleared, AF untouched.
    #[must_use]
    pub fn or(&mut self, dst: Operand, src: Operand) -> Trap {
        self.logic(LogicOp::Or, dst, src, true).into()
    }

    /// `dst ^= src`; CF and OF cleared, AF untouched.
    #[must_use]
    pub fn xor(&mut self, dst: Operand, src: Operand) -> Trap {
        self.logic(LogicOp::Xor, dst, src, true).into()
    }

    /// Flags of `dst & src`, no write-back.
    #[must_use]
    pub fn test(&mut self, dst: Operand, src: Operand) -> Trap {
        self.logic(LogicOp::And, dst, src, false).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cpu, Flag, Memory, Operand, Register, Trap};

    #[test]
    fn and_register_register_masks_and_clears_carry_overflow() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ax, 0xFF0F);
        cpu.write(Register::Bx, 0x0FF0);
        cpu.write_flag(Flag::Carry, true);
        cpu.write_flag(Flag::Overflow, true);
        cpu.write_flag(Flag::AuxCarry, true);

        assert_eq!(cpu.and(Register::Ax.into(), Register::Bx.into()), Trap::Ok);
        assert_eq!(cpu.read(Register::Ax), 0x0F00);
        assert!(!cpu.read_flag(Flag::Carry));
        assert!(!cpu.read_flag(Flag::Overflow));
        assert!(cpu.read_flag(Flag::AuxCarry));
        assert!(cpu.read_flag(Flag::Parity));
        assert!(!cpu.read_flag(Flag::Zero));
    }

    #[test]
    fn or_memory_register_writes_memory() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.memory_mut().write_word(0x0010, 0x8000).expect("in bounds");
        cpu.write(Register::Cx, 0x0001);

        assert_eq!(cpu.or(Operand::Memory(0x0010), Register::Cx.into()), Trap::Ok);
        assert_eq!(cpu.memory().read_word(0x0010), Ok(0x8001));
        assert!(cpu.read_flag(Flag::Sign));
        assert!(!cpu.read_flag(Flag::Parity));
    }

    #[test]
    fn xor_with_itself_zeroes() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ax, 0x0001);
        cpu.write(Register::Bx, 0x0001);

        assert_eq!(cpu.xor(Register::Ax.into(), Register::Bx.into()), Trap::Ok);
        assert_eq!(cpu.read(Register::Ax), 0);
        assert!(cpu.read_flag(Flag::Zero));
        assert!(cpu.read_flag(Flag::Parity));
    }

    #[test]
    fn test_sets_flags_only() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Dx, 0x00F0);

        assert_eq!(cpu.test(Register::Dx.into(), Operand::Immediate(0x000F)), Trap::Ok);
        assert_eq!(cpu.read(Register::Dx), 0x00F0);
        assert!(cpu.read_flag(Flag::Zero));
    }

    #[test]
    fn memory_fault_leaves_flags() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Flag, 0x0801);
        assert_eq!(
            cpu.and(Operand::Memory(0x000F_FFFF), Operand::Immediate(0)),
            Trap::SegFault
        );
        assert_eq!(cpu.read(Register::Flag), 0x0801);
    }
}
