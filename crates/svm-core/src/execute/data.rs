//! Data movement: MOV, XCHG, CBW, CWD, LAHF, SAHF, XLATB. None of these
//! compute flags; SAHF copies them from AH.

use super::helpers::validate_shape;
use crate::{
    segmented_address, ByteRegister, Cpu, FaultCode, Operand, Register, Trap, FLAGS_LAHF_MASK,
};

impl Cpu {
    fn mov_value(&mut self, dst: Operand, src: Operand) -> Result<(), FaultCode> {
        validate_shape(dst, src)?;
        let value = self.load(src)?;
        self.store(dst, value)
    }

    /// Copies `src` into `dst`. FLAG is never touched.
    #[must_use]
    pub fn mov(&mut self, dst: Operand, src: Operand) -> Trap {
        self.mov_value(dst, src).into()
    }

    fn exchange(&mut self, lhs: Operand, rhs: Operand) -> Result<(), FaultCode> {
        if matches!(rhs, Operand::Immediate(_)) {
            return Err(FaultCode::Illegal);
        }
        validate_shape(lhs, rhs)?;
        let left = self.load(lhs)?;
        let right = self.load(rhs)?;
        // memory side first so a register is only written once nothing can fault
        match (lhs, rhs) {
            (Operand::Register(_), Operand::Memory(_)) => {
                self.store(rhs, left)?;
                self.store(lhs, right)
            }
            _ => {
                self.store(lhs, right)?;
                self.store(rhs, left)
            }
        }
    }

    /// Swaps two operands (`reg, reg`, `reg, mem` or `mem, reg`). FLAG is
    /// never touched.
    #[must_use]
    pub fn xchg(&mut self, lhs: Operand, rhs: Operand) -> Trap {
        self.exchange(lhs, rhs).into()
    }

    /// Sign-extends AL into AH.
    #[must_use]
    pub fn cbw(&mut self) -> Trap {
        let al = self.registers.read_byte(ByteRegister::Al);
        let ah = if al & 0x80 != 0 { 0xFF } else { 0x00 };
        self.registers.write_byte(ByteRegister::Ah, ah);
        Trap::Ok
    }

    /// Sign-extends AX into DX.
    #[must_use]
    pub fn cwd(&mut self) -> Trap {
        let ax = self.registers.read(Register::Ax);
        let dx = if ax & 0x8000 != 0 { 0xFFFF } else { 0x0000 };
        self.registers.write(Register::Dx, dx);
        Trap::Ok
    }

    /// Loads AH from the low byte of FLAG.
    #[must_use]
    pub fn lahf(&mut self) -> Trap {
        let [_, low] = self.registers.flags().to_be_bytes();
        self.registers.write_byte(ByteRegister::Ah, low);
        Trap::Ok
    }

    /// Stores SF, ZF, AF, PF and CF from AH; every other FLAG bit is kept.
    #[must_use]
    pub fn sahf(&mut self) -> Trap {
        let ah = u16::from(self.registers.read_byte(ByteRegister::Ah));
        let flags = (self.registers.flags() & !FLAGS_LAHF_MASK) | (ah & FLAGS_LAHF_MASK);
        self.registers.write(Register::Flag, flags);
        Trap::Ok
    }

    fn translate(&mut self) -> Result<(), FaultCode> {
        let al = u16::from(self.registers.read_byte(ByteRegister::Al));
        let offset = self.registers.read(Register::Bx).wrapping_add(al);
        let addr = segmented_address(self.registers.read(Register::Ds), offset);
        let byte = self.memory.read_byte(addr)?;
        self.registers.write_byte(ByteRegister::Al, byte);
        Ok(())
    }

    /// AL <- byte at `DS:(BX + AL)`.
    #[must_use]
    pub fn xlatb(&mut self) -> Trap {
        self.translate().into()
    }
}
