//! Operand resolution and address formation shared by instruction families.

use crate::{segmented_address, Cpu, FaultCode, Flag, MemoryAddress, Operand, Register};

/// Rejects operand pairs outside the five legal shapes.
///
/// Legal: `reg, reg`, `reg, mem`, `reg, imm`, `mem, imm`, `mem, reg`.
///
/// # Errors
///
/// Returns [`FaultCode::Illegal`] for an immediate destination or a
/// memory-to-memory pair.
pub const fn validate_shape(dst: Operand, src: Operand) -> Result<(), FaultCode> {
    match (dst, src) {
        (Operand::Immediate(_), _) | (Operand::Memory(_), Operand::Memory(_)) => {
            Err(FaultCode::Illegal)
        }
        _ => Ok(()),
    }
}

/// Rejects an immediate where a writable operand is required.
///
/// # Errors
///
/// Returns [`FaultCode::Illegal`] when `dst` is an immediate.
pub const fn validate_destination(dst: Operand) -> Result<(), FaultCode> {
    match dst {
        Operand::Immediate(_) => Err(FaultCode::Illegal),
        Operand::Register(_) | Operand::Memory(_) => Ok(()),
    }
}

impl Cpu {
    /// Reads a word operand.
    pub(crate) fn load(&self, operand: Operand) -> Result<u16, FaultCode> {
        match operand {
            Operand::Register(reg) => Ok(self.registers.read(reg)),
            Operand::Memory(addr) => self.memory.read_word(addr),
            Operand::Immediate(value) => Ok(value),
        }
    }

    /// Writes a word operand.
    pub(crate) fn store(&mut self, operand: Operand, value: u16) -> Result<(), FaultCode> {
        match operand {
            Operand::Register(reg) => {
                self.registers.write(reg, value);
                Ok(())
            }
            Operand::Memory(addr) => self.memory.write_word(addr, value),
            Operand::Immediate(_) => Err(FaultCode::Illegal),
        }
    }

    /// `SS:SP` as a physical address.
    pub(crate) const fn stack_address(&self, sp: u16) -> MemoryAddress {
        segmented_address(self.registers.read(Register::Ss), sp)
    }

    /// `DS:SI`, the string source.
    pub(crate) const fn string_source(&self) -> MemoryAddress {
        segmented_address(
            self.registers.read(Register::Ds),
            self.registers.read(Register::Si),
        )
    }

    /// `ES:DI`, the string destination.
    pub(crate) const fn string_destination(&self) -> MemoryAddress {
        segmented_address(
            self.registers.read(Register::Es),
            self.registers.read(Register::Di),
        )
    }

    /// Moves an index register by `size` bytes in the direction selected by DF.
    pub(crate) const fn advance_index(&mut self, reg: Register, size: u16) {
        let current = self.registers.read(reg);
        let next = if self.registers.flag(Flag::Direction) {
            current.wrapping_sub(size)
        } else {
            current.wrapping_add(size)
        };
        self.registers.write(reg, next);
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_destination, validate_shape};
    use crate::{Cpu, FaultCode, Flag, Memory, Operand, Register};
    use rstest::rstest;

    const REG: Operand = Operand::Register(Register::Ax);
    const MEM: Operand = Operand::Memory(0x0100);
    const IMM: Operand = Operand::Immediate(7);

    #[rstest]
    #[case(REG, REG, true)]
    #[case(REG, MEM, true)]
    #[case(REG, IMM, true)]
    #[case(MEM, IMM, true)]
    #[case(MEM, REG, true)]
    #[case(MEM, MEM, false)]
    #[case(IMM, REG, false)]
    #[case(IMM, MEM, false)]
    #[case(IMM, IMM, false)]
    fn only_five_shapes_are_legal(#[case] dst: Operand, #[case] src: Operand, #[case] ok: bool) {
        let expected = if ok { Ok(()) } else { Err(FaultCode::Illegal) };
        assert_eq!(validate_shape(dst, src), expected);
    }

    #[test]
    fn immediate_is_never_a_destination() {
        assert_eq!(validate_destination(IMM), Err(FaultCode::Illegal));
        assert_eq!(validate_destination(REG), Ok(()));
        assert_eq!(validate_destination(MEM), Ok(()));
    }

    #[test]
    fn load_and_store_resolve_each_operand_kind() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.store(REG, 0x1111).expect("register store");
        cpu.store(MEM, 0x2222).expect("memory store");

        assert_eq!(cpu.load(REG), Ok(0x1111));
        assert_eq!(cpu.load(MEM), Ok(0x2222));
        assert_eq!(cpu.load(IMM), Ok(7));
        assert_eq!(cpu.store(IMM, 1), Err(FaultCode::Illegal));
        assert_eq!(
            cpu.load(Operand::Memory(0xFFFF_FFFF)),
            Err(FaultCode::SegFault)
        );
    }

    #[test]
    fn string_addresses_use_segment_pairs() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ds, 0x0100);
        cpu.write(Register::Si, 0x0010);
        cpu.write(Register::Es, 0x0200);
        cpu.write(Register::Di, 0x0020);
        cpu.write(Register::Ss, 0x0300);

        assert_eq!(cpu.string_source(), 0x1010);
        assert_eq!(cpu.string_destination(), 0x2020);
        assert_eq!(cpu.stack_address(0x0004), 0x3004);
    }

    #[test]
    fn index_direction_follows_df() {
        let mut cpu = Cpu::new(Memory::new());
        cpu.advance_index(Register::Si, 2);
        assert_eq!(cpu.read(Register::Si), 2);

        cpu.write_flag(Flag::Direction, true);
        cpu.advance_index(Register::Si, 1);
        cpu.advance_index(Register::Si, 2);
        assert_eq!(cpu.read(Register::Si), 0xFFFF);
    }
}
