//! Single-step string instructions over `DS:SI` and `ES:DI`.

use super::alu::{self, ArithOp, Width};
use crate::{ByteRegister, Cpu, FaultCode, MemoryAddress, Register, Trap};

impl Width {
    const fn step(self) -> u16 {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
        }
    }
}

impl Cpu {
    fn read_sized(&self, addr: MemoryAddress, width: Width) -> Result<u16, FaultCode> {
        match width {
            Width::Byte => self.memory.read_byte(addr).map(u16::from),
            Width::Word => self.memory.read_word(addr),
        }
    }

    fn write_sized(
        &mut self,
        addr: MemoryAddress,
        value: u16,
        width: Width,
    ) -> Result<(), FaultCode> {
        match width {
            Width::Byte => self.memory.write_byte(addr, value.to_be_bytes()[1]),
            Width::Word => self.memory.write_word(addr, value),
        }
    }

    /// AL or AX.
    fn accumulator(&self, width: Width) -> u16 {
        match width {
            Width::Byte => u16::from(self.registers.read_byte(ByteRegister::Al)),
            Width::Word => self.registers.read(Register::Ax),
        }
    }

    const fn set_accumulator(&mut self, value: u16, width: Width) {
        match width {
            Width::Byte => self
                .registers
                .write_byte(ByteRegister::Al, value.to_be_bytes()[1]),
            Width::Word => self.registers.write(Register::Ax, value),
        }
    }

    fn compare_strings(&mut self, width: Width) -> Result<(), FaultCode> {
        let source = self.read_sized(self.string_source(), width)?;
        let destination = self.read_sized(self.string_destination(), width)?;
        let out = alu::compute(ArithOp::Sub, source, destination, false, width);
        self.advance_index(Register::Si, width.step());
        self.advance_index(Register::Di, width.step());
        out.flags.apply(&mut self.registers);
        Ok(())
    }

    fn move_string(&mut self, width: Width) -> Result<(), FaultCode> {
        let value = self.read_sized(self.string_source(), width)?;
        self.write_sized(self.string_destination(), value, width)?;
        self.advance_index(Register::Si, width.step());
        self.advance_index(Register::Di, width.step());
        Ok(())
    }

    fn load_string(&mut self, width: Width) -> Result<(), FaultCode> {
        let value = self.read_sized(self.string_source(), width)?;
        self.set_accumulator(value, width);
        self.advance_index(Register::Si, width.step());
        Ok(())
    }

    fn store_string(&mut self, width: Width) -> Result<(), FaultCode> {
        let value = self.accumulator(width);
        self.write_sized(self.string_destination(), value, width)?;
        self.advance_index(Register::Di, width.step());
        Ok(())
    }

    fn scan_string(&mut self, width: Width) -> Result<(), FaultCode> {
        let destination = self.read_sized(self.string_destination(), width)?;
        let out = alu::compute(ArithOp::Sub, self.accumulator(width), destination, false, width);
        self.advance_index(Register::Di, width.step());
        out.flags.apply(&mut self.registers);
        Ok(())
    }

    /// Flags of `[DS:SI] - [ES:DI]` (bytes); SI and DI step by one.
    #[must_use]
    pub fn cmpsb(&mut self) -> Trap {
        self.compare_strings(Width::Byte).into()
    }

    /// Flags of `[DS:SI] - [ES:DI]` (words); SI and DI step by two.
    #[must_use]
    pub fn cmpsw(&mut self) -> Trap {
        self.compare_strings(Width::Word).into()
    }

    /// Copies a byte from `DS:SI` to `ES:DI`.
    #[must_use]
    pub fn movsb(&mut self) -> Trap {
        self.move_string(Width::Byte).into()
    }

    /// Copies a word from `DS:SI` to `ES:DI`.
    #[must_use]
    pub fn movsw(&mut self) -> Trap {
        self.move_string(Width::Word).into()
    }

    /// AL <- `[DS:SI]`. AH is not touched.
    #[must_use]
    pub fn lodsb(&mut self) -> Trap {
        self.load_string(Width::Byte).into()
    }

    /// AX <- `[DS:SI]`.
    #[must_use]
    pub fn lodsw(&mut self) -> Trap {
        self.load_string(Width::Word).into()
    }

    /// `[ES:DI]` <- AL.
    #[must_use]
    pub fn stosb(&mut self) -> Trap {
        self.store_string(Width::Byte).into()
    }

    /// `[ES:DI]` <- AX.
    #[must_use]
    pub fn stosw(&mut self) -> Trap {
        self.store_string(Width::Word).into()
    }

    /// Flags of `AL - [ES:DI]`.
    #[must_use]
    pub fn scasb(&mut self) -> Trap {
        self.scan_string(Width::Byte).into()
    }

    /// Flags of `AX - [ES:DI]`.
    #[must_use]
    pub fn scasw(&mut self) -> Trap {
        self.scan_string(Width::Word).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cpu, Flag, Memory, Register, Trap};
    use rstest::rstest;

    fn cpu() -> Cpu {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ds, 0x0100);
        cpu.write(Register::Si, 0x0010);
        cpu.write(Register::Es, 0x0200);
        cpu.write(Register::Di, 0x0020);
        cpu
    }

    #[rstest]
    #[case(false, 0x0011, 0x0021)]
    #[case(true, 0x000F, 0x001F)]
    fn movsb_copies_and_steps_with_direction(
        #[case] direction: bool,
        #[case] si: u16,
        #[case] di: u16,
    ) {
        let mut cpu = cpu();
        cpu.write_flag(Flag::Direction, direction);
        cpu.memory_mut().write_byte(0x1010, 0xAB).expect("in bounds");

        assert_eq!(cpu.movsb(), Trap::Ok);
        assert_eq!(cpu.memory().read_byte(0x2020), Ok(0xAB));
        assert_eq!(cpu.read(Register::Si), si);
        assert_eq!(cpu.read(Register::Di), di);
    }

    #[test]
    fn movsw_steps_by_two() {
        let mut cpu = cpu();
        cpu.memory_mut().write_word(0x1010, 0xCAFE).expect("in bounds");

        assert_eq!(cpu.movsw(), Trap::Ok);
        assert_eq!(cpu.memory().read_word(0x2020), Ok(0xCAFE));
        assert_eq!(cpu.read(Register::Si), 0x0012);
        assert_eq!(cpu.read(Register::Di), 0x0022);
    }

    #[test]
    fn cmpsb_subtracts_destination_from_source() {
        let mut cpu = cpu();
        cpu.memory_mut().write_byte(0x1010, 0x01).expect("in bounds");
        cpu.memory_mut().write_byte(0x2020, 0x02).expect("in bounds");

        assert_eq!(cpu.cmpsb(), Trap::Ok);
        assert!(cpu.read_flag(Flag::Carry));
        assert!(cpu.read_flag(Flag::Sign));
        assert!(!cpu.read_flag(Flag::Zero));
        assert_eq!(cpu.memory().read_byte(0x1010), Ok(0x01));
    }

    #[test]
    fn cmpsw_equal_words_set_zero() {
        let mut cpu = cpu();
        cpu.memory_mut().write_word(0x1010, 0x1234).expect("in bounds");
        cpu.memory_mut().write_word(0x2020, 0x1234).expect("in bounds");

        assert_eq!(cpu.cmpsw(), Trap::Ok);
        assert!(cpu.read_flag(Flag::Zero));
        assert!(!cpu.read_flag(Flag::Carry));
    }

    #[test]
    fn lodsb_writes_only_al() {
        let mut cpu = cpu();
        cpu.write(Register::Ax, 0x5500);
        cpu.memory_mut().write_byte(0x1010, 0x77).expect("in bounds");

        assert_eq!(cpu.lodsb(), Trap::Ok);
        assert_eq!(cpu.read(Register::Ax), 0x5577);
        assert_eq!(cpu.read(Register::Si), 0x0011);
        assert_eq!(cpu.read(Register::Di), 0x0020);
    }

    #[test]
    fn lodsw_and_stosw_move_the_accumulator() {
        let mut cpu = cpu();
        cpu.memory_mut().write_word(0x1010, 0x9876).expect("in bounds");

        assert_eq!(cpu.lodsw(), Trap::Ok);
        assert_eq!(cpu.read(Register::Ax), 0x9876);
        assert_eq!(cpu.stosw(), Trap::Ok);
        assert_eq!(cpu.memory().read_word(0x2020), Ok(0x9876));
        assert_eq!(cpu.read(Register::Di), 0x0022);
    }

    #[test]
    fn stosb_writes_al() {
        let mut cpu = cpu();
        cpu.write(Register::Ax, 0x1234);

        assert_eq!(cpu.stosb(), Trap::Ok);
        assert_eq!(cpu.memory().read_byte(0x2020), Ok(0x34));
        assert_eq!(cpu.memory().read_byte(0x2021), Ok(0x00));
        assert_eq!(cpu.read(Register::Si), 0x0010);
    }

    #[test]
    fn scas_compares_accumulator() {
        let mut cpu = cpu();
        cpu.write(Register::Ax, 0x0042);
        cpu.memory_mut().write_word(0x2020, 0x4200).expect("in bounds");

        assert_eq!(cpu.scasb(), Trap::Ok);
        assert!(cpu.read_flag(Flag::Zero));
        assert_eq!(cpu.read(Register::Di), 0x0021);

        cpu.write(Register::Di, 0x0020);
        assert_eq!(cpu.scasw(), Trap::Ok);
        assert!(!cpu.read_flag(Flag::Zero));
        assert!(cpu.read_flag(Flag::Carry));
    }

    #[test]
    fn fault_leaves_indices_and_flags() {
        let mut cpu = cpu();
        cpu.write(Register::Ds, 0xFFFF);
        cpu.write(Register::Si, 0xFFFF);
        cpu.write(Register::Flag, 0x0041);

        assert_eq!(cpu.cmpsw(), Trap::SegFault);
        assert_eq!(cpu.movsb(), Trap::SegFault);
        assert_eq!(cpu.read(Register::Si), 0xFFFF);
        assert_eq!(cpu.read(Register::Di), 0x0020);
        assert_eq!(cpu.read(Register::Flag), 0x0041);
    }
}
