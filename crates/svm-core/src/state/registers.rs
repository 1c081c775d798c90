use super::flags::Flag;

/// Number of architectural 16-bit registers.
pub const REGISTER_COUNT: usize = 14;

/// Architectural 16-bit register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Register {
    /// Accumulator.
    Ax = 0,
    /// Base.
    Bx = 1,
    /// Count.
    Cx = 2,
    /// Data.
    Dx = 3,
    /// Code segment.
    Cs = 4,
    /// Data segment.
    Ds = 5,
    /// Stack segment.
    Ss = 6,
    /// Extra segment.
    Es = 7,
    /// Stack pointer.
    Sp = 8,
    /// Base pointer.
    Bp = 9,
    /// Source index.
    Si = 10,
    /// Destination index.
    Di = 11,
    /// Instruction pointer.
    Ip = 12,
    /// Status and control flags.
    Flag = 13,
}

impl Register {
    /// Ordered list of all architectural registers.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::Ax,
        Self::Bx,
        Self::Cx,
        Self::Dx,
        Self::Cs,
        Self::Ds,
        Self::Ss,
        Self::Es,
        Self::Sp,
        Self::Bp,
        Self::Si,
        Self::Di,
        Self::Ip,
        Self::Flag,
    ];

    /// Returns the storage index for this register (`0..=13`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// 8-bit view onto the low or high half of a general register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum ByteRegister {
    Al,
    Ah,
    Bl,
    Bh,
    Cl,
    Ch,
    Dl,
    Dh,
}

impl ByteRegister {
    /// Full register backing this view.
    #[must_use]
    pub const fn parent(self) -> Register {
        match self {
            Self::Al | Self::Ah => Register::Ax,
            Self::Bl | Self::Bh => Register::Bx,
            Self::Cl | Self::Ch => Register::Cx,
            Self::Dl | Self::Dh => Register::Dx,
        }
    }

    /// Bit shift of this half inside the parent register.
    #[must_use]
    pub const fn shift(self) -> u16 {
        match self {
            Self::Al | Self::Bl | Self::Cl | Self::Dl => 0,
            Self::Ah | Self::Bh | Self::Ch | Self::Dh => 8,
        }
    }
}

/// The fourteen architectural registers of one core.
///
/// Each register is stored once as a full 16-bit value; byte views are
/// derived by masking so the halves can never drift from the whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    values: [u16; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [0; REGISTER_COUNT],
        }
    }

    /// Reads a register.
    #[must_use]
    pub const fn read(&self, reg: Register) -> u16 {
        self.values[reg.index()]
    }

    /// Replaces a register value.
    pub const fn write(&mut self, reg: Register, value: u16) {
        self.values[reg.index()] = value;
    }

    /// Reads an 8-bit register half.
    #[must_use]
    pub const fn read_byte(&self, reg: ByteRegister) -> u8 {
        (self.read(reg.parent()) >> reg.shift()) as u8
    }

    /// Writes an 8-bit register half, preserving the other half.
    pub const fn write_byte(&mut self, reg: ByteRegister, value: u8) {
        let parent = reg.parent();
        let keep = !(0x00FF << reg.shift());
        let merged = (self.read(parent) & keep) | ((value as u16) << reg.shift());
        self.write(parent, merged);
    }

    /// Returns `true` when `flag` is set in `FLAG`.
    #[must_use]
    pub const fn flag(&self, flag: Flag) -> bool {
        self.read(Register::Flag) & flag.mask() != 0
    }

    /// Sets or clears one flag bit, preserving every other bit of `FLAG`.
    pub const fn set_flag(&mut self, flag: Flag, enabled: bool) {
        let flags = self.read(Register::Flag);
        let updated = if enabled {
            flags | flag.mask()
        } else {
            flags & !flag.mask()
        };
        self.write(Register::Flag, updated);
    }

    /// Raw `FLAG` register value.
    #[must_use]
    pub const fn flags(&self) -> u16 {
        self.read(Register::Flag)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteRegister, Register, RegisterFile, REGISTER_COUNT};
    use crate::Flag;

    #[test]
    fn register_indices_cover_the_file() {
        for (index, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.index(), index);
        }
        assert_eq!(Register::ALL.len(), REGISTER_COUNT);
    }

    #[test]
    fn registers_start_at_zero() {
        let file = RegisterFile::new();
        assert!(Register::ALL.iter().all(|reg| file.read(*reg) == 0));
        assert_eq!(file, RegisterFile::default());
    }

    #[test]
    fn register_file_tracks_each_register_independently() {
        let mut file = RegisterFile::new();

        for (offset, reg) in (0_u16..).zip(Register::ALL.iter().copied()) {
            file.write(reg, 0x1000 + offset);
        }

        for (offset, reg) in (0_u16..).zip(Register::ALL.iter().copied()) {
            assert_eq!(file.read(reg), 0x1000 + offset);
        }
    }

    #[test]
    fn byte_views_are_derived_from_the_full_register() {
        let mut file = RegisterFile::new();
        file.write(Register::Ax, 0x1234);

        assert_eq!(file.read_byte(ByteRegister::Al), 0x34);
        assert_eq!(file.read_byte(ByteRegister::Ah), 0x12);

        file.write_byte(ByteRegister::Ah, 0xAB);
        assert_eq!(file.read(Register::Ax), 0xAB34);

        file.write_byte(ByteRegister::Al, 0xCD);
        assert_eq!(file.read(Register::Ax), 0xABCD);

        file.write(Register::Ax, 0x0001);
        assert_eq!(file.read_byte(ByteRegister::Ah), 0x00);
        assert_eq!(file.read_byte(ByteRegister::Al), 0x01);
    }

    #[test]
    fn byte_views_only_touch_their_parent() {
        let mut file = RegisterFile::new();
        file.write_byte(ByteRegister::Dh, 0xFF);
        file.write_byte(ByteRegister::Cl, 0x0F);

        assert_eq!(file.read(Register::Dx), 0xFF00);
        assert_eq!(file.read(Register::Cx), 0x000F);
        assert_eq!(file.read(Register::Ax), 0x0000);
        assert_eq!(file.read(Register::Bx), 0x0000);
    }

    #[test]
    fn flag_writes_preserve_other_bits() {
        let mut file = RegisterFile::new();
        file.write(Register::Flag, 0xF02A);

        file.set_flag(Flag::Carry, true);
        assert_eq!(file.flags(), 0xF02B);
        assert!(file.flag(Flag::Carry));

        file.set_flag(Flag::Carry, false);
        assert_eq!(file.flags(), 0xF02A);

        for flag in Flag::ALL {
            let before = file.flags();
            file.set_flag(flag, !file.flag(flag));
            assert_eq!(before ^ file.flags(), flag.mask());
        }
    }
}
