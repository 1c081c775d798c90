//! Flag control, NOP, HLT and the mnemonics this core does not execute.

use log::warn;

use crate::{Cpu, Flag, Mnemonic, Trap};

impl Cpu {
    /// Sets CF.
    #[must_use]
    pub const fn stc(&mut self) -> Trap {
        self.registers.set_flag(Flag::Carry, true);
        Trap::Ok
    }

    /// Clears CF.
    #[must_use]
    pub const fn clc(&mut self) -> Trap {
        self.registers.set_flag(Flag::Carry, false);
        Trap::Ok
    }

    /// Complements CF.
    #[must_use]
    pub const fn cmc(&mut self) -> Trap {
        let carry = self.registers.flag(Flag::Carry);
        self.registers.set_flag(Flag::Carry, !carry);
        Trap::Ok
    }

    /// Sets DF; string instructions then walk downward.
    #[must_use]
    pub const fn std(&mut self) -> Trap {
        self.registers.set_flag(Flag::Direction, true);
        Trap::Ok
    }

    /// Clears DF.
    #[must_use]
    pub const fn cld(&mut self) -> Trap {
        self.registers.set_flag(Flag::Direction, false);
        Trap::Ok
    }

    /// Sets IF.
    #[must_use]
    pub const fn sti(&mut self) -> Trap {
        self.registers.set_flag(Flag::Interrupt, true);
        Trap::Ok
    }

    /// Clears IF.
    #[must_use]
    pub const fn cli(&mut self) -> Trap {
        self.registers.set_flag(Flag::Interrupt, false);
        Trap::Ok
    }

    /// Does nothing.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn nop(&self) -> Trap {
        Trap::Ok
    }

    /// Requests that the driver stop; this is not an error.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn hlt(&self) -> Trap {
        Trap::Halt
    }

    /// Control transfer, interrupts, port I/O, repeat prefixes,
    /// multiply/divide and far-pointer loads belong to the fetch loop around
    /// this core. They always report [`Trap::Illegal`].
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn unimplemented(&self, mnemonic: Mnemonic) -> Trap {
        warn!("{mnemonic} is not executed by this core");
        Trap::Illegal
    }
}
