//! Stack instructions. The stack lives at `SS:SP` and grows downward: a push
//! stores at the current top and then moves SP down, a pop moves SP up and
//! then loads, so every push is undone by exactly one pop.

use super::helpers::validate_destination;
use crate::{Cpu, FaultCode, Operand, Register, Trap};

/// Register order for PUSHA. SP is pushed with its value from before the
/// first push.
const PUSHA_ORDER: [Register; 8] = [
    Register::Ax,
    Register::Cx,
    Register::Dx,
    Register::Bx,
    Register::Sp,
    Register::Bp,
    Register::Si,
    Register::Di,
];

/// Register order for POPA; `None` is the saved SP slot, which is discarded.
const POPA_ORDER: [Option<Register>; 8] = [
    Some(Register::Di),
    Some(Register::Si),
    Some(Register::Bp),
    None,
    Some(Register::Bx),
    Some(Register::Dx),
    Some(Register::Cx),
    Some(Register::Ax),
];

impl Cpu {
    fn push_word(&mut self, value: u16) -> Result<(), FaultCode> {
        let sp = self.registers.read(Register::Sp);
        self.memory.write_word(self.stack_address(sp), value)?;
        self.registers.write(Register::Sp, sp.wrapping_sub(2));
        Ok(())
    }

    /// Reads the word a pop would return, plus the SP value after the pop.
    fn peek_pop(&self) -> Result<(u16, u16), FaultCode> {
        let sp = self.registers.read(Register::Sp).wrapping_add(2);
        let value = self.memory.read_word(self.stack_address(sp))?;
        Ok((value, sp))
    }

    fn pop_into(&mut self, dst: Operand) -> Result<(), FaultCode> {
        validate_destination(dst)?;
        let (value, sp) = self.peek_pop()?;
        match dst {
            // SP first so `POP SP` keeps the popped value.
            Operand::Register(reg) => {
                self.registers.write(Register::Sp, sp);
                self.registers.write(reg, value);
            }
            _ => {
                self.store(dst, value)?;
                self.registers.write(Register::Sp, sp);
            }
        }
        Ok(())
    }

    /// Stores the operand at `SS:SP`, then `SP -= 2`.
    #[must_use]
    pub fn push(&mut self, src: Operand) -> Trap {
        let pushed = self.load(src).and_then(|value| self.push_word(value));
        pushed.into()
    }

    /// `SP += 2`, then loads the word at `SS:SP` into `dst`.
    ///
    /// PUSH leaves SP one slot below the word it stored, so the pop reads the
    /// slot above SP and a PUSH/POP pair returns the pushed value.
    ///
    /// An immediate destination is [`Trap::Illegal`]. On any fault SP is left
    /// where it was.
    #[must_use]
    pub fn pop(&mut self, dst: Operand) -> Trap {
        self.pop_into(dst).into()
    }

    fn push_all(&mut self) -> Result<(), FaultCode> {
        let original_sp = self.registers.read(Register::Sp);
        for reg in PUSHA_ORDER {
            let value = if reg == Register::Sp {
                original_sp
            } else {
                self.registers.read(reg)
            };
            self.push_word(value)?;
        }
        Ok(())
    }

    /// Pushes AX, CX, DX, BX, the original SP, BP, SI and DI.
    ///
    /// A fault stops the sequence; pushes already made stay committed.
    #[must_use]
    pub fn pusha(&mut self) -> Trap {
        self.push_all().into()
    }

    fn pop_all(&mut self) -> Result<(), FaultCode> {
        for slot in POPA_ORDER {
            match slot {
                Some(reg) => self.pop_into(Operand::Register(reg))?,
                None => {
                    let sp = self.registers.read(Register::Sp);
                    self.registers.write(Register::Sp, sp.wrapping_add(2));
                }
            }
        }
        Ok(())
    }

    /// Pops DI, SI, BP, skips the saved SP, then pops BX, DX, CX and AX.
    ///
    /// A fault stops the sequence; pops already made stay committed.
    #[must_use]
    pub fn popa(&mut self) -> Trap {
        self.pop_all().into()
    }

    /// Pushes FLAG.
    #[must_use]
    pub fn pushf(&mut self) -> Trap {
        self.push(Operand::Register(Register::Flag))
    }

    /// Pops the whole FLAG word.
    #[must_use]
    pub fn popf(&mut self) -> Trap {
        self.pop(Operand::Register(Register::Flag))
    }
}
