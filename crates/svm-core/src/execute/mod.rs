//! Instruction execution.
//!
//! Every instruction method on [`Cpu`] follows the same commit sequence:
//! 1. Validate the operand shape
//! 2. Read source operands (registers, memory, immediates)
//! 3. Compute the result and its flag writes
//! 4. Perform memory writes
//! 5. Write destination registers
//! 6. Update FLAG
//!
//! A fault in steps 1-4 returns before anything is committed, so a faulting
//! single-step instruction leaves registers, memory and FLAG as they were.
//! PUSHA and POPA are sequences of single steps and stop at the first fault.

#![allow(clippy::cast_possible_truncation, clippy::cast_lossless)]

mod alu;
mod arith;
mod bcd;
mod control;
mod data;
mod flags;
mod helpers;
mod logic;
mod shift;
mod stack;
mod string;

pub use alu::{compute, logic_flags, parity, result_flags, AluOutput, ArithOp, Width};
pub use flags::FlagsUpdate;
pub use helpers::{validate_destination, validate_shape};

use log::{debug, trace};

use crate::{Cpu, Instruction, TraceEvent, Trap};

impl Cpu {
    /// Executes one instruction and returns its status.
    ///
    /// With tracing enabled the installed sink sees an
    /// [`TraceEvent::InstructionStart`] before and an
    /// [`TraceEvent::InstructionCompleted`] after the instruction.
    #[must_use]
    pub fn execute(&mut self, instruction: Instruction) -> Trap {
        let mnemonic = instruction.mnemonic();
        let flags = self.registers.flags();
        if let Some(sink) = self.trace_sink_mut() {
            sink.on_event(TraceEvent::InstructionStart { mnemonic, flags });
        }

        let trap = self.dispatch(instruction);

        trace!("{mnemonic} -> {trap:?}");
        if matches!(trap, Trap::SegFault | Trap::MemFault) {
            debug!("{instruction:?} faulted with {trap:?}");
        }
        let flags = self.registers.flags();
        if let Some(sink) = self.trace_sink_mut() {
            sink.on_event(TraceEvent::InstructionCompleted {
                mnemonic,
                trap,
                flags,
            });
        }
        trap
    }

    fn dispatch(&mut self, instruction: Instruction) -> Trap {
        match instruction {
            Instruction::Add { dst, src } => self.add(dst, src),
            Instruction::Adc { dst, src } => self.adc(dst, src),
            Instruction::Sub { dst, src } => self.sub(dst, src),
            Instruction::Sbb { dst, src } => self.sbb(dst, src),
            Instruction::Cmp { dst, src } => self.cmp(dst, src),
            Instruction::And { dst, src } => self.and(dst, src),
            Instruction::Or { dst, src } => self.or(dst, src),
            Instruction::Xor { dst, src } => self.xor(dst, src),
            Instruction::Test { dst, src } => self.test(dst, src),
            Instruction::Mov { dst, src } => self.mov(dst, src),
            Instruction::Xchg { dst, src } => self.xchg(dst, src),
            Instruction::Inc(dst) => self.inc(dst),
            Instruction::Dec(dst) => self.dec(dst),
            Instruction::Neg(dst) => self.neg(dst),
            Instruction::Not(dst) => self.not(dst),
            Instruction::Shl { dst, count } => self.shl(dst, count),
            Instruction::Sal { dst, count } => self.sal(dst, count),
            Instruction::Shr { dst, count } => self.shr(dst, count),
            Instruction::Sar { dst, count } => self.sar(dst, count),
            Instruction::Rol { dst, count } => self.rol(dst, count),
            Instruction::Ror { dst, count } => self.ror(dst, count),
            Instruction::Rcl { dst, count } => self.rcl(dst, count),
            Instruction::Rcr { dst, count } => self.rcr(dst, count),
            Instruction::Push(src) => self.push(src),
            Instruction::Pop(dst) => self.pop(dst),
            Instruction::Pusha => self.pusha(),
            Instruction::Popa => self.popa(),
            Instruction::Pushf => self.pushf(),
            Instruction::Popf => self.popf(),
            Instruction::Cmpsb => self.cmpsb(),
            Instruction::Cmpsw => self.cmpsw(),
            Instruction::Movsb => self.movsb(),
            Instruction::Movsw => self.movsw(),
            Instruction::Lodsb => self.lodsb(),
            Instruction::Lodsw => self.lodsw(),
            Instruction::Stosb => self.stosb(),
            Instruction::Stosw => self.stosw(),
            Instruction::Scasb => self.scasb(),
            Instruction::Scasw => self.scasw(),
            Instruction::Aaa => self.aaa(),
            Instruction::Aas => self.aas(),
            Instruction::Aad => self.aad(),
            Instruction::Aam => self.aam(),
            Instruction::Daa => self.daa(),
            Instruction::Das => self.das(),
            Instruction::Cbw => self.cbw(),
            Instruction::Cwd => self.cwd(),
            Instruction::Lahf => self.lahf(),
            Instruction::Sahf => self.sahf(),
            Instruction::Xlatb => self.xlatb(),
            Instruction::Stc => self.stc(),
            Instruction::Clc => self.clc(),
            Instruction::Cmc => self.cmc(),
            Instruction::Std => self.std(),
            Instruction::Cld => self.cld(),
            Instruction::Sti => self.sti(),
            Instruction::Cli => self.cli(),
            Instruction::Nop => self.nop(),
            Instruction::Hlt => self.hlt(),
            Instruction::Unimplemented(mnemonic) => self.unimplemented(mnemonic),
        }
    }
}
