//! Instruction set surface consumed by an external fetch/decode loop.
//!
//! Operands are a tagged variant instead of one method per addressing shape,
//! so the five legal shapes (`reg, reg`, `reg, mem`, `reg, imm`, `mem, imm`,
//! `mem, reg`) are matched exhaustively in one place.

use crate::{MemoryAddress, Register};

/// Number of mnemonics in the instruction set.
pub const MNEMONIC_COUNT: usize = 116;

/// Every mnemonic of the instruction set, implemented or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Mnemonic {
    Aaa,
    Aad,
    Aam,
    Aas,
    Adc,
    Add,
    And,
    Call,
    Cbw,
    Clc,
    Cld,
    Cli,
    Cmc,
    Cmp,
    Cmpsb,
    Cmpsw,
    Cwd,
    Daa,
    Das,
    Dec,
    Div,
    Hlt,
    Idiv,
    Imul,
    In,
    Inc,
    Int,
    Into,
    Iret,
    Ja,
    Jae,
    Jb,
    Jbe,
    Jc,
    Jcxz,
    Je,
    Jg,
    Jge,
    Jl,
    Jmp,
    Jle,
    Jna,
    Jnae,
    Jnb,
    Jnbe,
    Jnc,
    Jne,
    Jng,
    Jnge,
    Jnl,
    Jnle,
    Jno,
    Jnp,
    Jns,
    Jnz,
    Jo,
    Jp,
    Jpe,
    Jpo,
    Js,
    Jz,
    Lahf,
    Lds,
    Lea,
    Les,
    Lodsb,
    Lodsw,
    Loop,
    Loope,
    Loopne,
    Loopnz,
    Loopz,
    Mov,
    Movsb,
    Movsw,
    Mul,
    Neg,
    Nop,
    Not,
    Or,
    Out,
    Pop,
    Popa,
    Popf,
    Push,
    Pusha,
    Pushf,
    Rcl,
    Rcr,
    Rep,
    Repe,
    Repne,
    Repnz,
    Repz,
    Ret,
    Retf,
    Rol,
    Ror,
    Sahf,
    Sal,
    Sar,
    Sbb,
    Scasb,
    Scasw,
    Shl,
    Shr,
    Stc,
    Std,
    Sti,
    Stosb,
    Stosw,
    Sub,
    Test,
    Xchg,
    Xlatb,
    Xor,
}

impl Mnemonic {
    /// Ordered list of all mnemonics.
    pub const ALL: [Self; MNEMONIC_COUNT] = [
        Self::Aaa,
        Self::Aad,
        Self::Aam,
        Self::Aas,
        Self::Adc,
        Self::Add,
        Self::And,
        Self::Call,
        Self::Cbw,
        Self::Clc,
        Self::Cld,
        Self::Cli,
        Self::Cmc,
        Self::Cmp,
        Self::Cmpsb,
        Self::Cmpsw,
        Self::Cwd,
        Self::Daa,
        Self::Das,
        Self::Dec,
        Self::Div,
        Self::Hlt,
        Self::Idiv,
        Self::Imul,
        Self::In,
        Self::Inc,
        Self::Int,
        Self::Into,
        Self::Iret,
        Self::Ja,
        Self::Jae,
        Self::Jb,
        Self::Jbe,
        Self::Jc,
        Self::Jcxz,
        Self::Je,
        Self::Jg,
        Self::Jge,
        Self::Jl,
        Self::Jmp,
        Self::Jle,
        Self::Jna,
        Self::Jnae,
        Self::Jnb,
        Self::Jnbe,
        Self::Jnc,
        Self::Jne,
        Self::Jng,
        Self::Jnge,
        Self::Jnl,
        Self::Jnle,
        Self::Jno,
        Self::Jnp,
        Self::Jns,
        Self::Jnz,
        Self::Jo,
        Self::Jp,
        Self::Jpe,
        Self::Jpo,
        Self::Js,
        Self::Jz,
        Self::Lahf,
        Self::Lds,
        Self::Lea,
        Self::Les,
        Self::Lodsb,
        Self::Lodsw,
        Self::Loop,
        Self::Loope,
        Self::Loopne,
        Self::Loopnz,
        Self::Loopz,
        Self::Mov,
        Self::Movsb,
        Self::Movsw,
        Self::Mul,
        Self::Neg,
        Self::Nop,
        Self::Not,
        Self::Or,
        Self::Out,
        Self::Pop,
        Self::Popa,
        Self::Popf,
        Self::Push,
        Self::Pusha,
        Self::Pushf,
        Self::Rcl,
        Self::Rcr,
        Self::Rep,
        Self::Repe,
        Self::Repne,
        Self::Repnz,
        Self::Repz,
        Self::Ret,
        Self::Retf,
        Self::Rol,
        Self::Ror,
        Self::Sahf,
        Self::Sal,
        Self::Sar,
        Self::Sbb,
        Self::Scasb,
        Self::Scasw,
        Self::Shl,
        Self::Shr,
        Self::Stc,
        Self::Std,
        Self::Sti,
        Self::Stosb,
        Self::Stosw,
        Self::Sub,
        Self::Test,
        Self::Xchg,
        Self::Xlatb,
        Self::Xor,
    ];

    /// Assembly spelling of the mnemonic.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aad => "AAD",
            Self::Aam => "AAM",
            Self::Aas => "AAS",
            Self::Adc => "ADC",
            Self::Add => "ADD",
            Self::And => "AND",
            Self::Call => "CALL",
            Self::Cbw => "CBW",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Cmc => "CMC",
            Self::Cmp => "CMP",
            Self::Cmpsb => "CMPSB",
            Self::Cmpsw => "CMPSW",
            Self::Cwd => "CWD",
            Self::Daa => "DAA",
            Self::Das => "DAS",
            Self::Dec => "DEC",
            Self::Div => "DIV",
            Self::Hlt => "HLT",
            Self::Idiv => "IDIV",
            Self::Imul => "IMUL",
            Self::In => "IN",
            Self::Inc => "INC",
            Self::Int => "INT",
            Self::Into => "INTO",
            Self::Iret => "IRET",
            Self::Ja => "JA",
            Self::Jae => "JAE",
            Self::Jb => "JB",
            Self::Jbe => "JBE",
            Self::Jc => "JC",
            Self::Jcxz => "JCXZ",
            Self::Je => "JE",
            Self::Jg => "JG",
            Self::Jge => "JGE",
            Self::Jl => "JL",
            Self::Jmp => "JMP",
            Self::Jle => "JLE",
            Self::Jna => "JNA",
            Self::Jnae => "JNAE",
            Self::Jnb => "JNB",
            Self::Jnbe => "JNBE",
            Self::Jnc => "JNC",
            Self::Jne => "JNE",
            Self::Jng => "JNG",
            Self::Jnge => "JNGE",
            Self::Jnl => "JNL",
            Self::Jnle => "JNLE",
            Self::Jno => "JNO",
            Self::Jnp => "JNP",
            Self::Jns => "JNS",
            Self::Jnz => "JNZ",
            Self::Jo => "JO",
            Self::Jp => "JP",
            Self::Jpe => "JPE",
            Self::Jpo => "JPO",
            Self::Js => "JS",
            Self::Jz => "JZ",
            Self::Lahf => "LAHF",
            Self::Lds => "LDS",
            Self::Lea => "LEA",
            Self::Les => "LES",
            Self::Lodsb => "LODSB",
            Self::Lodsw => "LODSW",
            Self::Loop => "LOOP",
            Self::Loope => "LOOPE",
            Self::Loopne => "LOOPNE",
            Self::Loopnz => "LOOPNZ",
            Self::Loopz => "LOOPZ",
            Self::Mov => "MOV",
            Self::Movsb => "MOVSB",
            Self::Movsw => "MOVSW",
            Self::Mul => "MUL",
            Self::Neg => "NEG",
            Self::Nop => "NOP",
            Self::Not => "NOT",
            Self::Or => "OR",
            Self::Out => "OUT",
            Self::Pop => "POP",
            Self::Popa => "POPA",
            Self::Popf => "POPF",
            Self::Push => "PUSH",
            Self::Pusha => "PUSHA",
            Self::Pushf => "PUSHF",
            Self::Rcl => "RCL",
            Self::Rcr => "RCR",
            Self::Rep => "REP",
            Self::Repe => "REPE",
            Self::Repne => "REPNE",
            Self::Repnz => "REPNZ",
            Self::Repz => "REPZ",
            Self::Ret => "RET",
            Self::Retf => "RETF",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Sahf => "SAHF",
            Self::Sal => "SAL",
            Self::Sar => "SAR",
            Self::Sbb => "SBB",
            Self::Scasb => "SCASB",
            Self::Scasw => "SCASW",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Stc => "STC",
            Self::Std => "STD",
            Self::Sti => "STI",
            Self::Stosb => "STOSB",
            Self::Stosw => "STOSW",
            Self::Sub => "SUB",
            Self::Test => "TEST",
            Self::Xchg => "XCHG",
            Self::Xlatb => "XLATB",
            Self::Xor => "XOR",
        }
    }
}

impl core::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source or destination of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Operand {
    /// Full 16-bit register.
    Register(Register),
    /// Word at a physical memory address.
    Memory(MemoryAddress),
    /// Immediate value; never legal as a destination.
    Immediate(u16),
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        Self::Register(reg)
    }
}

/// One instruction with its operands, ready for [`crate::Cpu::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Instruction {
    Add { dst: Operand, src: Operand },
    Adc { dst: Operand, src: Operand },
    Sub { dst: Operand, src: Operand },
    Sbb { dst: Operand, src: Operand },
    Cmp { dst: Operand, src: Operand },
    And { dst: Operand, src: Operand },
    Or { dst: Operand, src: Operand },
    Xor { dst: Operand, src: Operand },
    Test { dst: Operand, src: Operand },
    Mov { dst: Operand, src: Operand },
    Xchg { dst: Operand, src: Operand },
    Inc(Operand),
    Dec(Operand),
    Neg(Operand),
    Not(Operand),
    Shl { dst: Operand, count: Operand },
    Sal { dst: Operand, count: Operand },
    Shr { dst: Operand, count: Operand },
    Sar { dst: Operand, count: Operand },
    Rol { dst: Operand, count: Operand },
    Ror { dst: Operand, count: Operand },
    Rcl { dst: Operand, count: Operand },
    Rcr { dst: Operand, count: Operand },
    Push(Operand),
    Pop(Operand),
    Pusha,
    Popa,
    Pushf,
    Popf,
    Cmpsb,
    Cmpsw,
    Movsb,
    Movsw,
    Lodsb,
    Lodsw,
    Stosb,
    Stosw,
    Scasb,
    Scasw,
    Aaa,
    Aas,
    Aad,
    Aam,
    Daa,
    Das,
    Cbw,
    Cwd,
    Lahf,
    Sahf,
    Xlatb,
    Stc,
    Clc,
    Cmc,
    Std,
    Cld,
    Sti,
    Cli,
    Nop,
    Hlt,
    /// Any mnemonic whose semantics belong to the surrounding fetch loop.
    Unimplemented(Mnemonic),
}

impl Instruction {
    /// Mnemonic this instruction executes as.
    #[must_use]
    pub const fn mnemonic(&self) -> Mnemonic {
        match self {
            Self::Add { .. } => Mnemonic::Add,
            Self::Adc { .. } => Mnemonic::Adc,
            Self::Sub { .. } => Mnemonic::Sub,
            Self::Sbb { .. } => Mnemonic::Sbb,
            Self::Cmp { .. } => Mnemonic::Cmp,
            Self::And { .. } => Mnemonic::And,
            Self::Or { .. } => Mnemonic::Or,
            Self::Xor { .. } => Mnemonic::Xor,
            Self::Test { .. } => Mnemonic::Test,
            Self::Mov { .. } => Mnemonic::Mov,
            Self::Xchg { .. } => Mnemonic::Xchg,
            Self::Inc(_) => Mnemonic::Inc,
            Self::Dec(_) => Mnemonic::Dec,
            Self::Neg(_) => Mnemonic::Neg,
            Self::Not(_) => Mnemonic::Not,
            Self::Shl { .. } => Mnemonic::Shl,
            Self::Sal { .. } => Mnemonic::Sal,
            Self::Shr { .. } => Mnemonic::Shr,
            Self::Sar { .. } => Mnemonic::Sar,
            Self::Rol { .. } => Mnemonic::Rol,
            Self::Ror { .. } => Mnemonic::Ror,
            Self::Rcl { .. } => Mnemonic::Rcl,
            Self::Rcr { .. } => Mnemonic::Rcr,
            Self::Push(_) => Mnemonic::Push,
            Self::Pop(_) => Mnemonic::Pop,
            Self::Pusha => Mnemonic::Pusha,
            Self::Popa => Mnemonic::Popa,
            Self::Pushf => Mnemonic::Pushf,
            Self::Popf => Mnemonic::Popf,
            Self::Cmpsb => Mnemonic::Cmpsb,
            Self::Cmpsw => Mnemonic::Cmpsw,
            Self::Movsb => Mnemonic::Movsb,
            Self::Movsw => Mnemonic::Movsw,
            Self::Lodsb => Mnemonic::Lodsb,
            Self::Lodsw => Mnemonic::Lodsw,
            Self::Stosb => Mnemonic::Stosb,
            Self::Stosw => Mnemonic::Stosw,
            Self::Scasb => Mnemonic::Scasb,
            Self::Scasw => Mnemonic::Scasw,
            Self::Aaa => Mnemonic::Aaa,
            Self::Aas => Mnemonic::Aas,
            Self::Aad => Mnemonic::Aad,
            Self::Aam => Mnemonic::Aam,
            Self::Daa => Mnemonic::Daa,
            Self::Das => Mnemonic::Das,
            Self::Cbw => Mnemonic::Cbw,
            Self::Cwd => Mnemonic::Cwd,
            Self::Lahf => Mnemonic::Lahf,
            Self::Sahf => Mnemonic::Sahf,
            Self::Xlatb => Mnemonic::Xlatb,
            Self::Stc => Mnemonic::Stc,
            Self::Clc => Mnemonic::Clc,
            Self::Cmc => Mnemonic::Cmc,
            Self::Std => Mnemonic::Std,
            Self::Cld => Mnemonic::Cld,
            Self::Sti => Mnemonic::Sti,
            Self::Cli => Mnemonic::Cli,
            Self::Nop => Mnemonic::Nop,
            Self::Hlt => Mnemonic::Hlt,
            Self::Unimplemented(mnemonic) => *mnemonic,
        }
    }
}
