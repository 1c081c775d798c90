#![no_main]

use libfuzzer_sys::fuzz_target;
use svm_core::{
    Cpu, Instruction, Memory, Mnemonic, Operand, Register, Trap, MEMORY_CAPACITY, MNEMONIC_COUNT,
    REGISTER_COUNT,
};

fn operand(kind: u8, hi: u8, lo: u8) -> Operand {
    let word = u16::from_be_bytes([hi, lo]);
    match kind % 3 {
        0 => Operand::Register(Register::ALL[usize::from(hi) % REGISTER_COUNT]),
        // Shifted so that addresses reach past the end of memory.
        1 => Operand::Memory(u32::from(word) << 5),
        _ => Operand::Immediate(word),
    }
}

fn instruction(bytes: &[u8]) -> Instruction {
    let dst = operand(bytes[1], bytes[2], bytes[3]);
    let src = operand(bytes[4], bytes[5], bytes[6]);
    match bytes[0] % 64 {
        0 => Instruction::Add { dst, src },
        1 => Instruction::Adc { dst, src },
        2 => Instruction::Sub { dst, src },
        3 => Instruction::Sbb { dst, src },
        4 => Instruction::Cmp { dst, src },
        5 => Instruction::And { dst, src },
        6 => Instruction::Or { dst, src },
        7 => Instruction::Xor { dst, src },
        8 => Instruction::Test { dst, src },
        9 => Instruction::Mov { dst, src },
        10 => Instruction::Xchg { dst, src },
        11 => Instruction::Inc(dst),
        12 => Instruction::Dec(dst),
        13 => Instruction::Neg(dst),
        14 => Instruction::Not(dst),
        15 => Instruction::Shl { dst, count: src },
        16 => Instruction::Sal { dst, count: src },
        17 => Instruction::Shr { dst, count: src },
        18 => Instruction::Sar { dst, count: src },
        19 => Instruction::Rol { dst, count: src },
        20 => Instruction::Ror { dst, count: src },
        21 => Instruction::Rcl { dst, count: src },
        22 => Instruction::Rcr { dst, count: src },
        23 => Instruction::Push(src),
        24 => Instruction::Pop(dst),
        25 => Instruction::Pusha,
        26 => Instruction::Popa,
        27 => Instruction::Pushf,
        28 => Instruction::Popf,
        29 => Instruction::Cmpsb,
        30 => Instruction::Cmpsw,
        31 => Instruction::Movsb,
        32 => Instruction::Movsw,
        33 => Instruction::Lodsb,
        34 => Instruction::Lodsw,
        35 => Instruction::Stosb,
        36 => Instruction::Stosw,
        37 => Instruction::Scasb,
        38 => Instruction::Scasw,
        39 => Instruction::Aaa,
        40 => Instruction::Aas,
        41 => Instruction::Aad,
        42 => Instruction::Aam,
        43 => Instruction::Daa,
        44 => Instruction::Das,
        45 => Instruction::Cbw,
        46 => Instruction::Cwd,
        47 => Instruction::Lahf,
        48 => Instruction::Sahf,
        49 => Instruction::Xlatb,
        50 => Instruction::Stc,
        51 => Instruction::Clc,
        52 => Instruction::Cmc,
        53 => Instruction::Std,
        54 => Instruction::Cld,
        55 => Instruction::Sti,
        56 => Instruction::Cli,
        57 => Instruction::Nop,
        58 => Instruction::Hlt,
        _ => Instruction::Unimplemented(Mnemonic::ALL[usize::from(bytes[2]) % MNEMONIC_COUNT]),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut cpu = Cpu::new(Memory::new());
    for chunk in data.chunks_exact(7) {
        let instruction = instruction(chunk);
        let before = *cpu.registers();
        let trap = cpu.execute(instruction);

        if trap == Trap::Illegal {
            assert_eq!(cpu.registers(), &before, "{instruction:?}");
        }
        assert_eq!(cpu.memory().capacity(), MEMORY_CAPACITY);
    }
});
