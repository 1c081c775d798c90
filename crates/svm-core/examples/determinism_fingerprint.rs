//! Deterministic execution fingerprint for cross-host comparison.

use log as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use svm_core::{
    CoreConfig, CoreSnapshot, Cpu, Instruction, Memory, Operand, Register, SnapshotVersion, Trap,
};
use thiserror as _;

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

const fn load(reg: Register, value: u16) -> Instruction {
    Instruction::Mov {
        dst: Operand::Register(reg),
        src: Operand::Immediate(value),
    }
}

fn program() -> Vec<Instruction> {
    vec![
        load(Register::Ss, 0x8000),
        load(Register::Sp, 0xFFFE),
        load(Register::Ds, 0x0100),
        load(Register::Es, 0x0200),
        load(Register::Ax, 0x0038),
        Instruction::Add {
            dst: Register::Ax.into(),
            src: Operand::Immediate(0x0045),
        },
        Instruction::Daa,
        Instruction::Pusha,
        Instruction::Stosw,
        Instruction::Movsw,
        Instruction::Rcl {
            dst: Register::Ax.into(),
            count: Operand::Immediate(3),
        },
        Instruction::Xchg {
            dst: Register::Ax.into(),
            src: Operand::Memory(0x2000),
        },
        Instruction::Popa,
        Instruction::Unimplemented(svm_core::Mnemonic::Jmp),
        Instruction::Hlt,
    ]
}

fn fingerprint() -> String {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    let mut cpu = Cpu::new(Memory::new());
    let program = program();
    let (first, second) = program.split_at(7);

    for &instruction in first {
        hash_bytes(&mut hash, &[cpu.execute(instruction).as_u8()]);
    }

    let snapshot = CoreSnapshot::from_cpu(SnapshotVersion::V1, &cpu);
    let mut cpu = snapshot
        .restore(&CoreConfig::default())
        .expect("snapshot should restore");

    for &instruction in second {
        let trap = cpu.execute(instruction);
        hash_bytes(&mut hash, &[trap.as_u8()]);
        if trap == Trap::Halt {
            break;
        }
    }

    for reg in Register::ALL {
        hash_bytes(&mut hash, &cpu.read(reg).to_le_bytes());
    }
    hash_bytes(&mut hash, cpu.memory().as_bytes());

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
