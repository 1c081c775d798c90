//! Property coverage for memory bounds, ALU flags and instruction invariants.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless
)]

use log as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use proptest::prelude::*;
use svm_core::execute::compute;
use svm_core::{
    ArithOp, Cpu, FaultCode, Flag, Instruction, Memory, Operand, Register, Trap, Width,
    MEMORY_CAPACITY,
};

const LAST_WORD: u32 = (MEMORY_CAPACITY - 2) as u32;

fn signed_overflow(result: i32) -> bool {
    result < i32::from(i16::MIN) || result > i32::from(i16::MAX)
}

proptest! {
    #[test]
    fn property_word_write_then_read_round_trips(addr in 0..=LAST_WORD, value in any::<u16>()) {
        let mut memory = Memory::new();
        prop_assert_eq!(memory.write_word(addr, value), Ok(()));
        prop_assert_eq!(memory.read_word(addr), Ok(value));
    }

    #[test]
    fn property_out_of_bounds_word_faults_without_writing(
        addr in (LAST_WORD + 1)..=u32::MAX,
        value in any::<u16>(),
    ) {
        let mut memory = Memory::new();
        prop_assert_eq!(memory.write_word(addr, value), Err(FaultCode::SegFault));
        prop_assert_eq!(memory.read_word(addr), Err(FaultCode::SegFault));
        prop_assert!(memory.as_bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn property_and_masks_and_clears_carry_overflow(
        previous in any::<u16>(),
        operand in any::<u16>(),
        flags in any::<u16>(),
    ) {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Dx, previous);
        cpu.write(Register::Flag, flags);

        prop_assert_eq!(cpu.and(Register::Dx.into(), Operand::Immediate(operand)), Trap::Ok);
        prop_assert_eq!(cpu.read(Register::Dx), previous & operand);
        prop_assert!(!cpu.read_flag(Flag::Carry));
        prop_assert!(!cpu.read_flag(Flag::Overflow));
        prop_assert_eq!(cpu.read_flag(Flag::AuxCarry), flags & Flag::AuxCarry.mask() != 0);
    }

    #[test]
    fn property_mov_never_changes_flags(
        setup in any::<u16>(),
        value in any::<u16>(),
        addr in 0..=LAST_WORD,
    ) {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ax, setup);
        prop_assert_eq!(cpu.sub(Register::Ax.into(), Operand::Immediate(value)), Trap::Ok);
        let flags = cpu.read(Register::Flag);

        prop_assert_eq!(cpu.mov(Register::Bx.into(), Operand::Immediate(value)), Trap::Ok);
        prop_assert_eq!(cpu.mov(Operand::Memory(addr), Register::Bx.into()), Trap::Ok);
        prop_assert_eq!(cpu.mov(Register::Cx.into(), Operand::Memory(addr)), Trap::Ok);
        prop_assert_eq!(cpu.read(Register::Cx), value);
        prop_assert_eq!(cpu.read(Register::Flag), flags);
    }

    #[test]
    fn property_xchg_is_its_own_inverse(
        lhs in any::<u16>(),
        rhs in any::<u16>(),
        addr in 0..=LAST_WORD,
    ) {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Si, lhs);
        cpu.write(Register::Di, rhs);
        for _ in 0..2 {
            prop_assert_eq!(cpu.xchg(Register::Si.into(), Register::Di.into()), Trap::Ok);
        }
        prop_assert_eq!(cpu.read(Register::Si), lhs);
        prop_assert_eq!(cpu.read(Register::Di), rhs);

        cpu.memory_mut().write_word(addr, rhs).expect("in bounds");
        for _ in 0..2 {
            prop_assert_eq!(cpu.xchg(Register::Si.into(), Operand::Memory(addr)), Trap::Ok);
        }
        prop_assert_eq!(cpu.read(Register::Si), lhs);
        prop_assert_eq!(cpu.memory().read_word(addr), Ok(rhs));
    }

    #[test]
    fn property_push_pop_round_trip(
        ss in 0u16..=0xEFFF,
        sp in any::<u16>(),
        value in any::<u16>(),
    ) {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Ss, ss);
        cpu.write(Register::Sp, sp);
        cpu.write(Register::Bx, value);

        prop_assert_eq!(cpu.execute(Instruction::Push(Register::Bx.into())), Trap::Ok);
        prop_assert_eq!(cpu.execute(Instruction::Pop(Register::Cx.into())), Trap::Ok);
        prop_assert_eq!(cpu.read(Register::Cx), value);
        prop_assert_eq!(cpu.read(Register::Sp), sp);
    }

    #[test]
    fn property_carry_controls_touch_only_carry(flags in any::<u16>()) {
        let carry = Flag::Carry.mask();
        for instruction in [Instruction::Stc, Instruction::Clc, Instruction::Cmc] {
            let mut cpu = Cpu::new(Memory::new());
            cpu.write(Register::Flag, flags);
            prop_assert_eq!(cpu.execute(instruction), Trap::Ok);
            prop_assert_eq!(cpu.read(Register::Flag) & !carry, flags & !carry);
        }
    }

    #[test]
    fn property_word_add_matches_wide_arithmetic(
        dst in any::<u16>(),
        src in any::<u16>(),
        carry in any::<bool>(),
    ) {
        let out = compute(ArithOp::Add, dst, src, carry, Width::Word);
        let wide = u32::from(dst) + u32::from(src) + u32::from(carry);
        let signed = i32::from(dst as i16) + i32::from(src as i16) + i32::from(carry);

        prop_assert_eq!(out.value, wide as u16);
        prop_assert_eq!(out.flags.get(Flag::Carry), Some(wide > 0xFFFF));
        prop_assert_eq!(out.flags.get(Flag::Overflow), Some(signed_overflow(signed)));
        prop_assert_eq!(out.flags.get(Flag::Zero), Some(wide as u16 == 0));
        prop_assert_eq!(out.flags.get(Flag::Sign), Some(wide & 0x8000 != 0));
        prop_assert_eq!(
            out.flags.get(Flag::AuxCarry),
            Some((dst & 0xF) + (src & 0xF) + u16::from(carry) > 0xF)
        );
    }

    #[test]
    fn property_word_sub_matches_wide_arithmetic(
        dst in any::<u16>(),
        src in any::<u16>(),
        borrow in any::<bool>(),
    ) {
        let out = compute(ArithOp::Sub, dst, src, borrow, Width::Word);
        let signed = i32::from(dst as i16) - i32::from(src as i16) - i32::from(borrow);
        let expected = dst.wrapping_sub(src).wrapping_sub(u16::from(borrow));

        prop_assert_eq!(out.value, expected);
        prop_assert_eq!(
            out.flags.get(Flag::Carry),
            Some(u32::from(dst) < u32::from(src) + u32::from(borrow))
        );
        prop_assert_eq!(out.flags.get(Flag::Overflow), Some(signed_overflow(signed)));
        prop_assert_eq!(out.flags.get(Flag::Zero), Some(expected == 0));
    }

    #[test]
    fn property_byte_add_carries_out_of_bit_seven(dst in any::<u8>(), src in any::<u8>()) {
        let out = compute(ArithOp::Add, u16::from(dst), u16::from(src), false, Width::Byte);
        let (sum, carried) = dst.overflowing_add(src);

        prop_assert_eq!(out.value, u16::from(sum));
        prop_assert_eq!(out.flags.get(Flag::Carry), Some(carried));
        prop_assert_eq!(out.flags.get(Flag::Sign), Some(sum & 0x80 != 0));
        prop_assert_eq!(
            out.flags.get(Flag::Overflow),
            Some((dst as i8).checked_add(src as i8).is_none())
        );
    }

    #[test]
    fn property_inc_dec_preserve_carry(value in any::<u16>(), carry in any::<bool>()) {
        let mut cpu = Cpu::new(Memory::new());
        cpu.write(Register::Bp, value);
        cpu.write_flag(Flag::Carry, carry);

        prop_assert_eq!(cpu.execute(Instruction::Inc(Register::Bp.into())), Trap::Ok);
        prop_assert_eq!(cpu.read_flag(Flag::Carry), carry);
        prop_assert_eq!(cpu.execute(Instruction::Dec(Register::Bp.into())), Trap::Ok);
        prop_assert_eq!(cpu.read_flag(Flag::Carry), carry);
        prop_assert_eq!(cpu.read(Register::Bp), value);
    }
}
