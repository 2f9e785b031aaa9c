//! Randomized compare-and-branch conformance across operand widths.
//!
//! For every integer width the flag register produced by `CMP` must drive
//! the conditional branches exactly like the corresponding native Rust
//! comparison; the float matrix includes NaN, infinities and signed zeros.

use altairx_core::isa::{AluOp, BruOp, FpuOp};
use altairx_core::{Core, Memory, Opcode};

use proptest::prelude::*;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

fn fresh_core() -> Core {
    Core::new(Memory::new(8, 8, 8))
}

/// Runs a compare followed by a conditional branch and reports whether the
/// branch was taken.
fn compare_and_branch(core: &mut Core, compare: Opcode, branch: BruOp) -> bool {
    core.execute(compare, Opcode::noop()).unwrap();
    core.registers_mut().pc = 1000;
    let count = core
        .execute(Opcode::bru_cond(branch, 1), Opcode::noop())
        .unwrap();
    match count {
        0 => {
            assert_eq!(core.registers().pc, 1001);
            true
        }
        _ => {
            assert_eq!(core.registers().pc, 1000);
            false
        }
    }
}

fn int_taken(left: u64, right: u64, size: u32, branch: BruOp) -> bool {
    let mut core = fresh_core();
    core.registers_mut().gpi[1] = left;
    core.registers_mut().gpi[2] = right;
    compare_and_branch(
        &mut core,
        Opcode::alu_reg(AluOp::Cmp, size, 0, 1, 2, 0),
        branch,
    )
}

macro_rules! int_conformance {
    ($name:ident, $signed:ty, $unsigned:ty, $size:expr) => {
        proptest! {
            #[test]
            fn $name(left: u64, right: u64) {
                let sl = left as $signed;
                let sr = right as $signed;
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Beq), sl == sr);
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Bne), sl != sr);
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Blt), sl < sr);
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Bge), sl >= sr);

                let ul = left as $unsigned;
                let ur = right as $unsigned;
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Bltu), ul < ur);
                prop_assert_eq!(int_taken(left, right, $size, BruOp::Bgeu), ul >= ur);
            }
        }
    };
}

int_conformance!(byte_compares_match_native_comparisons, i8, u8, 0);
int_conformance!(half_compares_match_native_comparisons, i16, u16, 1);
int_conformance!(word_compares_match_native_comparisons, i32, u32, 2);
int_conformance!(dword_compares_match_native_comparisons, i64, u64, 3);

#[test]
fn width_boundaries_compare_exactly() {
    for (left, right) in [
        (0u64, 0u64),
        (0, u64::MAX),
        (u64::MAX, 0),
        (i64::MIN as u64, i64::MAX as u64),
        (i64::MAX as u64, i64::MIN as u64),
        (0x7F, 0x80),
        (0x80, 0x7F),
    ] {
        assert_eq!(
            int_taken(left, right, 3, BruOp::Blt),
            (left as i64) < right as i64
        );
        assert_eq!(int_taken(left, right, 3, BruOp::Bltu), left < right);
        assert_eq!(
            int_taken(left, right, 0, BruOp::Blt),
            (left as i8) < right as i8
        );
        assert_eq!(
            int_taken(left, right, 0, BruOp::Bgeu),
            (left as u8) >= right as u8
        );
    }
}

fn representable(value: f64) -> bool {
    value == 0.0 || value.is_normal()
}

fn float_taken(left: f64, right: f64, double: bool, branch: BruOp) -> bool {
    let mut core = fresh_core();
    let size = if double {
        core.registers_mut().gpf[1] = left.to_bits();
        core.registers_mut().gpf[2] = right.to_bits();
        1
    } else {
        core.registers_mut().gpf[1] = u64::from((left as f32).to_bits());
        core.registers_mut().gpf[2] = u64::from((right as f32).to_bits());
        0
    };
    compare_and_branch(
        &mut core,
        Opcode::fpu(FpuOp::Fcmp, size, 0, 1, 2),
        branch,
    )
}

fn float_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(1.0),
        Just(-1.0),
        Just(f64::MAX),
        Just(f64::MIN),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1.0e300..1.0e300f64,
    ]
}

proptest! {
    #[test]
    fn double_compares_respect_ordering_and_unorderedness(
        left in float_strategy(),
        right in float_strategy(),
    ) {
        let ordered = representable(left) && representable(right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Beq), ordered && left == right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bequ), !ordered || left == right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bne), ordered && left != right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bneu), !ordered || left != right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Blt), ordered && left < right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bltu), !ordered || left < right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bge), ordered && left >= right);
        prop_assert_eq!(float_taken(left, right, true, BruOp::Bgeu), !ordered || left >= right);
    }

    #[test]
    fn single_compares_respect_ordering_and_unorderedness(
        left_bits: u32,
        right_bits: u32,
    ) {
        let left = f32::from_bits(left_bits);
        let right = f32::from_bits(right_bits);
        let ordered = (left == 0.0 || left.is_normal()) && (right == 0.0 || right.is_normal());

        prop_assert_eq!(
            float_taken(f64::from(left), f64::from(right), false, BruOp::Beq),
            ordered && left == right
        );
        prop_assert_eq!(
            float_taken(f64::from(left), f64::from(right), false, BruOp::Blt),
            ordered && left < right
        );
        prop_assert_eq!(
            float_taken(f64::from(left), f64::from(right), false, BruOp::Bgeu),
            !ordered || left >= right
        );
    }
}
