//! Floating-point unit executor (unit code 3, both slots).
//!
//! Register bits are reinterpreted per operation size. Results that are not
//! normal or zero decay to quiet NaN on writeback; integer-valued results
//! (set-compares, conversions to integer, raw moves) are stored as raw bits.

use super::Core;
use crate::bits::{float_to_half, half_to_float, Real};
use crate::fault::CoreError;
use crate::flags::compare_float;
use crate::isa::FpuOp;
use crate::opcode::Opcode;
use crate::regs::{RegisterSet, REG_ACC, REG_BF1};

fn read_bits(regs: &RegisterSet, reg: u32) -> u64 {
    let reg = reg as usize;
    if reg == REG_ACC {
        regs.gpf[REG_BF1]
    } else {
        regs.gpf[reg]
    }
}

fn write_bits(regs: &mut RegisterSet, dest: usize, bypass: usize, bits: u64) {
    regs.gpf[bypass] = bits;
    if dest != REG_ACC {
        regs.gpf[dest] = bits;
    }
}

fn write_real<F: Real>(regs: &mut RegisterSet, dest: usize, bypass: usize, value: F) {
    let value = if value.is_real() { value } else { F::NAN };
    write_bits(regs, dest, bypass, value.to_bits64());
}

fn min<F: Real>(left: F, right: F) -> F {
    if right < left {
        right
    } else {
        left
    }
}

fn max<F: Real>(left: F, right: F) -> F {
    if left < right {
        right
    } else {
        left
    }
}

#[allow(clippy::too_many_lines)]
pub(super) fn execute(core: &mut Core, op: Opcode, slot: u32) -> Result<(), CoreError> {
    let operation = FpuOp::from_code(op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    let dest = op.reg_a() as usize;
    let bypass = REG_BF1 + slot as usize;
    let size = op.size();
    let bad_size = CoreError::SizeInvalid(size);

    let regs = &mut core.regs;
    let left_bits = read_bits(regs, op.reg_b());
    let right_bits = read_bits(regs, op.reg_c());
    let lf = f32::from_bits64(left_bits);
    let rf = f32::from_bits64(right_bits);
    let ld = f64::from_bits64(left_bits);
    let rd = f64::from_bits64(right_bits);

    match operation {
        FpuOp::Fadd => match size {
            0 => write_real(regs, dest, bypass, lf + rf),
            1 => write_real(regs, dest, bypass, ld + rd),
            // htof
            3 => write_real(regs, dest, bypass, half_to_float(left_bits as u16)),
            _ => return Err(bad_size),
        },
        FpuOp::Fsub => match size {
            0 => write_real(regs, dest, bypass, lf - rf),
            1 => write_real(regs, dest, bypass, ld - rd),
            // ftoh
            3 => write_bits(regs, dest, bypass, u64::from(float_to_half(lf))),
            _ => return Err(bad_size),
        },
        FpuOp::Fmul => match size {
            0 => write_real(regs, dest, bypass, lf * rf),
            1 => write_real(regs, dest, bypass, ld * rd),
            // itof
            3 => write_real(regs, dest, bypass, left_bits as i64 as f32),
            _ => return Err(bad_size),
        },
        FpuOp::Fnmul => match size {
            0 => write_real(regs, dest, bypass, -lf * rf),
            1 => write_real(regs, dest, bypass, -ld * rd),
            // ftoi
            3 => write_bits(regs, dest, bypass, lf as i64 as u64),
            _ => return Err(bad_size),
        },
        FpuOp::Fmin => match size {
            0 => write_real(regs, dest, bypass, min(lf, rf)),
            1 => write_real(regs, dest, bypass, min(ld, rd)),
            // ftod
            3 => write_real(regs, dest, bypass, f64::from(lf)),
            _ => return Err(bad_size),
        },
        FpuOp::Fmax => match size {
            0 => write_real(regs, dest, bypass, max(lf, rf)),
            1 => write_real(regs, dest, bypass, max(ld, rd)),
            // dtof
            3 => write_real(regs, dest, bypass, ld as f32),
            _ => return Err(bad_size),
        },
        FpuOp::Fneg => match size {
            0 => write_real(regs, dest, bypass, -lf),
            1 => write_real(regs, dest, bypass, -ld),
            // itod
            3 => write_real(regs, dest, bypass, left_bits as i64 as f64),
            _ => return Err(bad_size),
        },
        FpuOp::Fabs => match size {
            0 => write_real(regs, dest, bypass, lf.abs()),
            1 => write_real(regs, dest, bypass, ld.abs()),
            // dtoi
            3 => write_bits(regs, dest, bypass, ld as i64 as u64),
            _ => return Err(bad_size),
        },
        FpuOp::Fcmove => {
            // Values are only copied, so the test and the move use raw bits.
            if left_bits as i64 != 0 {
                write_bits(regs, dest, bypass, right_bits);
            }
        }
        FpuOp::Fe => match size {
            0 => write_bits(regs, dest, bypass, u64::from(lf == rf)),
            1 => write_bits(regs, dest, bypass, u64::from(ld == rd)),
            _ => return Err(bad_size),
        },
        FpuOp::Fen => match size {
            0 => write_bits(regs, dest, bypass, u64::from(lf != rf)),
            1 => write_bits(regs, dest, bypass, u64::from(ld != rd)),
            _ => return Err(bad_size),
        },
        FpuOp::Fslt => match size {
            0 => write_bits(regs, dest, bypass, u64::from(lf < rf)),
            1 => write_bits(regs, dest, bypass, u64::from(ld < rd)),
            _ => return Err(bad_size),
        },
        FpuOp::Fmove => write_bits(regs, dest, bypass, left_bits),
        FpuOp::Fcmp => match size {
            0 => compare_float(&mut regs.fr, lf, rf),
            1 => compare_float(&mut regs.fr, ld, rd),
            _ => return Err(bad_size),
        },
    }

    Ok(())
}
