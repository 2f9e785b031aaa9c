//! Extended-float unit executor (unit code 5, slot 1 only).
//!
//! Single-issue transcendentals. Every computation lands in the scalar
//! `efu_q` register; `SETEF`/`GETEF` move values between `efu_q` and the
//! floating-point file.

use super::Core;
use crate::fault::CoreError;
use crate::isa::EfuOp;
use crate::opcode::Opcode;

pub(super) fn execute(core: &mut Core, op: Opcode) -> Result<(), CoreError> {
    let operation = EfuOp::from_code(op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    let regs = &mut core.regs;
    let left_bits = regs.gpf[op.reg_b() as usize];
    let right_bits = regs.gpf[op.reg_c() as usize];

    let single = |f: fn(f32, f32) -> f32| {
        u64::from(f(f32::from_bits(left_bits as u32), f32::from_bits(right_bits as u32)).to_bits())
    };
    let double = |f: fn(f64, f64) -> f64| {
        f(f64::from_bits(left_bits), f64::from_bits(right_bits)).to_bits()
    };

    match operation {
        EfuOp::Fdiv => {
            regs.efu_q = match op.size() {
                0 => single(|l, r| l / r),
                1 => double(|l, r| l / r),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Fatan2 => {
            regs.efu_q = match op.size() {
                0 => single(f32::atan2),
                1 => double(f64::atan2),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Fsqrt => {
            regs.efu_q = match op.size() {
                0 => single(|l, _| l.sqrt()),
                1 => double(|l, _| l.sqrt()),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Fsin => {
            regs.efu_q = match op.size() {
                0 => single(|l, _| l.sin()),
                1 => double(|l, _| l.sin()),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Fatan => {
            regs.efu_q = match op.size() {
                0 => single(|l, _| l.atan()),
                1 => double(|l, _| l.atan()),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Fexp => {
            regs.efu_q = match op.size() {
                0 => single(|l, _| l.exp()),
                1 => double(|l, _| l.exp()),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Invsqrt => {
            regs.efu_q = match op.size() {
                0 => single(|l, _| 1.0 / l.sqrt()),
                1 => double(|l, _| 1.0 / l.sqrt()),
                size => return Err(CoreError::SizeInvalid(size)),
            };
        }
        EfuOp::Setef => regs.efu_q = regs.gpf[op.reg_a() as usize],
        EfuOp::Getef => regs.gpf[op.reg_a() as usize] = regs.efu_q,
    }

    Ok(())
}
