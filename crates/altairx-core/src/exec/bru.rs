//! Branch unit executor (unit code 7, slot 1 only).
//!
//! Displacements are in bundle units: the program counter moves by whole
//! 32-bit words. The calls record `pc + 1 + is_bundle` so a return lands on
//! the word after the issuing bundle.

use super::Core;
use crate::bits::sext_bits;
use crate::fault::CoreError;
use crate::isa::BruOp;
use crate::opcode::Opcode;
use crate::regs::{C_MASK, N_MASK, O_MASK, REG_LR, U_MASK, Z_MASK};

pub(super) fn execute(core: &mut Core, op: Opcode, imm24: u64) -> Result<(), CoreError> {
    let operation = BruOp::from_code(op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    let regs = &mut core.regs;

    let relative23 = (sext_bits(u64::from(op.bru_imm23()), 23) ^ (imm24 << 22)) as i64;
    let relative24 = (sext_bits(u64::from(op.bru_imm24()), 24) ^ (imm24 << 23)) as i64;
    let absolute24 = u64::from(op.bru_imm24()) | (imm24 << 24);
    let link = u64::from(regs.pc.wrapping_add(1).wrapping_add(u32::from(op.is_bundle())));

    let z = regs.flag(Z_MASK);
    let c = regs.flag(C_MASK);
    let n = regs.flag(N_MASK);
    let o = regs.flag(O_MASK);
    let u = regs.flag(U_MASK);

    let taken = match operation {
        BruOp::Beq => z && !u,
        BruOp::Bne => !z && !u,
        BruOp::Blt => (n != o) && !u,
        BruOp::Bge => (z || n == o) && !u,
        BruOp::Bltu => c || u,
        BruOp::Bgeu => z || !c || u,
        BruOp::Bequ => z || u,
        BruOp::Bneu => !z || u,
        _ => false,
    };

    let add_pc = |pc: u32, displacement: i64| (i64::from(pc).wrapping_add(displacement)) as u32;

    match operation {
        BruOp::Beq
        | BruOp::Bne
        | BruOp::Blt
        | BruOp::Bge
        | BruOp::Bltu
        | BruOp::Bgeu
        | BruOp::Bequ
        | BruOp::Bneu => {
            if taken {
                regs.pc = add_pc(regs.pc, relative23);
            }
        }
        BruOp::Bra => regs.pc = add_pc(regs.pc, relative24),
        BruOp::Callr => {
            regs.gpi[REG_LR] = link;
            regs.pc = add_pc(regs.pc, relative24);
        }
        BruOp::Jump => regs.pc = absolute24 as u32,
        BruOp::Call => {
            regs.gpi[REG_LR] = link;
            regs.pc = absolute24 as u32;
        }
        BruOp::Indirectcallr => {
            regs.gpi[op.reg_a() as usize] = link;
            let target = regs.gpi[op.reg_b() as usize] as i64;
            regs.pc = add_pc(regs.pc, target);
        }
        BruOp::Indirectcall => {
            regs.gpi[op.reg_a() as usize] = link;
            regs.pc = regs.gpi[op.reg_b() as usize] as u32;
        }
    }

    Ok(())
}
