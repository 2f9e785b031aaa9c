//! Load/store unit executor (unit code 2, both slots).

use super::Core;
use crate::bits::{sext_bits, sext_bytes};
use crate::fault::CoreError;
use crate::isa::LsuOp;
use crate::opcode::Opcode;
use crate::regs::{RegisterSet, REG_ACC, REG_BL1};

fn read_int(regs: &RegisterSet, reg: u32) -> u64 {
    let reg = reg as usize;
    if reg == REG_ACC {
        regs.gpi[REG_BL1]
    } else {
        regs.gpi[reg]
    }
}

fn read_float(regs: &RegisterSet, reg: u32) -> u64 {
    let reg = reg as usize;
    if reg == REG_ACC {
        regs.gpf[REG_BL1]
    } else {
        regs.gpf[reg]
    }
}

fn write_int(regs: &mut RegisterSet, dest: usize, bypass: usize, value: u64) {
    regs.gpi[bypass] = value;
    if dest != REG_ACC {
        regs.gpi[dest] = value;
    }
}

fn write_float(regs: &mut RegisterSet, dest: usize, bypass: usize, value: u64) {
    regs.gpf[bypass] = value;
    if dest != REG_ACC {
        regs.gpf[dest] = value;
    }
}

pub(super) fn execute(core: &mut Core, op: Opcode, slot: u32, imm24: u64) -> Result<(), CoreError> {
    let operation = LsuOp::from_code(op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    let dest = op.reg_a() as usize;
    let bypass = REG_BL1 + slot as usize;

    let addr = if operation.is_immediate_form() {
        let offset = sext_bits(u64::from(op.lsu_imm10()), 10) ^ (imm24 << 9);
        (read_int(&core.regs, op.reg_b()) as i64).wrapping_add(offset as i64) as u64
    } else {
        read_int(&core.regs, op.reg_b())
            .wrapping_add(read_int(&core.regs, op.reg_c()).wrapping_shl(op.lsu_shift()))
    };

    // Float forms remap their size code onto the integer widths: 0 (f32)
    // loads 4 bytes, 1 (f64) loads 8.
    let float_len = || -> Result<usize, CoreError> {
        if op.size() > 1 {
            return Err(CoreError::SizeInvalid(op.size()));
        }
        Ok(1usize << (op.size() + 2))
    };
    let int_len = 1usize << op.size();

    match operation {
        LsuOp::Ld | LsuOp::Ldi => {
            let value = core.memory.load(addr, int_len)?;
            write_int(&mut core.regs, dest, bypass, value);
        }
        LsuOp::Lds | LsuOp::Ldis => {
            let value = core.memory.load(addr, int_len)?;
            write_int(
                &mut core.regs,
                dest,
                bypass,
                sext_bytes(value, 1 << op.size()),
            );
        }
        LsuOp::Fld | LsuOp::Fldi => {
            let value = core.memory.load(addr, float_len()?)?;
            write_float(&mut core.regs, dest, bypass, value);
        }
        LsuOp::St | LsuOp::Sti => {
            let value = read_int(&core.regs, op.reg_a());
            core.memory.store(addr, int_len, value)?;
        }
        LsuOp::Fst | LsuOp::Fsti => {
            let value = read_float(&core.regs, op.reg_a());
            core.memory.store(addr, float_len()?, value)?;
        }
    }

    Ok(())
}
