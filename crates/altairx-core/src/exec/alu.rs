//! Integer ALU executor (unit codes 0 and 1, both slots).

use super::Core;
use crate::bits::{sext_bits, sext_bytes, size_mask};
use crate::fault::CoreError;
use crate::flags::compare_int;
use crate::isa::AluOp;
use crate::opcode::Opcode;
use crate::regs::{RegisterSet, REG_ACC, REG_BA1};

fn read_reg(regs: &RegisterSet, reg: u32) -> u64 {
    let reg = reg as usize;
    if reg == REG_ACC {
        // The accumulator resolves to the unit's slot-1 bypass cell, so a
        // slot-2 operand observes the slot-1 result of the same bundle.
        regs.gpi[REG_BA1]
    } else {
        regs.gpi[reg]
    }
}

pub(super) fn execute(core: &mut Core, op: Opcode, slot: u32, imm24: u64) -> Result<(), CoreError> {
    let operation = AluOp::from_code(op.unit(), op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    let dest = op.reg_a() as usize;
    let bypass = REG_BA1 + slot as usize;

    let left = read_reg(&core.regs, op.reg_b());
    let right = if op.alu_has_imm() {
        sext_bits(u64::from(op.alu_imm9()), 9) ^ (imm24 << 8)
    } else {
        read_reg(&core.regs, op.reg_c()).wrapping_shl(op.alu_shift())
    };

    let mask = size_mask(op.size());
    let trunc = |value: u64| value & mask;
    let sext = |value: u64| sext_bytes(value, 1 << op.size());

    let write = |regs: &mut RegisterSet, value: u64| {
        regs.gpi[bypass] = value;
        if dest != REG_ACC {
            regs.gpi[dest] = value;
        }
    };

    match operation {
        // Data-only in slot 2, a plain no-op in slot 1.
        AluOp::Moveix => {}

        AluOp::Movei => write(
            &mut core.regs,
            sext_bits(u64::from(op.alu_move_imm()), 18) ^ (imm24 << 18),
        ),

        AluOp::Ext => write(
            &mut core.regs,
            (left >> op.ext_ins_imm1()) & (1u64 << op.ext_ins_imm2()).wrapping_sub(1),
        ),

        AluOp::Ins => {
            let field = (left << op.ext_ins_imm1()) & (1u64 << op.ext_ins_imm2()).wrapping_sub(1);
            if dest == REG_ACC {
                core.regs.gpi[bypass] |= core.regs.gpi[REG_ACC];
            } else {
                core.regs.gpi[dest] |= field;
                core.regs.gpi[bypass] = core.regs.gpi[dest];
            }
        }

        AluOp::Max | AluOp::Umax | AluOp::Min | AluOp::Umin => {
            return Err(CoreError::NotImplemented)
        }

        AluOp::Adds => write(&mut core.regs, sext(trunc(left).wrapping_add(trunc(right)))),
        AluOp::Subs => write(&mut core.regs, sext(trunc(left).wrapping_sub(trunc(right)))),

        AluOp::Cmp => compare_int(&mut core.regs.fr, left, right, op.size()),

        AluOp::Bit | AluOp::Test | AluOp::Testfr => return Err(CoreError::NotImplemented),

        AluOp::Add => write(
            &mut core.regs,
            trunc(trunc(left).wrapping_add(trunc(right))),
        ),
        AluOp::Sub => write(
            &mut core.regs,
            trunc(trunc(left).wrapping_sub(trunc(right))),
        ),
        AluOp::Xor => write(&mut core.regs, trunc(left) ^ trunc(right)),
        AluOp::Or => write(&mut core.regs, trunc(left) | trunc(right)),
        AluOp::And => write(&mut core.regs, trunc(left) & trunc(right)),

        // Shift amounts wrap modulo the register width.
        AluOp::Lsl => write(
            &mut core.regs,
            trunc(trunc(left).wrapping_shl(trunc(right) as u32)),
        ),
        AluOp::Asr => write(
            &mut core.regs,
            trunc((sext(trunc(left)) as i64).wrapping_shr(sext(trunc(right)) as u32) as u64),
        ),
        AluOp::Lsr => write(
            &mut core.regs,
            trunc(trunc(left).wrapping_shr(trunc(right) as u32)),
        ),

        AluOp::Se => write(&mut core.regs, u64::from(trunc(left) == trunc(right))),
        AluOp::Sen => write(&mut core.regs, u64::from(trunc(left) != trunc(right))),
        AluOp::Slts => write(
            &mut core.regs,
            u64::from((sext(trunc(left)) as i64) < sext(trunc(right)) as i64),
        ),
        AluOp::Sltu => write(&mut core.regs, u64::from(trunc(left) < trunc(right))),
        AluOp::Sand => write(&mut core.regs, u64::from(trunc(left) & trunc(right) != 0)),
        AluOp::Sbit => write(
            &mut core.regs,
            u64::from(trunc(left) & trunc(right) == trunc(right)),
        ),

        AluOp::Cmoven => {
            if trunc(left) == 0 {
                write(&mut core.regs, trunc(right));
            }
        }
        AluOp::Cmove => {
            if trunc(left) != 0 {
                write(&mut core.regs, trunc(right));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::exec::Core;
    use crate::isa::AluOp;
    use crate::memory::Memory;
    use crate::opcode::Opcode;
    use crate::regs::{REG_ACC, REG_BA1, REG_BA2, Z_MASK};

    fn core() -> Core {
        Core::new(Memory::new(8, 8, 8))
    }

    fn run(core: &mut Core, word: Opcode) {
        core.execute(word, Opcode::noop()).unwrap();
    }

    #[test]
    fn add_wraps_at_the_operand_width() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0xFF;
        core.registers_mut().gpi[2] = 1;

        run(&mut core, Opcode::alu_reg(AluOp::Add, 0, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0);

        run(&mut core, Opcode::alu_reg(AluOp::Add, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0x100);
    }

    #[test]
    fn adds_sign_extends_its_truncated_result() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0x7F;
        core.registers_mut().gpi[2] = 1;
        run(&mut core, Opcode::alu_reg(AluOp::Adds, 0, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0xFFFF_FFFF_FFFF_FF80);
    }

    #[test]
    fn register_form_right_operand_is_scaled() {
        let mut core = core();
        core.registers_mut().gpi[1] = 1;
        core.registers_mut().gpi[2] = 3;
        run(&mut core, Opcode::alu_reg(AluOp::Add, 3, 3, 1, 2, 4));
        assert_eq!(core.registers().gpi[3], 1 + (3 << 4));
    }

    #[test]
    fn immediate_form_sign_extends_nine_bits() {
        let mut core = core();
        core.registers_mut().gpi[1] = 10;
        run(&mut core, Opcode::alu_imm(AluOp::Add, 3, 2, 1, 0x1FF));
        assert_eq!(core.registers().gpi[2], 9);
    }

    #[test]
    fn movei_writes_the_sign_extended_wide_immediate() {
        let mut core = core();
        run(&mut core, Opcode::movei(5, 0x3_FFFF));
        assert_eq!(core.registers().gpi[5], u64::MAX);

        run(&mut core, Opcode::movei(5, 0x1_0000));
        assert_eq!(core.registers().gpi[5], 0x1_0000);
    }

    #[test]
    fn ext_extracts_a_bitfield() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0xABCD_1234;
        run(&mut core, Opcode::alu_bitfield(AluOp::Ext, 2, 1, 16, 8));
        assert_eq!(core.registers().gpi[2], 0xCD);
    }

    #[test]
    fn ins_ors_the_masked_field_into_the_destination() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0xFF;
        core.registers_mut().gpi[2] = 0xF000_0000_0000_000F;
        run(&mut core, Opcode::alu_bitfield(AluOp::Ins, 2, 1, 8, 16));
        assert_eq!(core.registers().gpi[2], 0xF000_0000_0000_FF0F);
        assert_eq!(core.registers().gpi[REG_BA1], 0xF000_0000_0000_FF0F);
    }

    #[test]
    fn set_ops_produce_zero_or_one() {
        let mut core = core();
        core.registers_mut().gpi[1] = 5;
        core.registers_mut().gpi[2] = 5;
        run(&mut core, Opcode::alu_reg(AluOp::Se, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 1);

        run(&mut core, Opcode::alu_reg(AluOp::Sen, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0);

        core.registers_mut().gpi[1] = u64::MAX; // -1 signed, max unsigned
        core.registers_mut().gpi[2] = 1;
        run(&mut core, Opcode::alu_reg(AluOp::Slts, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 1);
        run(&mut core, Opcode::alu_reg(AluOp::Sltu, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0);
    }

    #[test]
    fn sand_and_sbit_test_masks() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0b1010;
        core.registers_mut().gpi[2] = 0b0010;
        run(&mut core, Opcode::alu_reg(AluOp::Sand, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 1);
        run(&mut core, Opcode::alu_reg(AluOp::Sbit, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 1);

        core.registers_mut().gpi[2] = 0b0110;
        run(&mut core, Opcode::alu_reg(AluOp::Sbit, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0);
    }

    #[test]
    fn conditional_moves_check_the_left_operand() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0;
        core.registers_mut().gpi[2] = 7;
        core.registers_mut().gpi[3] = 99;
        run(&mut core, Opcode::alu_reg(AluOp::Cmove, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 99);
        run(&mut core, Opcode::alu_reg(AluOp::Cmoven, 3, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 7);
    }

    #[test]
    fn shifts_operate_within_the_selected_width() {
        let mut core = core();
        core.registers_mut().gpi[1] = 0x80;
        core.registers_mut().gpi[2] = 1;
        run(&mut core, Opcode::alu_reg(AluOp::Lsl, 0, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0);

        run(&mut core, Opcode::alu_reg(AluOp::Lsr, 0, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0x40);

        // Arithmetic shift drags the width-local sign bit.
        run(&mut core, Opcode::alu_reg(AluOp::Asr, 0, 3, 1, 2, 0));
        assert_eq!(core.registers().gpi[3], 0xC0);
    }

    #[test]
    fn cmp_only_touches_the_flag_register() {
        let mut core = core();
        core.registers_mut().gpi[1] = 3;
        core.registers_mut().gpi[2] = 3;
        run(&mut core, Opcode::alu_reg(AluOp::Cmp, 3, 0, 1, 2, 0));
        assert_eq!(core.registers().fr, Z_MASK);
        assert_eq!(core.registers().gpi[0], 0);
    }

    #[test]
    fn acc_destination_writes_only_the_slot_bypass_cell() {
        let mut core = core();
        core.registers_mut().gpi[1] = 11;
        core.registers_mut().gpi[2] = 31;
        run(
            &mut core,
            Opcode::alu_reg(AluOp::Add, 3, REG_ACC as u32, 1, 2, 0),
        );
        assert_eq!(core.registers().gpi[REG_ACC], 0);
        assert_eq!(core.registers().gpi[REG_BA1], 42);
        assert_eq!(core.registers().gpi[REG_BA2], 0);
    }

    #[test]
    fn reserved_alu_operations_fail() {
        let mut core = core();
        for op in [AluOp::Max, AluOp::Umin, AluOp::Bit, AluOp::Testfr] {
            let word = Opcode::alu_reg(op, 3, 1, 2, 3, 0);
            assert!(core.execute(word, Opcode::noop()).is_err());
        }
    }
}
