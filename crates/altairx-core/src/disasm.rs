//! Textual mirror of the decode and dispatch taxonomy.
//!
//! Produces one line per opcode with named registers, size suffixes and
//! immediates that already include any `MOVEIX` extension. Unknown encodings
//! render as raw `.word` directives instead of failing.

use crate::bits::sext_bits;
use crate::isa::{AluOp, BruOp, CuOp, EfuOp, FpuOp, LsuOp, MduOp};
use crate::opcode::Opcode;
use crate::regs::{freg_name, mdu_reg_name, reg_name};

/// Integer size suffix (`.b`, `.w`, `.d`, `.q`).
fn size_suffix(size: u32) -> &'static str {
    match size {
        0 => ".b",
        1 => ".w",
        2 => ".d",
        3 => ".q",
        _ => ".?",
    }
}

/// Floating-point size suffix (`.s`, `.d`).
fn fsize_suffix(size: u32) -> &'static str {
    match size {
        0 => ".s",
        1 => ".d",
        _ => ".?",
    }
}

fn raw_word(op: Opcode) -> String {
    format!(".word\t{:#010x}", op.0)
}

fn shifted_reg(reg: u32, shift: u32) -> String {
    if shift > 0 {
        format!("{} << {}", reg_name(reg), shift)
    } else {
        reg_name(reg)
    }
}

fn alu_right(op: Opcode, imm24: u64) -> String {
    if op.alu_has_imm() {
        let value = sext_bits(u64::from(op.alu_imm9()), 9) ^ (imm24 << 8);
        format!("{}", value as i64)
    } else {
        shifted_reg(op.reg_c(), op.alu_shift())
    }
}

fn alu(op: Opcode, imm24: u64, second_slot: bool) -> String {
    let Some(operation) = AluOp::from_code(op.unit(), op.operation()) else {
        return raw_word(op);
    };

    let size = size_suffix(op.size());
    let dest = reg_name(op.reg_a());
    let left = reg_name(op.reg_b());

    match operation {
        AluOp::Moveix => {
            if second_slot {
                "moveix".to_owned()
            } else {
                "nop".to_owned()
            }
        }
        AluOp::Movei => {
            let value = sext_bits(u64::from(op.alu_move_imm()), 18) ^ (imm24 << 18);
            format!("movei\t{dest}, {}", value as i64)
        }
        AluOp::Ext | AluOp::Ins => format!(
            "{}\t{dest}, {left}, {}, {}",
            operation.mnemonic(),
            op.ext_ins_imm1(),
            op.ext_ins_imm2()
        ),
        AluOp::Cmp | AluOp::Bit | AluOp::Test => format!(
            "{}{size}\t{left}, {}",
            operation.mnemonic(),
            alu_right(op, imm24)
        ),
        AluOp::Testfr => format!("testfr{size}\t{}", alu_right(op, imm24)),
        _ => format!(
            "{}{size}\t{dest}, {left}, {}",
            operation.mnemonic(),
            alu_right(op, imm24)
        ),
    }
}

fn lsu(op: Opcode, imm24: u64) -> String {
    let Some(operation) = LsuOp::from_code(op.operation()) else {
        return raw_word(op);
    };

    let size = if matches!(
        operation,
        LsuOp::Fld | LsuOp::Fldi | LsuOp::Fst | LsuOp::Fsti
    ) {
        fsize_suffix(op.size())
    } else {
        size_suffix(op.size())
    };
    let transfer = if matches!(
        operation,
        LsuOp::Fld | LsuOp::Fldi | LsuOp::Fst | LsuOp::Fsti
    ) {
        freg_name(op.reg_a())
    } else {
        reg_name(op.reg_a())
    };
    let base = reg_name(op.reg_b());

    let index = if operation.is_immediate_form() {
        let offset = sext_bits(u64::from(op.lsu_imm10()), 10) ^ (imm24 << 9);
        format!("{}", offset as i64)
    } else {
        shifted_reg(op.reg_c(), op.lsu_shift())
    };

    format!("{}{size}\t{transfer}, {base}[{index}]", operation.mnemonic())
}

fn fpu(op: Opcode, _imm24: u64) -> String {
    let Some(operation) = FpuOp::from_code(op.operation()) else {
        return raw_word(op);
    };

    let size = fsize_suffix(op.size());
    let dest = freg_name(op.reg_a());
    let left = freg_name(op.reg_b());
    let right = freg_name(op.reg_c());

    if op.size() == 3 {
        if let Some(conversion) = operation.conversion_mnemonic() {
            return format!("{conversion}\t{dest}, {left}");
        }
    }

    match operation {
        FpuOp::Fneg | FpuOp::Fabs | FpuOp::Fmove => {
            format!("{}{size}\t{dest}, {left}", operation.mnemonic())
        }
        FpuOp::Fcmp => format!("fcmp{size}\t{left}, {right}"),
        _ => format!("{}{size}\t{dest}, {left}, {right}", operation.mnemonic()),
    }
}

fn efu(op: Opcode, _imm24: u64) -> String {
    let Some(operation) = EfuOp::from_code(op.operation()) else {
        return raw_word(op);
    };

    let size = fsize_suffix(op.size());
    let left = freg_name(op.reg_b());
    let right = freg_name(op.reg_c());

    match operation {
        EfuOp::Fdiv | EfuOp::Fatan2 => {
            format!("{}{size}\t{left}, {right}", operation.mnemonic())
        }
        EfuOp::Fsqrt | EfuOp::Fsin | EfuOp::Fatan | EfuOp::Fexp | EfuOp::Invsqrt => {
            format!("{}{size}\t{left}", operation.mnemonic())
        }
        EfuOp::Setef => format!("setef\t{}", freg_name(op.reg_a())),
        EfuOp::Getef => format!("getef\t{}", freg_name(op.reg_a())),
    }
}

fn mdu(op: Opcode, imm24: u64) -> String {
    let Some(operation) = MduOp::from_code(op.operation()) else {
        return raw_word(op);
    };

    let size = size_suffix(op.size());
    let left = reg_name(op.reg_b());

    match operation {
        MduOp::Getmd => format!(
            "move\t{}, {}",
            reg_name(op.reg_a()),
            mdu_reg_name(op.mdu_pq())
        ),
        MduOp::Setmd => format!(
            "move\t{}, {}",
            mdu_reg_name(op.mdu_pq()),
            reg_name(op.reg_a())
        ),
        _ => format!(
            "{}{size}\t{left}, {}",
            operation.mnemonic(),
            alu_right(op, imm24)
        ),
    }
}

fn bru(op: Opcode, imm24: u64) -> String {
    let Some(operation) = BruOp::from_code(op.operation()) else {
        return raw_word(op);
    };

    let relative23 = (sext_bits(u64::from(op.bru_imm23()), 23) ^ (imm24 << 22)) as i64;
    let relative24 = (sext_bits(u64::from(op.bru_imm24()), 24) ^ (imm24 << 23)) as i64;
    let absolute24 = u64::from(op.bru_imm24()) | (imm24 << 24);

    match operation {
        op if op.is_conditional() => format!("{}\t{relative23}", op.mnemonic()),
        BruOp::Bra | BruOp::Callr => format!("{}\t{relative24}", operation.mnemonic()),
        BruOp::Jump | BruOp::Call => format!("{}\t{absolute24:#x}", operation.mnemonic()),
        _ => format!(
            "{}\t{}, {}",
            operation.mnemonic(),
            reg_name(op.reg_b()),
            reg_name(op.reg_a())
        ),
    }
}

fn cu(op: Opcode) -> String {
    match CuOp::from_code(op.operation()) {
        Some(operation) => operation.mnemonic().to_owned(),
        None => raw_word(op),
    }
}

/// Renders one opcode as it would execute in the given slot.
///
/// `imm24` is the extension carried by an accompanying slot-2 `MOVEIX`, or 0.
#[must_use]
pub fn disassemble(op: Opcode, slot: u32, imm24: u64) -> String {
    let issue = (slot << 3) | op.unit();
    match issue {
        0 | 1 => alu(op, imm24, false),
        8 | 9 => alu(op, imm24, true),
        2 | 10 => lsu(op, imm24),
        3 | 11 => fpu(op, imm24),
        5 => efu(op, imm24),
        6 => mdu(op, imm24),
        7 => bru(op, imm24),
        13 => cu(op),
        _ => raw_word(op),
    }
}

/// Renders a fetched pair the way the dispatcher would issue it.
///
/// The second line is present only when the first word opens a bundle; a
/// slot-2 `MOVEIX` renders as `moveix` with its payload already folded into
/// the first line's immediate.
#[must_use]
pub fn disassemble_pair(first: Opcode, second: Opcode) -> (String, Option<String>) {
    if first.is_bundle() {
        let imm24 = if second.is_moveix() {
            u64::from(second.moveix_imm24())
        } else {
            0
        };
        (
            disassemble(first, 0, imm24),
            Some(disassemble(second, 1, imm24)),
        )
    } else {
        (disassemble(first, 0, 0), None)
    }
}
