//! Control unit executor (unit code 5, slot 2 only).

use super::Core;
use crate::fault::CoreError;
use crate::isa::CuOp;
use crate::opcode::Opcode;

/// Program counter loaded by `SYSCALL`; the high bit is stripped by the
/// fetch path, so the kernel entry resides at WRAM word 0.
pub const SYSCALL_ENTRY: u32 = 0x8000_0000;

pub(super) fn execute(core: &mut Core, op: Opcode, slot: u32) -> Result<(), CoreError> {
    let operation = CuOp::from_code(op.operation()).ok_or(CoreError::OpInvalid {
        unit: op.unit(),
        operation: op.operation(),
    })?;

    match operation {
        CuOp::Syscall => {
            // Return to the word after the issuing bundle.
            core.regs.ir = core.regs.pc.wrapping_add(1).wrapping_add(slot);
            core.regs.pc = SYSCALL_ENTRY;
            core.syscall = true;
        }
        CuOp::Reti => core.regs.pc = core.regs.ir,
        CuOp::Getir | CuOp::Setfr | CuOp::Mmu | CuOp::Sync => {
            return Err(CoreError::NotImplemented)
        }
    }

    Ok(())
}
