//! Bundle fetch, issue-key dispatch and the architectural execution loop.
//!
//! One [`Core::cycle`] call is the indivisible unit of progress: it fetches
//! two 32-bit words at the current program counter, executes slot 1 and (for
//! a bundle) slot 2 sequentially, then advances the counters. There is no
//! parallelism between the slots; slot 2 observes every side effect of
//! slot 1.

mod alu;
mod bru;
mod cu;
mod efu;
mod fpu;
mod lsu;
mod mdu;

use crate::fault::CoreError;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::regs::{RegisterSet, REG_ZERO};

/// Size of the per-core scratchpad in bytes.
pub const SPM_SIZE: usize = 0x4000;

/// One simulated AltairX core.
pub struct Core {
    regs: RegisterSet,
    spm: Box<[u8]>,
    memory: Memory,
    error: Option<CoreError>,
    syscall: bool,
}

impl Core {
    /// Creates a core over the given memory, with a zeroed register file.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self {
            regs: RegisterSet::default(),
            spm: vec![0; SPM_SIZE].into_boxed_slice(),
            memory,
            error: None,
            syscall: false,
        }
    }

    /// Borrows the register file.
    #[must_use]
    pub fn registers(&self) -> &RegisterSet {
        &self.regs
    }

    /// Borrows the register file mutably.
    pub fn registers_mut(&mut self) -> &mut RegisterSet {
        &mut self.regs
    }

    /// Borrows the guest memory.
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Borrows the guest memory mutably.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Borrows the core-local scratchpad bytes.
    #[must_use]
    pub fn scratchpad_bytes(&self) -> &[u8] {
        &self.spm
    }

    /// Borrows the core-local scratchpad bytes mutably.
    pub fn scratchpad_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.spm
    }

    /// Returns the latched error, if a bundle failed to retire.
    #[must_use]
    pub fn error(&self) -> Option<CoreError> {
        self.error
    }

    /// True when the previous cycle executed a `SYSCALL` and the host has
    /// not yet consumed the notification.
    #[must_use]
    pub fn syscall_pending(&self) -> bool {
        self.syscall
    }

    /// Invokes `handler` if the syscall latch is set, then clears the latch.
    ///
    /// The handler may freely read and write registers and memory. Calling
    /// this after every [`Self::cycle`] yields exactly one invocation per
    /// executed `SYSCALL`.
    pub fn take_syscall(&mut self, handler: impl FnOnce(&mut Self)) {
        if self.syscall {
            handler(self);
            self.syscall = false;
        }
    }

    /// Executes one bundle at the current program counter.
    ///
    /// Fetches both slots from WRAM, executes them, and advances `pc` by the
    /// issue width unless an instruction changed it. `cc` counts cycles,
    /// `ic` counts issued opcodes. After an error has latched, does nothing.
    pub fn cycle(&mut self) {
        if self.error.is_some() {
            return;
        }

        let saved_pc = self.regs.pc;
        let real_pc = saved_pc & 0x7FFF_FFFF;
        let first = Opcode(self.memory.exec_word(real_pc));
        let second = Opcode(self.memory.exec_word(real_pc.wrapping_add(1)));
        let count = if first.is_bundle() { 2 } else { 1 };

        match self.execute(first, second) {
            Ok(advance) => {
                self.regs.pc = self.regs.pc.wrapping_add(advance);
                self.regs.cc = self.regs.cc.wrapping_add(1);
                self.regs.ic = self.regs.ic.wrapping_add(count);
            }
            Err(error) => {
                // The counter stays on the faulting bundle, even if slot 1
                // already branched.
                self.regs.pc = saved_pc;
                self.error = Some(error);
            }
        }
    }

    /// Executes `first` and, if it opens a bundle, `second`.
    ///
    /// A slot-2 `MOVEIX` is pure data: its 24-bit payload extends the slot-1
    /// immediate and it is never dispatched. Returns 0 when an instruction
    /// changed the program counter, otherwise the issue width (1 or 2).
    ///
    /// # Errors
    ///
    /// Propagates the first unit-executor error; the caller decides whether
    /// to latch it.
    pub fn execute(&mut self, first: Opcode, second: Opcode) -> Result<u32, CoreError> {
        let old_pc = self.regs.pc;

        let imm24 = if first.is_bundle() && second.is_moveix() {
            u64::from(second.moveix_imm24())
        } else {
            0
        };

        self.execute_unit(first, 0, imm24)?;

        if first.is_bundle() && !second.is_moveix() {
            self.execute_unit(second, 1, imm24)?;
        }

        if old_pc != self.regs.pc {
            return Ok(0);
        }

        Ok(if first.is_bundle() { 2 } else { 1 })
    }

    /// Routes one opcode to its unit executor by issue key.
    ///
    /// ```text
    /// key  0,1,8,9  ALU        key  5  EFU (slot 1)
    /// key  2,10     LSU        key 13  CU  (slot 2)
    /// key  3,11     FPU        key  6  MDU (slot 1)
    /// key  7        BRU        key 14  VU  (reserved)
    /// ```
    fn execute_unit(&mut self, op: Opcode, slot: u32, imm24: u64) -> Result<(), CoreError> {
        self.regs.gpi[REG_ZERO] = 0;
        self.regs.gpf[REG_ZERO] = 0;

        let issue = (slot << 3) | op.unit();
        match issue {
            0 | 1 | 8 | 9 => alu::execute(self, op, slot, imm24),
            2 | 10 => lsu::execute(self, op, slot, imm24),
            3 | 11 => fpu::execute(self, op, slot),
            5 => efu::execute(self, op),
            6 => mdu::execute(self, op, imm24),
            7 => bru::execute(self, op, imm24),
            13 => cu::execute(self, op, slot),
            14 => Err(CoreError::NotImplemented),
            _ => Err(CoreError::IssueInvalid(issue)),
        }
    }
}
