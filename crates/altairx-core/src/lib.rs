//! Instruction-set simulator core for the AltairX 64-bit VLIW CPU.
//!
//! The core decodes 32-bit opcode words packed into two-slot bundles,
//! dispatches them to seven functional units (ALU, MDU, LSU, FPU, EFU, BRU,
//! CU), and maintains the architectural register file, condition flags and a
//! flat region memory. One [`Core::cycle`] call executes exactly one bundle.

/// Width masking, sign extension and floating-point bit helpers.
pub mod bits;

/// Zero-copy field view over a 32-bit opcode word, plus encode constructors.
pub mod opcode;
pub use opcode::Opcode;

/// Closed per-unit operation enumerations and unit selector codes.
pub mod isa;
pub use isa::{AluOp, BruOp, CuOp, EfuOp, FpuOp, LsuOp, MduOp};

/// Architectural register file, register index constants and flag masks.
pub mod regs;
pub use regs::{RegisterSet, C_MASK, N_MASK, O_MASK, U_MASK, Z_MASK};

/// Condition-flag arithmetic for integer and floating-point compares.
pub mod flags;

/// Flat region memory (WRAM, ROM, SPMT, SPM2) with typed load/store.
pub mod memory;
pub use memory::{Memory, MemoryError};

/// Error taxonomy latched by the core when a bundle cannot retire.
pub mod fault;
pub use fault::CoreError;

/// Bundle fetch, issue-key dispatch and the per-unit executors.
pub mod exec;
pub use exec::Core;

/// Textual mirror of the decode and dispatch taxonomy.
pub mod disasm;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
