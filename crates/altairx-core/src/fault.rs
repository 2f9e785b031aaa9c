//! Error taxonomy latched by the core when a bundle cannot retire.

use thiserror::Error;

use crate::memory::MemoryError;

/// A fatal condition raised inside a unit executor.
///
/// The first error aborts the bundle, latches on the core and leaves the
/// program counter on the faulting bundle; further `cycle` calls do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreError {
    /// The issue key `(slot << 3) | unit` selects no functional unit.
    #[error("issue key {0:#x} does not select a functional unit")]
    IssueInvalid(u32),
    /// The operation field is not assigned within the selected unit.
    #[error("unknown operation {operation:#x} for unit {unit}")]
    OpInvalid {
        /// Unit selector of the faulting word.
        unit: u32,
        /// Operation field of the faulting word.
        operation: u32,
    },
    /// The size code is not supported by the operation.
    #[error("operand size code {0} is not supported by this operation")]
    SizeInvalid(u32),
    /// The operation belongs to a reserved, unimplemented family.
    #[error("reserved operation family")]
    NotImplemented,
    /// The memory collaborator rejected a load or store.
    #[error("memory access failed: {0}")]
    Memory(#[from] MemoryError),
}
