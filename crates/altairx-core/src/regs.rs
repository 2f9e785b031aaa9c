//! Architectural register file and register index constants.

/// Number of general-purpose integer registers.
pub const IREG_COUNT: usize = 64;
/// Number of general-purpose floating-point registers.
pub const FREG_COUNT: usize = 64;

/// Stack pointer alias.
pub const REG_SP: usize = 0;
/// Link register alias (written by the call operations).
pub const REG_LR: usize = 31;
/// Accumulator pseudo-register: reads and writes redirect to bypass cells.
pub const REG_ACC: usize = 56;
/// ALU slot-1 bypass cell.
pub const REG_BA1: usize = 57;
/// ALU slot-2 bypass cell.
pub const REG_BA2: usize = 58;
/// FPU slot-1 bypass cell.
pub const REG_BF1: usize = 59;
/// FPU slot-2 bypass cell.
pub const REG_BF2: usize = 60;
/// LSU slot-1 bypass cell.
pub const REG_BL1: usize = 61;
/// LSU slot-2 bypass cell.
pub const REG_BL2: usize = 62;
/// Hardwired zero register: forced to 0 before every unit dispatch.
pub const REG_ZERO: usize = 63;

/// Zero / equal flag.
pub const Z_MASK: u32 = 0x01;
/// Carry / unsigned-borrow flag.
pub const C_MASK: u32 = 0x02;
/// Negative flag.
pub const N_MASK: u32 = 0x04;
/// Signed-overflow flag.
pub const O_MASK: u32 = 0x08;
/// Unordered flag (a float compare saw a non-representable operand).
pub const U_MASK: u32 = 0x10;

/// The complete architectural register state of one core.
///
/// Floating-point registers hold raw 64-bit patterns; the operation's size
/// code decides how the bits are interpreted. The program counter counts
/// 32-bit words, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegisterSet {
    /// Link register.
    pub lr: u32,
    /// Branch register.
    pub br: u32,
    /// Loop counter.
    pub lc: u32,
    /// Flag register (Z/C/N/O/U in the low five bits).
    pub fr: u32,
    /// Program counter, in 32-bit word units.
    pub pc: u32,
    /// Interrupt return register.
    pub ir: u32,
    /// Cycle counter.
    pub cc: u32,
    /// Instruction counter.
    pub ic: u32,
    /// General-purpose integer registers.
    #[cfg_attr(feature = "serde", serde(with = "register_file"))]
    pub gpi: [u64; IREG_COUNT],
    /// General-purpose floating-point registers, stored as raw bits.
    #[cfg_attr(feature = "serde", serde(with = "register_file"))]
    pub gpf: [u64; FREG_COUNT],
    /// MDU result registers: Q, QR, PL, PH.
    pub mdu: [u64; 4],
    /// EFU scalar output register.
    pub efu_q: u64,
}

impl Default for RegisterSet {
    fn default() -> Self {
        Self {
            lr: 0,
            br: 0,
            lc: 0,
            fr: 0,
            pc: 0,
            ir: 0,
            cc: 0,
            ic: 0,
            gpi: [0; IREG_COUNT],
            gpf: [0; FREG_COUNT],
            mdu: [0; 4],
            efu_q: 0,
        }
    }
}

impl RegisterSet {
    /// Returns one flag bit of the flag register as a boolean.
    #[must_use]
    pub const fn flag(&self, mask: u32) -> bool {
        self.fr & mask != 0
    }
}

// serde lacks built-in impls for arrays past 32 entries, so the two 64-entry
// files serialize through a slice.
#[cfg(feature = "serde")]
mod register_file {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        registers: &[u64; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        registers.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u64; N], D::Error> {
        let values = Vec::<u64>::deserialize(deserializer)?;
        values
            .try_into()
            .map_err(|values: Vec<u64>| D::Error::invalid_length(values.len(), &"a register file"))
    }
}

/// Display name of a general-purpose integer register.
#[must_use]
pub fn reg_name(index: u32) -> String {
    match index {
        0 => "sp".to_owned(),
        1..=8 => format!("a{}", index - 1),
        9..=19 => format!("s{}", index - 9),
        20..=30 => format!("t{}", index - 20),
        31 => "lr".to_owned(),
        32..=55 => format!("n{}", index - 32),
        56 => "acc".to_owned(),
        63 => "zero".to_owned(),
        _ => format!("r{index}"),
    }
}

/// Display name of a floating-point register.
#[must_use]
pub fn freg_name(index: u32) -> String {
    format!("v{index}")
}

/// Display name of an MDU register selector.
#[must_use]
pub const fn mdu_reg_name(pq: u32) -> &'static str {
    match pq {
        0 => "Q",
        1 => "QR",
        2 => "PL",
        3 => "PH",
        _ => "?",
    }
}
