//! Closed per-unit operation enumerations.
//!
//! The 3-bit unit selector routes a word to a functional unit; the 4-bit
//! operation field selects the operation within that unit. The ALU spans two
//! unit codes: page A (`unit 0`) carries the move/extract/compare family and
//! page B (`unit 1`) the arithmetic/logic family, which is why issue keys 0,
//! 1, 8 and 9 all select the ALU executor.

/// ALU page A unit code.
pub const UNIT_ALU_A: u32 = 0;
/// ALU page B unit code.
pub const UNIT_ALU_B: u32 = 1;
/// Load/store unit code.
pub const UNIT_LSU: u32 = 2;
/// Floating-point unit code.
pub const UNIT_FPU: u32 = 3;
/// Extended-float unit (slot 1) / control unit (slot 2) code.
pub const UNIT_EFU_CU: u32 = 5;
/// Multiply/divide unit (slot 1) / vector unit (slot 2) code.
pub const UNIT_MDU_VU: u32 = 6;
/// Branch unit code (slot 1 only).
pub const UNIT_BRU: u32 = 7;

/// ALU operations across both unit pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AluOp {
    // Page A.
    Moveix,
    Movei,
    Ext,
    Ins,
    Max,
    Umax,
    Min,
    Umin,
    Adds,
    Subs,
    Cmp,
    Bit,
    Test,
    Testfr,
    // Page B.
    Add,
    Sub,
    Xor,
    Or,
    And,
    Lsl,
    Asr,
    Lsr,
    Se,
    Sen,
    Slts,
    Sltu,
    Sand,
    Sbit,
    Cmoven,
    Cmove,
}

impl AluOp {
    /// Decodes an operation from a unit code (0 or 1) and a 4-bit field.
    #[must_use]
    pub const fn from_code(unit: u32, operation: u32) -> Option<Self> {
        match (unit & 1, operation) {
            (0, 0x0) => Some(Self::Moveix),
            (0, 0x1) => Some(Self::Movei),
            (0, 0x2) => Some(Self::Ext),
            (0, 0x3) => Some(Self::Ins),
            (0, 0x4) => Some(Self::Max),
            (0, 0x5) => Some(Self::Umax),
            (0, 0x6) => Some(Self::Min),
            (0, 0x7) => Some(Self::Umin),
            (0, 0x8) => Some(Self::Adds),
            (0, 0x9) => Some(Self::Subs),
            (0, 0xA) => Some(Self::Cmp),
            (0, 0xB) => Some(Self::Bit),
            (0, 0xC) => Some(Self::Test),
            (0, 0xD) => Some(Self::Testfr),
            (1, 0x0) => Some(Self::Add),
            (1, 0x1) => Some(Self::Sub),
            (1, 0x2) => Some(Self::Xor),
            (1, 0x3) => Some(Self::Or),
            (1, 0x4) => Some(Self::And),
            (1, 0x5) => Some(Self::Lsl),
            (1, 0x6) => Some(Self::Asr),
            (1, 0x7) => Some(Self::Lsr),
            (1, 0x8) => Some(Self::Se),
            (1, 0x9) => Some(Self::Sen),
            (1, 0xA) => Some(Self::Slts),
            (1, 0xB) => Some(Self::Sltu),
            (1, 0xC) => Some(Self::Sand),
            (1, 0xD) => Some(Self::Sbit),
            (1, 0xE) => Some(Self::Cmoven),
            (1, 0xF) => Some(Self::Cmove),
            _ => None,
        }
    }

    /// Returns the `(unit, operation)` encoding for this operation.
    #[must_use]
    pub const fn code(self) -> (u32, u32) {
        match self {
            Self::Moveix => (UNIT_ALU_A, 0x0),
            Self::Movei => (UNIT_ALU_A, 0x1),
            Self::Ext => (UNIT_ALU_A, 0x2),
            Self::Ins => (UNIT_ALU_A, 0x3),
            Self::Max => (UNIT_ALU_A, 0x4),
            Self::Umax => (UNIT_ALU_A, 0x5),
            Self::Min => (UNIT_ALU_A, 0x6),
            Self::Umin => (UNIT_ALU_A, 0x7),
            Self::Adds => (UNIT_ALU_A, 0x8),
            Self::Subs => (UNIT_ALU_A, 0x9),
            Self::Cmp => (UNIT_ALU_A, 0xA),
            Self::Bit => (UNIT_ALU_A, 0xB),
            Self::Test => (UNIT_ALU_A, 0xC),
            Self::Testfr => (UNIT_ALU_A, 0xD),
            Self::Add => (UNIT_ALU_B, 0x0),
            Self::Sub => (UNIT_ALU_B, 0x1),
            Self::Xor => (UNIT_ALU_B, 0x2),
            Self::Or => (UNIT_ALU_B, 0x3),
            Self::And => (UNIT_ALU_B, 0x4),
            Self::Lsl => (UNIT_ALU_B, 0x5),
            Self::Asr => (UNIT_ALU_B, 0x6),
            Self::Lsr => (UNIT_ALU_B, 0x7),
            Self::Se => (UNIT_ALU_B, 0x8),
            Self::Sen => (UNIT_ALU_B, 0x9),
            Self::Slts => (UNIT_ALU_B, 0xA),
            Self::Sltu => (UNIT_ALU_B, 0xB),
            Self::Sand => (UNIT_ALU_B, 0xC),
            Self::Sbit => (UNIT_ALU_B, 0xD),
            Self::Cmoven => (UNIT_ALU_B, 0xE),
            Self::Cmove => (UNIT_ALU_B, 0xF),
        }
    }

    /// Assembly mnemonic, without the size suffix.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Moveix => "moveix",
            Self::Movei => "movei",
            Self::Ext => "ext",
            Self::Ins => "ins",
            Self::Max => "max",
            Self::Umax => "umax",
            Self::Min => "min",
            Self::Umin => "umin",
            Self::Adds => "adds",
            Self::Subs => "subs",
            Self::Cmp => "cmp",
            Self::Bit => "bit",
            Self::Test => "test",
            Self::Testfr => "testfr",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Xor => "xor",
            Self::Or => "or",
            Self::And => "and",
            Self::Lsl => "lsl",
            Self::Asr => "asr",
            Self::Lsr => "lsr",
            Self::Se => "se",
            Self::Sen => "sen",
            Self::Slts => "slts",
            Self::Sltu => "sltu",
            Self::Sand => "sand",
            Self::Sbit => "sbit",
            Self::Cmoven => "cmoven",
            Self::Cmove => "cmove",
        }
    }
}

/// Load/store unit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum LsuOp {
    Ld,
    Lds,
    Fld,
    St,
    Fst,
    Ldi,
    Ldis,
    Fldi,
    Sti,
    Fsti,
}

impl LsuOp {
    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Ld),
            0x1 => Some(Self::Lds),
            0x2 => Some(Self::Fld),
            0x3 => Some(Self::St),
            0x4 => Some(Self::Fst),
            0x5 => Some(Self::Ldi),
            0x6 => Some(Self::Ldis),
            0x7 => Some(Self::Fldi),
            0x8 => Some(Self::Sti),
            0x9 => Some(Self::Fsti),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Ld => 0x0,
            Self::Lds => 0x1,
            Self::Fld => 0x2,
            Self::St => 0x3,
            Self::Fst => 0x4,
            Self::Ldi => 0x5,
            Self::Ldis => 0x6,
            Self::Fldi => 0x7,
            Self::Sti => 0x8,
            Self::Fsti => 0x9,
        }
    }

    /// True for the immediate-offset address forms.
    #[must_use]
    pub const fn is_immediate_form(self) -> bool {
        matches!(
            self,
            Self::Ldi | Self::Ldis | Self::Fldi | Self::Sti | Self::Fsti
        )
    }

    /// Assembly mnemonic, without the size suffix.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ld | Self::Ldi => "ld",
            Self::Lds | Self::Ldis => "lds",
            Self::Fld | Self::Fldi => "fld",
            Self::St | Self::Sti => "st",
            Self::Fst | Self::Fsti => "fst",
        }
    }
}

/// Floating-point unit operations.
///
/// Size codes 0 and 1 select the `f32`/`f64` base operation; size code 3
/// selects the conversion that shares the encoding slot (see the associated
/// constants). The overlap is structural: one variant, two meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FpuOp {
    Fadd,
    Fsub,
    Fmul,
    Fnmul,
    Fmin,
    Fmax,
    Fneg,
    Fabs,
    Fcmove,
    Fe,
    Fen,
    Fslt,
    Fmove,
    Fcmp,
}

impl FpuOp {
    /// Conversion overlay of [`Self::Fadd`]: half to float.
    pub const HTOF: Self = Self::Fadd;
    /// Conversion overlay of [`Self::Fsub`]: float to half.
    pub const FTOH: Self = Self::Fsub;
    /// Conversion overlay of [`Self::Fmul`]: integer to float.
    pub const ITOF: Self = Self::Fmul;
    /// Conversion overlay of [`Self::Fnmul`]: float to integer.
    pub const FTOI: Self = Self::Fnmul;
    /// Conversion overlay of [`Self::Fmin`]: float to double.
    pub const FTOD: Self = Self::Fmin;
    /// Conversion overlay of [`Self::Fmax`]: double to float.
    pub const DTOF: Self = Self::Fmax;
    /// Conversion overlay of [`Self::Fneg`]: integer to double.
    pub const ITOD: Self = Self::Fneg;
    /// Conversion overlay of [`Self::Fabs`]: double to integer.
    pub const DTOI: Self = Self::Fabs;

    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Fadd),
            0x1 => Some(Self::Fsub),
            0x2 => Some(Self::Fmul),
            0x3 => Some(Self::Fnmul),
            0x4 => Some(Self::Fmin),
            0x5 => Some(Self::Fmax),
            0x6 => Some(Self::Fneg),
            0x7 => Some(Self::Fabs),
            0x8 => Some(Self::Fcmove),
            0x9 => Some(Self::Fe),
            0xA => Some(Self::Fen),
            0xB => Some(Self::Fslt),
            0xC => Some(Self::Fmove),
            0xD => Some(Self::Fcmp),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Fadd => 0x0,
            Self::Fsub => 0x1,
            Self::Fmul => 0x2,
            Self::Fnmul => 0x3,
            Self::Fmin => 0x4,
            Self::Fmax => 0x5,
            Self::Fneg => 0x6,
            Self::Fabs => 0x7,
            Self::Fcmove => 0x8,
            Self::Fe => 0x9,
            Self::Fen => 0xA,
            Self::Fslt => 0xB,
            Self::Fmove => 0xC,
            Self::Fcmp => 0xD,
        }
    }

    /// Base-form mnemonic (size codes 0 and 1).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fadd => "fadd",
            Self::Fsub => "fsub",
            Self::Fmul => "fmul",
            Self::Fnmul => "fnmul",
            Self::Fmin => "fmin",
            Self::Fmax => "fmax",
            Self::Fneg => "fneg",
            Self::Fabs => "fabs",
            Self::Fcmove => "fcmove",
            Self::Fe => "fe",
            Self::Fen => "fen",
            Self::Fslt => "fslt",
            Self::Fmove => "fmove",
            Self::Fcmp => "fcmp",
        }
    }

    /// Conversion-form mnemonic (size code 3), if the slot has one.
    #[must_use]
    pub const fn conversion_mnemonic(self) -> Option<&'static str> {
        match self {
            Self::Fadd => Some("htof"),
            Self::Fsub => Some("ftoh"),
            Self::Fmul => Some("itof"),
            Self::Fnmul => Some("ftoi"),
            Self::Fmin => Some("ftod"),
            Self::Fmax => Some("dtof"),
            Self::Fneg => Some("itod"),
            Self::Fabs => Some("dtoi"),
            _ => None,
        }
    }
}

/// Extended-float unit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum EfuOp {
    Fdiv,
    Fatan2,
    Fsqrt,
    Fsin,
    Fatan,
    Fexp,
    Invsqrt,
    Setef,
    Getef,
}

impl EfuOp {
    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Fdiv),
            0x1 => Some(Self::Fatan2),
            0x2 => Some(Self::Fsqrt),
            0x3 => Some(Self::Fsin),
            0x4 => Some(Self::Fatan),
            0x5 => Some(Self::Fexp),
            0x6 => Some(Self::Invsqrt),
            0x7 => Some(Self::Setef),
            0x8 => Some(Self::Getef),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Fdiv => 0x0,
            Self::Fatan2 => 0x1,
            Self::Fsqrt => 0x2,
            Self::Fsin => 0x3,
            Self::Fatan => 0x4,
            Self::Fexp => 0x5,
            Self::Invsqrt => 0x6,
            Self::Setef => 0x7,
            Self::Getef => 0x8,
        }
    }

    /// Assembly mnemonic, without the size suffix.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fdiv => "fdiv",
            Self::Fatan2 => "fatan2",
            Self::Fsqrt => "fsqrt",
            Self::Fsin => "fsin",
            Self::Fatan => "fatan",
            Self::Fexp => "fexp",
            Self::Invsqrt => "finvsqrt",
            Self::Setef => "setef",
            Self::Getef => "getef",
        }
    }
}

/// Multiply/divide unit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MduOp {
    Div,
    Divu,
    Mul,
    Mulu,
    Getmd,
    Setmd,
}

impl MduOp {
    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Div),
            0x1 => Some(Self::Divu),
            0x2 => Some(Self::Mul),
            0x3 => Some(Self::Mulu),
            0x4 => Some(Self::Getmd),
            0x5 => Some(Self::Setmd),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Div => 0x0,
            Self::Divu => 0x1,
            Self::Mul => 0x2,
            Self::Mulu => 0x3,
            Self::Getmd => 0x4,
            Self::Setmd => 0x5,
        }
    }

    /// Assembly mnemonic, without the size suffix.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Mul => "mul",
            Self::Mulu => "mulu",
            Self::Getmd | Self::Setmd => "move",
        }
    }
}

/// Branch unit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BruOp {
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Bequ,
    Bneu,
    Bra,
    Callr,
    Jump,
    Call,
    Indirectcallr,
    Indirectcall,
}

impl BruOp {
    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Beq),
            0x1 => Some(Self::Bne),
            0x2 => Some(Self::Blt),
            0x3 => Some(Self::Bge),
            0x4 => Some(Self::Bltu),
            0x5 => Some(Self::Bgeu),
            0x6 => Some(Self::Bequ),
            0x7 => Some(Self::Bneu),
            0x8 => Some(Self::Bra),
            0x9 => Some(Self::Callr),
            0xA => Some(Self::Jump),
            0xB => Some(Self::Call),
            0xC => Some(Self::Indirectcallr),
            0xD => Some(Self::Indirectcall),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Beq => 0x0,
            Self::Bne => 0x1,
            Self::Blt => 0x2,
            Self::Bge => 0x3,
            Self::Bltu => 0x4,
            Self::Bgeu => 0x5,
            Self::Bequ => 0x6,
            Self::Bneu => 0x7,
            Self::Bra => 0x8,
            Self::Callr => 0x9,
            Self::Jump => 0xA,
            Self::Call => 0xB,
            Self::Indirectcallr => 0xC,
            Self::Indirectcall => 0xD,
        }
    }

    /// True for the eight flag-driven conditional branches.
    #[must_use]
    pub const fn is_conditional(self) -> bool {
        matches!(
            self,
            Self::Beq
                | Self::Bne
                | Self::Blt
                | Self::Bge
                | Self::Bltu
                | Self::Bgeu
                | Self::Bequ
                | Self::Bneu
        )
    }

    /// Assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Bequ => "bequ",
            Self::Bneu => "bneu",
            Self::Bra => "bra",
            Self::Callr | Self::Indirectcallr => "callr",
            Self::Jump => "jump",
            Self::Call | Self::Indirectcall => "call",
        }
    }
}

/// Control unit operations (slot 2 only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum CuOp {
    Getir,
    Setfr,
    Mmu,
    Sync,
    Syscall,
    Reti,
}

impl CuOp {
    /// Decodes a 4-bit operation field.
    #[must_use]
    pub const fn from_code(operation: u32) -> Option<Self> {
        match operation {
            0x0 => Some(Self::Getir),
            0x1 => Some(Self::Setfr),
            0x2 => Some(Self::Mmu),
            0x3 => Some(Self::Sync),
            0x4 => Some(Self::Syscall),
            0x5 => Some(Self::Reti),
            _ => None,
        }
    }

    /// Returns the 4-bit operation field for this operation.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Getir => 0x0,
            Self::Setfr => 0x1,
            Self::Mmu => 0x2,
            Self::Sync => 0x3,
            Self::Syscall => 0x4,
            Self::Reti => 0x5,
        }
    }

    /// Assembly mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Getir => "getir",
            Self::Setfr => "setfr",
            Self::Mmu => "mmu",
            Self::Sync => "sync",
            Self::Syscall => "syscall",
            Self::Reti => "reti",
        }
    }
}
