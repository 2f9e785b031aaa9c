//! Zero-copy field view over a 32-bit opcode word.
//!
//! Every accessor is a pure mask over the fixed layout below; a word is
//! always interpretable under every accessor, and operations simply ignore
//! the fields they do not use.
//!
//! ```text
//! bit  0        pairing flag (`is_bundle` on slot 1, `is_moveix` on slot 2)
//! bits 1..=3    unit selector
//! bits 4..=7    operation within the unit
//! bits 8..=13   reg_a
//! bits 14..=15  size
//! bits 16..=21  reg_b
//! bits 22..=27  reg_c
//! bits 28..=30  shift (register-form scale)
//! bit  31       alu_has_imm
//! ```
//!
//! Immediate overlays: `alu_imm9` spans 22..=30, `lsu_imm10` 22..=31,
//! `alu_move_imm` 14..=31, `bru_imm23` 9..=31, `bru_imm24` and
//! `moveix_imm24` 8..=31, `ext_ins_imm1` 22..=27, `ext_ins_imm2` is split
//! (low four bits at 28..=31, high two at 14..=15), `mdu_pq` 22..=23.

use crate::isa::{AluOp, BruOp, CuOp, EfuOp, FpuOp, LsuOp, MduOp, UNIT_EFU_CU, UNIT_MDU_VU};

/// A single 32-bit opcode word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(pub u32);

impl Opcode {
    /// On a slot-1 word: a second slot follows this one.
    #[must_use]
    pub const fn is_bundle(self) -> bool {
        self.0 & 1 != 0
    }

    /// On a slot-2 word: this word extends the slot-1 immediate.
    #[must_use]
    pub const fn is_moveix(self) -> bool {
        self.0 & 1 != 0
    }

    /// Functional-unit selector.
    #[must_use]
    pub const fn unit(self) -> u32 {
        (self.0 >> 1) & 0x7
    }

    /// Operation within the unit.
    #[must_use]
    pub const fn operation(self) -> u32 {
        (self.0 >> 4) & 0xF
    }

    /// Destination / first operand register index.
    #[must_use]
    pub const fn reg_a(self) -> u32 {
        (self.0 >> 8) & 0x3F
    }

    /// Operand size code (integer: byte/half/word/dword; float: s/d/conv).
    #[must_use]
    pub const fn size(self) -> u32 {
        (self.0 >> 14) & 0x3
    }

    /// Left operand register index.
    #[must_use]
    pub const fn reg_b(self) -> u32 {
        (self.0 >> 16) & 0x3F
    }

    /// Right operand register index (register form).
    #[must_use]
    pub const fn reg_c(self) -> u32 {
        (self.0 >> 22) & 0x3F
    }

    /// Register-form left-shift applied to the ALU/MDU right operand.
    #[must_use]
    pub const fn alu_shift(self) -> u32 {
        (self.0 >> 28) & 0x7
    }

    /// If set, the ALU/MDU right operand is [`Self::alu_imm9`].
    #[must_use]
    pub const fn alu_has_imm(self) -> bool {
        self.0 >> 31 != 0
    }

    /// 9-bit signed immediate right operand.
    #[must_use]
    pub const fn alu_imm9(self) -> u32 {
        (self.0 >> 22) & 0x1FF
    }

    /// 18-bit signed `MOVEI` immediate.
    #[must_use]
    pub const fn alu_move_imm(self) -> u32 {
        (self.0 >> 14) & 0x3_FFFF
    }

    /// Bitfield start position for `EXT`/`INS`.
    #[must_use]
    pub const fn ext_ins_imm1(self) -> u32 {
        (self.0 >> 22) & 0x3F
    }

    /// Bitfield length for `EXT`/`INS` (split field).
    #[must_use]
    pub const fn ext_ins_imm2(self) -> u32 {
        ((self.0 >> 28) & 0xF) | (((self.0 >> 14) & 0x3) << 4)
    }

    /// 10-bit signed LSU displacement.
    #[must_use]
    pub const fn lsu_imm10(self) -> u32 {
        (self.0 >> 22) & 0x3FF
    }

    /// Register-form index scale for LSU addressing.
    #[must_use]
    pub const fn lsu_shift(self) -> u32 {
        (self.0 >> 28) & 0x7
    }

    /// 23-bit signed displacement of conditional branches.
    #[must_use]
    pub const fn bru_imm23(self) -> u32 {
        (self.0 >> 9) & 0x7F_FFFF
    }

    /// 24-bit branch displacement or absolute target.
    #[must_use]
    pub const fn bru_imm24(self) -> u32 {
        (self.0 >> 8) & 0xFF_FFFF
    }

    /// MDU register selector (Q, QR, PL, PH).
    #[must_use]
    pub const fn mdu_pq(self) -> u32 {
        (self.0 >> 22) & 0x3
    }

    /// 24-bit immediate extension carried by a slot-2 `MOVEIX`.
    #[must_use]
    pub const fn moveix_imm24(self) -> u32 {
        (self.0 >> 8) & 0xFF_FFFF
    }
}

// Encode constructors, the mirror of the accessors above. Used by the test
// suites, the VM and anything that needs to emit raw bundles.
impl Opcode {
    /// The canonical no-op word (all zero).
    #[must_use]
    pub const fn noop() -> Self {
        Self(0)
    }

    /// A slot-2 `MOVEIX` word carrying a 24-bit immediate extension.
    #[must_use]
    pub const fn moveix(imm24: u32) -> Self {
        Self(1 | ((imm24 & 0xFF_FFFF) << 8))
    }

    /// Marks a slot-1 word as the head of a two-slot bundle.
    #[must_use]
    pub const fn with_bundle(self) -> Self {
        Self(self.0 | 1)
    }

    const fn base(unit: u32, operation: u32) -> u32 {
        ((unit & 0x7) << 1) | ((operation & 0xF) << 4)
    }

    const fn regs(a: u32, b: u32, c: u32) -> u32 {
        ((a & 0x3F) << 8) | ((b & 0x3F) << 16) | ((c & 0x3F) << 22)
    }

    /// Register-form ALU operation: `op.size a, b, c << shift`.
    #[must_use]
    pub const fn alu_reg(op: AluOp, size: u32, a: u32, b: u32, c: u32, shift: u32) -> Self {
        let (unit, operation) = op.code();
        Self(
            Self::base(unit, operation)
                | Self::regs(a, b, c)
                | ((size & 0x3) << 14)
                | ((shift & 0x7) << 28),
        )
    }

    /// Immediate-form ALU operation: `op.size a, b, #imm9`.
    #[must_use]
    pub const fn alu_imm(op: AluOp, size: u32, a: u32, b: u32, imm9: u32) -> Self {
        let (unit, operation) = op.code();
        Self(
            Self::base(unit, operation)
                | Self::regs(a, b, 0)
                | ((size & 0x3) << 14)
                | ((imm9 & 0x1FF) << 22)
                | (1 << 31),
        )
    }

    /// `MOVEI a, #imm18`.
    #[must_use]
    pub const fn movei(a: u32, imm18: u32) -> Self {
        let (unit, operation) = AluOp::Movei.code();
        Self(Self::base(unit, operation) | ((a & 0x3F) << 8) | ((imm18 & 0x3_FFFF) << 14))
    }

    /// `EXT`/`INS` bitfield operation: `op a, b, start, length`.
    #[must_use]
    pub const fn alu_bitfield(op: AluOp, a: u32, b: u32, start: u32, length: u32) -> Self {
        let (unit, operation) = op.code();
        Self(
            Self::base(unit, operation)
                | Self::regs(a, b, start)
                | ((length & 0xF) << 28)
                | (((length >> 4) & 0x3) << 14),
        )
    }

    /// Register-form LSU operation: `op.size a, b[c << shift]`.
    #[must_use]
    pub const fn lsu_reg(op: LsuOp, size: u32, a: u32, b: u32, c: u32, shift: u32) -> Self {
        Self(
            Self::base(crate::isa::UNIT_LSU, op.code())
                | Self::regs(a, b, c)
                | ((size & 0x3) << 14)
                | ((shift & 0x7) << 28),
        )
    }

    /// Immediate-form LSU operation: `op.size a, b[#imm10]`.
    #[must_use]
    pub const fn lsu_imm(op: LsuOp, size: u32, a: u32, b: u32, imm10: u32) -> Self {
        Self(
            Self::base(crate::isa::UNIT_LSU, op.code())
                | Self::regs(a, b, 0)
                | ((size & 0x3) << 14)
                | ((imm10 & 0x3FF) << 22),
        )
    }

    /// FPU operation: `op.size a, b, c`.
    #[must_use]
    pub const fn fpu(op: FpuOp, size: u32, a: u32, b: u32, c: u32) -> Self {
        Self(Self::base(crate::isa::UNIT_FPU, op.code()) | Self::regs(a, b, c) | ((size & 0x3) << 14))
    }

    /// EFU operation: `op.size a, b, c` (slot 1 only).
    #[must_use]
    pub const fn efu(op: EfuOp, size: u32, a: u32, b: u32, c: u32) -> Self {
        Self(Self::base(UNIT_EFU_CU, op.code()) | Self::regs(a, b, c) | ((size & 0x3) << 14))
    }

    /// Register-form MDU operation: `op.size b, c << shift` (slot 1 only).
    #[must_use]
    pub const fn mdu_reg(op: MduOp, size: u32, b: u32, c: u32, shift: u32) -> Self {
        Self(
            Self::base(UNIT_MDU_VU, op.code())
                | Self::regs(0, b, c)
                | ((size & 0x3) << 14)
                | ((shift & 0x7) << 28),
        )
    }

    /// Immediate-form MDU operation: `op.size b, #imm9` (slot 1 only).
    #[must_use]
    pub const fn mdu_imm(op: MduOp, size: u32, b: u32, imm9: u32) -> Self {
        Self(
            Self::base(UNIT_MDU_VU, op.code())
                | Self::regs(0, b, 0)
                | ((size & 0x3) << 14)
                | ((imm9 & 0x1FF) << 22)
                | (1 << 31),
        )
    }

    /// `GETMD`/`SETMD` transfer between `gpi[a]` and an MDU register.
    #[must_use]
    pub const fn mdu_move(op: MduOp, a: u32, pq: u32) -> Self {
        Self(Self::base(UNIT_MDU_VU, op.code()) | ((a & 0x3F) << 8) | ((pq & 0x3) << 22))
    }

    /// Conditional branch with a 23-bit displacement field.
    #[must_use]
    pub const fn bru_cond(op: BruOp, disp23: u32) -> Self {
        Self(Self::base(crate::isa::UNIT_BRU, op.code()) | ((disp23 & 0x7F_FFFF) << 9))
    }

    /// `BRA`/`CALLR` (relative) or `JUMP`/`CALL` (absolute) with a 24-bit field.
    #[must_use]
    pub const fn bru_far(op: BruOp, imm24: u32) -> Self {
        Self(Self::base(crate::isa::UNIT_BRU, op.code()) | ((imm24 & 0xFF_FFFF) << 8))
    }

    /// Indirect call: link into `gpi[a]`, target from `gpi[b]`.
    #[must_use]
    pub const fn bru_indirect(op: BruOp, a: u32, b: u32) -> Self {
        Self(Self::base(crate::isa::UNIT_BRU, op.code()) | Self::regs(a, b, 0))
    }

    /// Control-unit operation (slot 2 only).
    #[must_use]
    pub const fn cu(op: CuOp) -> Self {
        Self(Self::base(UNIT_EFU_CU, op.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::Opcode;
    use crate::isa::{AluOp, BruOp, CuOp, EfuOp, FpuOp, LsuOp, MduOp};

    #[test]
    fn the_zero_word_is_an_unpaired_alu_moveix() {
        let word = Opcode::noop();
        assert!(!word.is_bundle());
        assert_eq!(word.unit(), 0);
        assert_eq!(word.operation(), 0);
        assert_eq!(AluOp::from_code(word.unit(), word.operation()), Some(AluOp::Moveix));
    }

    #[test]
    fn moveix_words_carry_the_pairing_flag_and_payload() {
        let word = Opcode::moveix(0xDEADBE);
        assert!(word.is_moveix());
        assert_eq!(word.moveix_imm24(), 0xDEADBE);
        assert_eq!(word.unit(), 0);
        assert_eq!(word.operation(), 0);
    }

    #[test]
    fn alu_register_form_fields_land_in_their_lanes() {
        let word = Opcode::alu_reg(AluOp::Add, 3, 2, 1, 60, 5);
        assert_eq!(word.unit(), 1);
        assert_eq!(word.operation(), 0x0);
        assert_eq!(word.size(), 3);
        assert_eq!(word.reg_a(), 2);
        assert_eq!(word.reg_b(), 1);
        assert_eq!(word.reg_c(), 60);
        assert_eq!(word.alu_shift(), 5);
        assert!(!word.alu_has_imm());
    }

    #[test]
    fn alu_immediate_form_spans_the_reg_c_and_shift_lanes() {
        let word = Opcode::alu_imm(AluOp::Sub, 0, 10, 20, 0x1EE);
        assert!(word.alu_has_imm());
        assert_eq!(word.alu_imm9(), 0x1EE);
        assert_eq!(word.reg_a(), 10);
        assert_eq!(word.reg_b(), 20);
        assert_eq!(word.size(), 0);
    }

    #[test]
    fn movei_keeps_reg_a_clear_of_the_wide_immediate() {
        let word = Opcode::movei(63, 0x2ABCD);
        assert_eq!(word.reg_a(), 63);
        assert_eq!(word.alu_move_imm(), 0x2ABCD);
        assert_eq!(AluOp::from_code(word.unit(), word.operation()), Some(AluOp::Movei));
    }

    #[test]
    fn bitfield_length_reassembles_from_its_split_lanes() {
        let word = Opcode::alu_bitfield(AluOp::Ext, 1, 2, 37, 0x3F);
        assert_eq!(word.ext_ins_imm1(), 37);
        assert_eq!(word.ext_ins_imm2(), 0x3F);

        let short = Opcode::alu_bitfield(AluOp::Ins, 1, 2, 0, 9);
        assert_eq!(short.ext_ins_imm1(), 0);
        assert_eq!(short.ext_ins_imm2(), 9);
    }

    #[test]
    fn lsu_forms_expose_displacement_and_scale() {
        let reg = Opcode::lsu_reg(LsuOp::Ld, 2, 3, 4, 5, 3);
        assert_eq!(reg.unit(), 2);
        assert_eq!(LsuOp::from_code(reg.operation()), Some(LsuOp::Ld));
        assert_eq!(reg.lsu_shift(), 3);
        assert_eq!(reg.reg_c(), 5);

        let imm = Opcode::lsu_imm(LsuOp::Sti, 3, 3, 4, 0x3FE);
        assert_eq!(imm.lsu_imm10(), 0x3FE);
        assert_eq!(LsuOp::from_code(imm.operation()), Some(LsuOp::Sti));
    }

    #[test]
    fn branch_immediates_fill_to_the_top_bit() {
        let cond = Opcode::bru_cond(BruOp::Beq, 0x40_0001);
        assert_eq!(cond.unit(), 7);
        assert_eq!(cond.bru_imm23(), 0x40_0001);

        let far = Opcode::bru_far(BruOp::Call, 0xABCDEF);
        assert_eq!(far.bru_imm24(), 0xABCDEF);
    }

    #[test]
    fn slot2_unit_codes_reuse_the_slot1_lanes() {
        let syscall = Opcode::cu(CuOp::Syscall);
        assert_eq!(syscall.unit(), 5);
        assert_eq!(CuOp::from_code(syscall.operation()), Some(CuOp::Syscall));

        let sqrt = Opcode::efu(EfuOp::Fsqrt, 1, 0, 7, 0);
        assert_eq!(sqrt.unit(), 5);
        assert_eq!(EfuOp::from_code(sqrt.operation()), Some(EfuOp::Fsqrt));

        let div = Opcode::mdu_reg(MduOp::Div, 3, 1, 2, 0);
        assert_eq!(div.unit(), 6);
        assert_eq!(MduOp::from_code(div.operation()), Some(MduOp::Div));

        let pq = Opcode::mdu_move(MduOp::Getmd, 9, 2);
        assert_eq!(pq.mdu_pq(), 2);
        assert_eq!(pq.reg_a(), 9);
    }

    #[test]
    fn fpu_builder_keeps_the_size_lane() {
        let word = Opcode::fpu(FpuOp::Fcmp, 1, 0, 1, 2);
        assert_eq!(word.unit(), 3);
        assert_eq!(word.size(), 1);
        assert_eq!(word.reg_b(), 1);
        assert_eq!(word.reg_c(), 2);
    }
}
