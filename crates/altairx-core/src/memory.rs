//! Flat region memory shared between the core and its host.
//!
//! The guest address space is split into four disjoint regions at fixed
//! 64-bit byte bases. Data accesses go through [`Memory::load`] and
//! [`Memory::store`]; the fetch path reads WRAM directly as little-endian
//! 32-bit words without a fault path, so zero-filled or absent memory
//! fetches as a no-op stream.

use thiserror::Error;

/// Byte base of working RAM. Program bundles are fetched from here.
pub const WRAM_BEGIN: u64 = 0x0000_0000;
/// Byte base of the kernel ROM.
pub const ROM_BEGIN: u64 = 0x1000_0000;
/// Byte base of the first scratchpad region.
pub const SPMT_BEGIN: u64 = 0x2000_0000;
/// Byte base of the second scratchpad region.
pub const SPM2_BEGIN: u64 = 0x3000_0000;

/// Fixed ROM size in bytes.
pub const ROM_SIZE: usize = 0x1_0000;

/// A rejected data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryError {
    /// The address belongs to no mapped region.
    #[error("address {addr:#x} is outside every mapped region")]
    Unmapped {
        /// Faulting guest address.
        addr: u64,
    },
    /// The access starts inside a region but runs past its end.
    #[error("{len}-byte access at {addr:#x} crosses the end of its region")]
    OutOfBounds {
        /// Faulting guest address.
        addr: u64,
        /// Access length in bytes.
        len: usize,
    },
}

/// The four-region guest memory.
pub struct Memory {
    wram: Vec<u8>,
    rom: Vec<u8>,
    spmt: Vec<u8>,
    spm2: Vec<u8>,
}

impl Memory {
    /// Allocates zeroed memory with the given WRAM and scratchpad sizes in
    /// KiB. ROM is always [`ROM_SIZE`] bytes.
    #[must_use]
    pub fn new(wram_kib: usize, spmt_kib: usize, spm2_kib: usize) -> Self {
        Self {
            wram: vec![0; wram_kib * 1024],
            rom: vec![0; ROM_SIZE],
            spmt: vec![0; spmt_kib * 1024],
            spm2: vec![0; spm2_kib * 1024],
        }
    }

    fn region(&self, addr: u64) -> Option<(&[u8], usize)> {
        let (base, bytes): (u64, &[u8]) = match addr {
            ROM_BEGIN..=u64::MAX if addr < SPMT_BEGIN => (ROM_BEGIN, &self.rom),
            SPMT_BEGIN..=u64::MAX if addr < SPM2_BEGIN => (SPMT_BEGIN, &self.spmt),
            SPM2_BEGIN.. => (SPM2_BEGIN, &self.spm2),
            _ => (WRAM_BEGIN, &self.wram),
        };
        let offset = usize::try_from(addr - base).ok()?;
        (offset < bytes.len()).then_some((bytes, offset))
    }

    fn region_mut(&mut self, addr: u64) -> Option<(&mut Vec<u8>, usize)> {
        let (base, bytes) = match addr {
            ROM_BEGIN..=u64::MAX if addr < SPMT_BEGIN => (ROM_BEGIN, &mut self.rom),
            SPMT_BEGIN..=u64::MAX if addr < SPM2_BEGIN => (SPMT_BEGIN, &mut self.spmt),
            SPM2_BEGIN.. => (SPM2_BEGIN, &mut self.spm2),
            _ => (WRAM_BEGIN, &mut self.wram),
        };
        let offset = usize::try_from(addr - base).ok()?;
        (offset < bytes.len()).then_some((bytes, offset))
    }

    /// Loads `len` bytes (1, 2, 4 or 8) little-endian, zero-extended.
    ///
    /// # Errors
    ///
    /// Fails when the access leaves every mapped region.
    pub fn load(&self, addr: u64, len: usize) -> Result<u64, MemoryError> {
        debug_assert!(matches!(len, 1 | 2 | 4 | 8));
        let (bytes, offset) = self.region(addr).ok_or(MemoryError::Unmapped { addr })?;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or(MemoryError::OutOfBounds { addr, len })?;

        let mut buffer = [0u8; 8];
        buffer[..len].copy_from_slice(&bytes[offset..end]);
        Ok(u64::from_le_bytes(buffer))
    }

    /// Stores the low `len` bytes (1, 2, 4 or 8) of `value` little-endian.
    ///
    /// # Errors
    ///
    /// Fails when the access leaves every mapped region.
    pub fn store(&mut self, addr: u64, len: usize, value: u64) -> Result<(), MemoryError> {
        debug_assert!(matches!(len, 1 | 2 | 4 | 8));
        let (bytes, offset) = self
            .region_mut(addr)
            .ok_or(MemoryError::Unmapped { addr })?;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or(MemoryError::OutOfBounds { addr, len })?;

        bytes[offset..end].copy_from_slice(&value.to_le_bytes()[..len]);
        Ok(())
    }

    /// Reads the WRAM word at a program-counter index.
    ///
    /// Indexes past the resident image read as zero, the canonical no-op.
    #[must_use]
    pub fn exec_word(&self, index: u32) -> u32 {
        let offset = index as usize * 4;
        match self.wram.get(offset..offset + 4) {
            Some(bytes) => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            None => 0,
        }
    }

    /// Borrows a contiguous view starting at `addr`, spanning `len` bytes of
    /// one region. This is the host-facing analog of the fetch path's direct
    /// WRAM mapping, used by loaders and syscall handlers.
    ///
    /// # Errors
    ///
    /// Fails when the span leaves every mapped region.
    pub fn slice_mut(&mut self, addr: u64, len: usize) -> Result<&mut [u8], MemoryError> {
        let (bytes, offset) = self
            .region_mut(addr)
            .ok_or(MemoryError::Unmapped { addr })?;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or(MemoryError::OutOfBounds { addr, len })?;
        Ok(&mut bytes[offset..end])
    }

    /// Borrows the whole WRAM image.
    #[must_use]
    pub fn wram(&self) -> &[u8] {
        &self.wram
    }

    /// Borrows the whole WRAM image mutably.
    pub fn wram_mut(&mut self) -> &mut [u8] {
        &mut self.wram
    }

    /// Borrows the whole ROM image mutably.
    pub fn rom_mut(&mut self) -> &mut [u8] {
        &mut self.rom
    }
}
