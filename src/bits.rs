use std::fmt::{self, Display, Formatter};

use crate::error::{Error, Result};

const DUMP_LINE_WIDTH: u64 = 80;

/// Packed bit vector. Bit `i` lives in byte `i / 8`, at position `i % 8`
/// counted from the least significant bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    len: u64,
    bytes: Vec<u8>,
}

pub struct DisplayBits<'a> {
    bits: &'a BitArray,
}

impl<'a> Display for DisplayBits<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for i in 0..self.bits.len {
            if i != 0 && i % DUMP_LINE_WIDTH == 0 {
                writeln!(f)?;
            }
            f.write_str(if self.bits.test(i) { "1" } else { "0" })?;
        }
        writeln!(f)
    }
}

impl BitArray {
    /// A zeroed array of `len` bits, or [`Error::Allocation`] if the
    /// backing buffer cannot be reserved.
    pub fn zeroed(len: u64) -> Result<Self> {
        let byte_len = ((len + 7) / 8) as usize;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(byte_len)
            .map_err(|source| Error::Allocation {
                bytes: byte_len,
                source,
            })?;
        bytes.resize(byte_len, 0);

        Ok(BitArray { len, bytes })
    }

    pub fn bit_len(&self) -> u64 {
        self.len
    }

    pub fn set(&mut self, index: u64) {
        self.check_index(index);
        self.bytes[(index / 8) as usize] |= 1 << (index % 8);
    }

    pub fn test(&self, index: u64) -> bool {
        self.check_index(index);
        self.bytes[(index / 8) as usize] & (1 << (index % 8)) != 0
    }

    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn dump(&self) -> DisplayBits<'_> {
        DisplayBits { bits: self }
    }

    #[inline]
    fn check_index(&self, index: u64) {
        assert!(
            index < self.len,
            "bit index {} out of range for {} bits",
            index,
            self.len
        );
    }
}
