use tracing::trace;

use crate::digest::{digest, Digest, DIGEST_BITS};
use crate::error::{Error, Result};

/// Rounds `n` up to a power of two; `0` becomes `1`.
pub fn round_up_pow2(n: u64) -> Option<u64> {
    n.max(1).checked_next_power_of_two()
}

/// Reads `width` bits starting at bit `offset` of `src` as an unsigned integer.
///
/// Bit 0 is the most significant bit of `src[0]`.
pub(crate) fn read_bits_msb(src: &[u8], offset: usize, width: u32) -> u32 {
    debug_assert!(width <= 32);

    (offset..offset + width as usize).fold(0u32, |acc, pos| {
        let bit = (src[pos / 8] >> (7 - pos % 8)) & 1;
        (acc << 1) | u32::from(bit)
    })
}

/// Derives `k` bit positions from one digest by slicing it into
/// `k` consecutive fields of `log2(bit_len)` bits each.
///
/// Only a [`BloomFilterBuilder`](crate::BloomFilterBuilder) constructs one:
///
/// ```compile_fail
/// use bloomfilt::indices::IndexDeriver;
///
/// let deriver = IndexDeriver::new(3, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexDeriver {
    bits_per_index: u32,
    k: u32,
}

impl IndexDeriver {
    /// `bit_len` must be a power of two no larger than 2^32.
    pub(crate) fn new(bit_len: u64, k: u32) -> Self {
        assert!(bit_len.is_power_of_two() && bit_len <= 1 << 32);

        IndexDeriver {
            bits_per_index: bit_len.trailing_zeros(),
            k,
        }
    }

    pub fn bits_per_index(&self) -> u32 {
        self.bits_per_index
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn required_bits(&self) -> u64 {
        u64::from(self.k) * u64::from(self.bits_per_index)
    }

    /// Whether the digest holds enough bits for `k` non-overlapping fields.
    pub fn has_capacity(&self) -> bool {
        self.required_bits() <= u64::from(DIGEST_BITS)
    }

    /// The `k` indices of `data`. The capacity check and the digest are done
    /// before this returns; the fields are read as the iterator advances.
    pub fn derive(&self, data: &[u8]) -> Result<impl ExactSizeIterator<Item = u32>> {
        if !self.has_capacity() {
            trace!(
                k = self.k,
                bits_per_index = self.bits_per_index,
                "digest too short to derive indices"
            );
            return Err(Error::InsufficientDigest {
                k: self.k,
                bits_per_index: self.bits_per_index,
                required: self.required_bits(),
                available: DIGEST_BITS,
            });
        }

        Ok(self.slice(digest(data)))
    }

    pub(crate) fn slice(&self, digest: Digest) -> impl ExactSizeIterator<Item = u32> {
        let width = self.bits_per_index;

        (0..self.k as usize).map(move |i| read_bits_msb(&digest, i * width as usize, width))
    }
}
