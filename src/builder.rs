use tracing::{debug, warn};

use crate::bits::BitArray;
use crate::bloom_filters::BloomFilter;
use crate::error::{Error, Result};
use crate::indices::{round_up_pow2, IndexDeriver};

/// Largest bit array length; an index must fit in a `u32`.
pub const MAX_NUM_BITS: u64 = 1 << 32;
pub const MIN_K: u32 = 1;
pub const DEFAULT_K: u32 = 3;

/// Builder for [`BloomFilter`].
///
/// The requested bit count is rounded up to the next power of two, so that
/// every index sliced from the digest addresses a valid bit.
///
/// ```
/// use bloomfilt::BloomFilterBuilder;
///
/// let filter = BloomFilterBuilder::with_size(100, 4).build().unwrap();
/// assert_eq!(filter.bit_len(), 128);
/// assert_eq!(filter.k(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: u64,
    k: u32,
}

impl BloomFilterBuilder {
    pub fn with_size(num_bits: u64, k: u32) -> Self {
        BloomFilterBuilder { num_bits, k }
    }

    /// Uses [`DEFAULT_K`] indices per element.
    pub fn with_bits(num_bits: u64) -> Self {
        Self::with_size(num_bits, DEFAULT_K)
    }

    pub fn k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    /// Length of the bit array `build()` would allocate.
    pub fn effective_bits(&self) -> Option<u64> {
        round_up_pow2(self.num_bits).filter(|&n| n <= MAX_NUM_BITS)
    }

    /// Allocates the zeroed bit array.
    ///
    /// A filter whose `k * log2(bits)` exceeds the digest length is still
    /// built, but every add and test on it fails.
    pub fn build(self) -> Result<BloomFilter> {
        if self.k < MIN_K {
            return Err(Error::ZeroK);
        }
        let bit_len = self
            .effective_bits()
            .ok_or(Error::TooManyBits(self.num_bits))?;

        let deriver = IndexDeriver::new(bit_len, self.k);
        let bits = BitArray::zeroed(bit_len)?;

        if deriver.has_capacity() {
            debug!(
                requested = self.num_bits,
                bit_len,
                k = self.k,
                "created bloom filter"
            );
        } else {
            warn!(
                bit_len,
                k = self.k,
                required = deriver.required_bits(),
                "bloom filter digest too short for k indices, all operations will fail"
            );
        }

        Ok(BloomFilter::from_parts(deriver, bits))
    }
}
