use crate::bits::{BitArray, DisplayBits};
use crate::builder::BloomFilterBuilder;
use crate::error::Result;
use crate::indices::IndexDeriver;

/// A Bloom filter over arbitrary byte strings.
///
/// Each element is digested once and the digest is sliced into `k` indices.
/// `contains` never returns `false` for an element that `add` accepted.
///
/// ```
/// use bloomfilt::BloomFilter;
///
/// let mut filter = BloomFilter::new(1024, 3).unwrap();
/// assert!(filter.add(b"apple"));
///
/// assert!(filter.contains(b"apple"));
/// assert_eq!(filter.insert_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    deriver: IndexDeriver,
    bits: BitArray,
    insert_count: u64,
}

impl BloomFilter {
    /// Shorthand for `BloomFilterBuilder::with_size(num_bits, k).build()`.
    pub fn new(num_bits: u64, k: u32) -> Result<Self> {
        BloomFilterBuilder::with_size(num_bits, k).build()
    }

    pub(crate) fn from_parts(deriver: IndexDeriver, bits: BitArray) -> Self {
        BloomFilter {
            deriver,
            bits,
            insert_count: 0,
        }
    }

    /// Sets the `k` bits of `data`. Returns `false`, leaving the filter
    /// untouched, when no indices can be derived.
    pub fn add(&mut self, data: &[u8]) -> bool {
        self.try_add(data).is_ok()
    }

    /// Like [`add`](Self::add), but reports why indices could not be derived.
    pub fn try_add(&mut self, data: &[u8]) -> Result<()> {
        let indices = self.deriver.derive(data)?;

        for index in indices.take(self.distinct_positions()) {
            self.bits.set(u64::from(index));
        }
        self.insert_count += 1;

        Ok(())
    }

    /// `true` if `data` was possibly added, `false` if it definitely was not
    /// or if no indices can be derived.
    pub fn contains(&self, data: &[u8]) -> bool {
        self.try_contains(data).unwrap_or(false)
    }

    pub fn try_contains(&self, data: &[u8]) -> Result<bool> {
        let indices = self.deriver.derive(data)?;

        Ok(indices
            .take(self.distinct_positions())
            .all(|index| self.bits.test(u64::from(index))))
    }

    // A 1-bit array has one position, however large k is.
    fn distinct_positions(&self) -> usize {
        if self.deriver.bits_per_index() == 0 {
            1
        } else {
            self.deriver.k() as usize
        }
    }

    /// Length of the bit array, always a power of two.
    pub fn bit_len(&self) -> u64 {
        self.bits.bit_len()
    }

    pub fn k(&self) -> u32 {
        self.deriver.k()
    }

    pub fn bits_per_index(&self) -> u32 {
        self.deriver.bits_per_index()
    }

    /// Number of successful adds, duplicates included.
    pub fn insert_count(&self) -> u64 {
        self.insert_count
    }

    /// Whether `k * bits_per_index` fits in the digest. When it does not,
    /// every add and test fails.
    pub fn can_derive(&self) -> bool {
        self.deriver.has_capacity()
    }

    pub fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// The bit pattern as `0`/`1` characters, 80 per line.
    pub fn dump(&self) -> DisplayBits<'_> {
        self.bits.dump()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;
    use rand::Rng;

    use crate::bloom_filters::BloomFilter;
    use crate::error::Error;

    fn random_bytes() -> Vec<u8> {
        let mut data = vec![0u8; OsRng.gen_range(0..48)];
        OsRng.fill(&mut data[..]);
        data
    }

    #[test]
    fn test_power_of_two_normalization() {
        assert_eq!(BloomFilter::new(100, 3).unwrap().bit_len(), 128);
        assert_eq!(BloomFilter::new(128, 3).unwrap().bit_len(), 128);
        assert_eq!(BloomFilter::new(0, 3).unwrap().bit_len(), 1);
    }

    #[test]
    fn test_empty_filter() {
        let filter = BloomFilter::new(4096, 3).unwrap();

        for i in 0u32..1000 {
            assert!(!filter.contains(&i.to_le_bytes()));
        }
        assert!(!filter.contains(b""));
        assert_eq!(filter.count_ones(), 0);
    }

    #[test]
    fn test_no_false_negatives() {
        let mut filter = BloomFilter::new(1 << 12, 4).unwrap();
        let elements: Vec<Vec<u8>> = (0..300).map(|_| random_bytes()).collect();

        for element in &elements {
            assert!(filter.add(element));
            assert!(filter.contains(element));
        }
        for element in &elements {
            assert!(filter.contains(element));
        }
        assert_eq!(filter.insert_count(), 300);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = BloomFilter::new(256, 3).unwrap();
        let mut twice = BloomFilter::new(256, 3).unwrap();

        assert!(once.add(b"apple"));
        assert!(twice.add(b"apple"));
        assert!(twice.add(b"apple"));

        assert_eq!(once.as_bytes(), twice.as_bytes());
        assert_eq!(once.insert_count(), 1);
        assert_eq!(twice.insert_count(), 2);
    }

    #[test]
    fn test_add_sets_at_most_k_bits() {
        let mut filter = BloomFilter::new(1 << 16, 5).unwrap();
        filter.add(b"apple");

        let ones = filter.count_ones();
        assert!(ones >= 1 && ones <= 5);
    }

    #[test]
    fn test_monotonic() {
        let mut filter = BloomFilter::new(512, 3).unwrap();
        let mut previous = filter.as_bytes().to_vec();
        let mut seen = Vec::new();

        for i in 0u32..100 {
            let data = i.to_be_bytes();
            filter.add(&data);
            seen.push(data);

            let current = filter.as_bytes();
            for (old, new) in previous.iter().zip(current) {
                assert_eq!(old & new, *old);
            }
            previous = current.to_vec();

            assert!(seen.iter().all(|d| filter.contains(d)));
        }
    }

    #[test]
    fn test_deterministic() {
        let mut filter = BloomFilter::new(2048, 3).unwrap();
        for i in 0u32..100 {
            filter.add(&i.to_le_bytes());
        }

        for i in 100u32..1100 {
            let data = i.to_le_bytes();
            let first = filter.contains(&data);
            assert_eq!(filter.contains(&data), first);
            assert_eq!(filter.try_contains(&data).unwrap(), first);
        }
    }

    #[test]
    fn test_single_bit_filter() {
        let mut filter = BloomFilter::new(1, 8).unwrap();
        assert_eq!(filter.bits_per_index(), 0);
        assert!(!filter.contains(b"apple"));

        assert!(filter.add(b"apple"));
        assert_eq!(filter.as_bytes(), &[1]);
        assert!(filter.contains(b"anything"));
    }

    #[test]
    fn test_single_bit_filter_with_huge_k() {
        let mut filter = BloomFilter::new(1, u32::MAX).unwrap();
        assert!(filter.can_derive());
        assert!(!filter.contains(b"apple"));

        assert!(filter.add(b"apple"));
        assert_eq!(filter.insert_count(), 1);
        assert_eq!(filter.as_bytes(), &[1]);
        assert!(filter.contains(b"apple"));
        assert!(filter.contains(b"pear"));
    }

    #[test]
    fn test_capacity_boundary() {
        let mut filter = BloomFilter::new(1 << 16, 10).unwrap();
        assert!(filter.can_derive());
        assert!(filter.add(b"apple"));
        assert!(filter.contains(b"apple"));

        let mut filter = BloomFilter::new(1 << 16, 11).unwrap();
        assert!(!filter.can_derive());

        for i in 0u32..100 {
            assert!(!filter.add(&i.to_le_bytes()));
            assert!(!filter.contains(&i.to_le_bytes()));
        }
        assert_eq!(filter.insert_count(), 0);
        assert_eq!(filter.count_ones(), 0);

        assert!(matches!(
            filter.try_add(b"apple"),
            Err(Error::InsufficientDigest { k: 11, bits_per_index: 16, .. })
        ));
        assert!(matches!(
            filter.try_contains(b"apple"),
            Err(Error::InsufficientDigest { required: 176, available: 160, .. })
        ));
    }

    #[test]
    fn test_end_to_end() {
        let mut filter = BloomFilter::new(24 * 1024, 3).unwrap();
        assert_eq!(filter.bit_len(), 32768);

        for i in 0u32..1000 {
            assert!(filter.add(&i.to_le_bytes()));
        }
        assert_eq!(filter.insert_count(), 1000);

        for i in 0u32..1000 {
            assert!(filter.contains(&i.to_le_bytes()));
        }

        let false_positives = (1000u32..10000)
            .filter(|i| filter.contains(&i.to_le_bytes()))
            .count();

        // expected rate (1 - e^(-3 * 1000 / 32768))^3 is well under 1%
        assert!(false_positives < 9000 / 20, "{} false positives", false_positives);
    }

    #[test]
    fn test_dump() {
        let mut filter = BloomFilter::new(200, 3).unwrap();
        filter.add(b"apple");

        let dump = filter.dump().to_string();
        assert_eq!(dump.matches('1').count() as u64, filter.count_ones());
        assert_eq!(dump.matches(|c: char| c == '0' || c == '1').count(), 256);
        assert_eq!(dump.lines().count(), 4);
    }
}
