//! A Bloom filter over arbitrary byte strings.
//!
//! Every element is digested once with a 160-bit SHAKE128 digest. The
//! digest is cut into `k` fields of `log2(m)` bits, each field being one bit
//! position in an `m`-bit array, with `m` rounded up to a power of two. This
//! emulates `k` independent hash functions as long as
//! `k * log2(m) <= 160`; filters configured beyond that accept nothing.
//!
//! ```
//! use bloomfilt::BloomFilterBuilder;
//!
//! let mut filter = BloomFilterBuilder::with_size(24 * 1024, 3).build().unwrap();
//!
//! for i in 0u32..1000 {
//!     filter.add(&i.to_le_bytes());
//! }
//!
//! assert!(filter.contains(&42u32.to_le_bytes()));
//! ```
//!
//! `add` takes `&mut self`, so sharing a filter between threads needs a
//! `Mutex` or `RwLock` around it.

pub mod bits;
pub mod bloom_filters;
pub mod builder;
pub mod digest;
pub mod error;
pub mod indices;

pub use bloom_filters::BloomFilter;
pub use builder::{BloomFilterBuilder, DEFAULT_K, MAX_NUM_BITS};
pub use error::{Error, Result};
