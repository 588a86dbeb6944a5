use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot allocate {bytes} bytes for the bit array")]
    Allocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("bit array length {0} does not round to a power of two of at most 2^32 bits")]
    TooManyBits(u64),

    #[error("k must be at least 1")]
    ZeroK,

    #[error(
        "{k} indices of {bits_per_index} bits need {required} digest bits, only {available} available"
    )]
    InsufficientDigest {
        k: u32,
        bits_per_index: u32,
        required: u64,
        available: u32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
