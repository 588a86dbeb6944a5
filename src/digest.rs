use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128,
};

/// Length in bytes of the digest indices are sliced from.
pub const DIGEST_LEN: usize = 20;
pub const DIGEST_BITS: u32 = DIGEST_LEN as u32 * 8;

pub type Digest = [u8; DIGEST_LEN];

/// SHAKE128 of `data`, squeezed to [`DIGEST_LEN`] bytes.
pub fn digest(data: &[u8]) -> Digest {
    let mut hasher = Shake128::default();
    hasher.update(data);
    let mut reader = hasher.finalize_xof();
    let mut res = [0u8; DIGEST_LEN];
    reader.read(&mut res);

    res
}
