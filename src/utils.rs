//! Shared hashing and sampling primitives.
//!
//! Every big integer that enters a hash here does so in the fixed-width
//! big-endian encoding of the group (`PAD`). Unpadded encodings produce
//! sessions that only interoperate with themselves.

use digest::{Digest, Output};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::errors::{Result, SrpError};
use crate::types::SrpGroup;

/// Number of random bytes drawn for a private ephemeral.
pub const EPHEMERAL_LEN: usize = 64;

/// Fixed-width unsigned big-endian encoding, left-padded with zeroes.
#[must_use]
pub fn pad(x: &BigUint, width: usize) -> Vec<u8> {
    let bytes = x.to_bytes_be();
    let mut buf = vec![0u8; width];
    let l = width - bytes.len();
    buf[l..].copy_from_slice(&bytes);
    buf
}

/// One-shot digest of `data`.
#[must_use]
pub fn compute_hash<D: Digest>(data: &[u8]) -> Output<D> {
    let mut d = D::new();
    d.update(data);
    d.finalize()
}

/// k = H(PAD(N) | PAD(g))
#[must_use]
pub fn compute_k<D: Digest>(group: &SrpGroup) -> BigUint {
    let width = group.byte_len();
    let mut d = D::new();
    d.update(pad(&group.n, width));
    d.update(pad(&group.g, width));
    BigUint::from_bytes_be(&d.finalize())
}

/// u = H(PAD(A) | PAD(B))
#[must_use]
pub fn compute_u<D: Digest>(group: &SrpGroup, a_pub: &BigUint, b_pub: &BigUint) -> BigUint {
    let width = group.byte_len();
    let mut d = D::new();
    d.update(pad(a_pub, width));
    d.update(pad(b_pub, width));
    BigUint::from_bytes_be(&d.finalize())
}

/// H(N) XOR H(PAD(g))
#[must_use]
pub fn compute_hash_n_xor_hash_g<D: Digest>(group: &SrpGroup) -> Vec<u8> {
    let width = group.byte_len();
    let h_n = compute_hash::<D>(&pad(&group.n, width));
    let h_g = compute_hash::<D>(&pad(&group.g, width));

    h_n.as_slice()
        .iter()
        .zip(h_g.as_slice().iter())
        .map(|(x1, x2)| x1 ^ x2)
        .collect()
}

/// M1 = H(H(N) XOR H(g) | H(I) | s | PAD(A) | PAD(B) | K), the
/// RFC 2945 form
#[must_use]
pub fn compute_m1<D: Digest>(
    group: &SrpGroup,
    username: &[u8],
    salt: &[u8],
    a_pub: &BigUint,
    b_pub: &BigUint,
    key: &[u8],
) -> Output<D> {
    let width = group.byte_len();
    let mut d = D::new();
    d.update(compute_hash_n_xor_hash_g::<D>(group));
    d.update(compute_hash::<D>(username));
    d.update(salt);
    d.update(pad(a_pub, width));
    d.update(pad(b_pub, width));
    d.update(key);
    d.finalize()
}

/// M2 = H(PAD(A) | M1 | K)
#[must_use]
pub fn compute_m2<D: Digest>(
    group: &SrpGroup,
    a_pub: &BigUint,
    m1: &[u8],
    key: &[u8],
) -> Output<D> {
    let mut d = D::new();
    d.update(pad(a_pub, group.byte_len()));
    d.update(m1);
    d.update(key);
    d.finalize()
}

/// Sample a private ephemeral exponent.
///
/// Draws [`EPHEMERAL_LEN`] bytes from the CSPRNG and redraws on the
/// (vanishingly unlikely) all-zero value, so the result interpreted as a
/// big-endian integer always lies in `[1, N - 1]` for any supported
/// group. RNG failure maps to [`SrpError::InsufficientEntropy`].
pub fn generate_private_ephemeral<R: CryptoRngCore>(rng: &mut R) -> Result<Zeroizing<Vec<u8>>> {
    loop {
        let mut buf = Zeroizing::new(vec![0u8; EPHEMERAL_LEN]);
        rng.try_fill_bytes(&mut buf)
            .map_err(|_| SrpError::InsufficientEntropy)?;
        if buf.iter().any(|&b| b != 0) {
            return Ok(buf);
        }
    }
}

/// Generate a fresh enrollment salt.
pub fn generate_salt<R: CryptoRngCore>(rng: &mut R) -> Result<[u8; 32]> {
    let mut salt = [0u8; 32];
    rng.try_fill_bytes(&mut salt)
        .map_err(|_| SrpError::InsufficientEntropy)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::G_2048;
    use sha2::Sha256;

    #[test]
    fn pad_is_fixed_width() {
        let x = BigUint::from(0x0102u32);
        assert_eq!(pad(&x, 4), [0, 0, 1, 2]);
        assert_eq!(pad(&x, 2), [1, 2]);
    }

    #[test]
    fn k_differs_from_unpadded_hash() {
        // dropping PAD(g) must change k, otherwise the padding is dead code
        let k = compute_k::<Sha256>(&G_2048);
        let mut d = Sha256::new();
        d.update(G_2048.n.to_bytes_be());
        d.update(G_2048.g.to_bytes_be());
        let unpadded = BigUint::from_bytes_be(&d.finalize());
        assert_ne!(k, unpadded);
    }

    #[test]
    fn ephemerals_are_nonzero_and_distinct() {
        let mut rng = rand::rngs::OsRng;
        let a = generate_private_ephemeral(&mut rng).unwrap();
        let b = generate_private_ephemeral(&mut rng).unwrap();
        assert_ne!(BigUint::from_bytes_be(&a), BigUint::from(0u32));
        assert_ne!(*a, *b);
    }
}
