//! Modular exponentiation backend.
//!
//! Protocol values are carried as `num_bigint::BigUint`, but its
//! `modpow` runs in variable time, which leaks the private exponents
//! through timing. Exponentiation therefore round-trips through
//! `crypto_bigint`'s Montgomery form, whose `pow` touches every limb of
//! the exponent regardless of its value.

use crypto_bigint::modular::runtime_mod::{DynResidue, DynResidueParams};
use crypto_bigint::{Encoding, U2048, U3072, U4096, U6144, U8192};
use num_bigint::BigUint;

fn left_pad(x: &BigUint, width: usize) -> Vec<u8> {
    let bytes = x.to_bytes_be();
    let mut buf = vec![0u8; width];
    buf[width - bytes.len()..].copy_from_slice(&bytes);
    buf
}

macro_rules! powm_width {
    ($name:ident, $uint:ty) => {
        fn $name(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
            let width = <$uint>::BYTES;
            let n = <$uint>::from_be_slice(&left_pad(modulus, width));
            let params = DynResidueParams::new(&n);
            let base = DynResidue::new(&<$uint>::from_be_slice(&left_pad(base, width)), params);
            let exp = <$uint>::from_be_slice(&left_pad(exp, width));
            BigUint::from_bytes_be(&base.pow(&exp).retrieve().to_be_bytes())
        }
    };
}

powm_width!(powm_2048, U2048);
powm_width!(powm_3072, U3072);
powm_width!(powm_4096, U4096);
powm_width!(powm_6144, U6144);
powm_width!(powm_8192, U8192);

/// base^exp mod modulus, via Montgomery exponentiation.
///
/// The modulus must be odd (every supported group prime is) and no
/// wider than 8192 bits; the exponent must fit the modulus width. Both
/// hold for all values the sessions produce over a validated group.
pub fn powm(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    let base = base % modulus;
    let bits = modulus.bits();
    match bits {
        0..=2048 => powm_2048(&base, exp, modulus),
        2049..=3072 => powm_3072(&base, exp, modulus),
        3073..=4096 => powm_4096(&base, exp, modulus),
        4097..=6144 => powm_6144(&base, exp, modulus),
        6145..=8192 => powm_8192(&base, exp, modulus),
        _ => panic!("unsupported modulus width: {bits} bits"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::G_2048;

    #[test]
    fn matches_schoolbook_modpow() {
        let n = &G_2048.n;
        let base = BigUint::from(0xDEAD_BEEFu32);
        let exp = BigUint::from(65_537u32);
        assert_eq!(powm(&base, &exp, n), base.modpow(&exp, n));
    }

    #[test]
    fn oversized_base_is_reduced() {
        let n = &G_2048.n;
        let base = n + BigUint::from(5u32);
        let exp = BigUint::from(3u32);
        assert_eq!(powm(&base, &exp, n), base.modpow(&exp, n));
    }

    #[test]
    fn wider_moduli_use_the_next_bucket() {
        let n = (BigUint::from(1u32) << 3071u32) + BigUint::from(5u32);
        let base = BigUint::from(0xC0FFEEu32);
        let exp = BigUint::from(1_000_003u32);
        assert_eq!(powm(&base, &exp, &n), base.modpow(&exp, &n));
    }
}
