//! Password key derivation.
//!
//! The private key `x` is derived with scrypt; a plain hash over the
//! salt and password gives an attacker with a stolen verifier store far
//! too cheap a dictionary attack. Parameters are fixed per deployment:
//! changing them (or the hash) invalidates every stored verifier.

use scrypt::{scrypt, Params};
use zeroize::Zeroizing;

use crate::errors::{Result, SrpError};

/// scrypt cost parameter, log2(N) for N = 16384.
pub const SCRYPT_LOG_N: u8 = 14;
/// scrypt block size parameter.
pub const SCRYPT_R: u32 = 8;
/// scrypt parallelism parameter.
pub const SCRYPT_P: u32 = 1;
/// Length in bytes of the derived private key `x`.
pub const X_LEN: usize = 64;

/// Derive the private key `x` from the password and per-user salt.
///
/// The password is the scrypt password input and the salt the scrypt
/// salt input; the two are never concatenated. The returned buffer is
/// zeroized on drop.
pub fn compute_x(password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, X_LEN).map_err(|_| SrpError::Kdf)?;
    let mut x = Zeroizing::new(vec![0u8; X_LEN]);
    scrypt(password, salt, &params, &mut x).map_err(|_| SrpError::Kdf)?;
    Ok(x)
}
