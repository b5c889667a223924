//! Additional SRP types.

use num_bigint::BigUint;

use crate::errors::{Result, SrpError};
use crate::tools::powm;

/// Group used for SRP computations.
///
/// Construct trusted groups directly (see [`crate::groups`]) or run
/// caller-supplied parameters through [`SrpGroup::from_components`],
/// which rejects moduli below 2048 bits. The group is immutable once
/// built and may be shared across any number of sessions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SrpGroup {
    /// A large safe prime (N = 2q+1, where q is prime)
    pub n: BigUint,
    /// A generator modulo N
    pub g: BigUint,
}

impl SrpGroup {
    /// Validate and build a group from caller-supplied parameters.
    pub fn from_components(n: BigUint, g: BigUint) -> Result<Self> {
        if n.bits() < 2048 {
            return Err(SrpError::InvalidGroup {
                reason: "modulus below 2048 bits",
            });
        }
        if n.bits() > 8192 {
            return Err(SrpError::InvalidGroup {
                reason: "modulus above 8192 bits",
            });
        }
        // Montgomery exponentiation needs an odd modulus; any prime
        // this size is
        if !n.bit(0) {
            return Err(SrpError::InvalidGroup {
                reason: "modulus is even",
            });
        }
        if g <= BigUint::from(1u32) || g >= n {
            return Err(SrpError::InvalidGroup {
                reason: "generator outside (1, N)",
            });
        }
        Ok(Self { n, g })
    }

    /// Width in bytes of the fixed-length encoding of group elements,
    /// `ceil(bits(N) / 8)`.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        ((self.n.bits() + 7) / 8) as usize
    }

    /// g^x mod N
    #[must_use]
    pub fn powm(&self, x: &BigUint) -> BigUint {
        powm(&self.g, x, &self.n)
    }
}
