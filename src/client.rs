//! SRP client side of the session.
//!
//! # Usage
//! Create the client over a shared group; the asymmetry factor `k` is
//! derived once here and reused for every exchange:
//!
//! ```
//! use sha2::Sha256;
//! use srp6a::client::SrpClient;
//! use srp6a::groups::G_2048;
//!
//! let client = SrpClient::<Sha256>::new(&G_2048);
//! ```
//!
//! For enrollment, generate a salt and compute the verifier to hand to
//! the server over a protected channel:
//!
//! ```no_run
//! # use sha2::Sha256;
//! # use srp6a::client::SrpClient;
//! # use srp6a::groups::G_2048;
//! # let client = SrpClient::<Sha256>::new(&G_2048);
//! # let salt = [0u8; 32];
//! let verifier = client.compute_verifier(b"1234", &salt)?;
//! # Ok::<(), srp6a::SrpError>(())
//! ```
//!
//! For authentication, sample `a`, send the public ephemeral with the
//! username, and process the server's `(salt, B)` reply. `process_reply`
//! rejects a malicious `B` and produces the proofs and session key:
//!
//! ```no_run
//! # use sha2::Sha256;
//! # use srp6a::client::SrpClient;
//! # use srp6a::groups::G_2048;
//! # let client = SrpClient::<Sha256>::new(&G_2048);
//! # let (salt, b_pub) = ([0u8; 32], [0u8; 256]);
//! let mut rng = rand::rngs::OsRng;
//! let a = srp6a::utils::generate_private_ephemeral(&mut rng)?;
//! let a_pub = client.compute_public_ephemeral(&a);
//! // send (username, a_pub), receive (salt, b_pub)
//! let verifier = client.process_reply(&a, b"root", b"1234", &salt, &b_pub)?;
//! let m1 = verifier.proof();
//! // send m1, receive m2
//! # let m2 = [0u8; 32];
//! verifier.verify_server(&m2)?;
//! let key = verifier.key();
//! # Ok::<(), srp6a::SrpError>(())
//! ```

use core::marker::PhantomData;

use digest::{Digest, Output};
use num_bigint::BigUint;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{Result, SrpError};
use crate::kdf::compute_x;
use crate::tools::powm;
use crate::types::SrpGroup;
use crate::utils::{compute_k, compute_m1, compute_m2, compute_u, pad};

/// SRP client state before the handshake with the server.
pub struct SrpClient<'a, D: Digest> {
    group: &'a SrpGroup,
    k: BigUint,
    d: PhantomData<D>,
}

/// SRP client state after the handshake with the server.
pub struct SrpClientVerifier<D: Digest> {
    m1: Output<D>,
    m2: Output<D>,
    key: Zeroizing<Vec<u8>>,
}

impl<D: Digest> core::fmt::Debug for SrpClientVerifier<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SrpClientVerifier").finish_non_exhaustive()
    }
}

impl<'a, D: Digest> SrpClient<'a, D> {
    /// Create a new SRP client instance over `group`.
    #[must_use]
    pub fn new(group: &'a SrpGroup) -> Self {
        Self {
            group,
            k: compute_k::<D>(group),
            d: PhantomData,
        }
    }

    /// Derive the password verifier `v = g^x mod N` for enrollment.
    ///
    /// The output is the fixed-width encoding suitable for the record
    /// store. Same `(password, salt)` always yields the same verifier.
    pub fn compute_verifier(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        let x_bytes = compute_x(password, salt)?;
        let x = BigUint::from_bytes_be(&x_bytes);
        Ok(pad(&self.compute_v(&x), self.group.byte_len()))
    }

    /// A = g^a mod N
    #[must_use]
    pub fn compute_a_pub(&self, a: &BigUint) -> BigUint {
        self.group.powm(a)
    }

    /// v = g^x mod N
    #[must_use]
    pub fn compute_v(&self, x: &BigUint) -> BigUint {
        self.group.powm(x)
    }

    /// S = (B - k*g^x) ^ (a + u*x) mod N
    #[must_use]
    pub fn compute_premaster_secret(
        &self,
        b_pub: &BigUint,
        x: &BigUint,
        a: &BigUint,
        u: &BigUint,
    ) -> BigUint {
        let n = &self.group.n;
        let interm = (&self.k * self.group.powm(x)) % n;
        // Because we operate modulo N we can get (kv + g^b) < kg^x
        let base = if b_pub > &interm {
            (b_pub - &interm) % n
        } else {
            (n + b_pub - &interm) % n
        };
        // the exponent is not reduced: a + ux stays well below the
        // group width
        powm(&base, &(a + u * x), n)
    }

    /// Get the public ephemeral value for the handshake with the server.
    #[must_use]
    pub fn compute_public_ephemeral(&self, a: &[u8]) -> Vec<u8> {
        let a = BigUint::from_bytes_be(a);
        pad(&self.compute_a_pub(&a), self.group.byte_len())
    }

    /// Process the server's reply to the handshake.
    ///
    /// `a` is the private ephemeral sampled for this exchange, `b_pub`
    /// the server's public value as received. Fails on `B ≡ 0 (mod N)`
    /// and on `u = 0` before any key material is derived.
    pub fn process_reply(
        &self,
        a: &[u8],
        username: &[u8],
        password: &[u8],
        salt: &[u8],
        b_pub: &[u8],
    ) -> Result<SrpClientVerifier<D>> {
        let n = &self.group.n;
        let a = BigUint::from_bytes_be(a);
        let b_pub = BigUint::from_bytes_be(b_pub) % n;

        // Safeguard against a malicious B
        if b_pub == BigUint::default() {
            return Err(SrpError::InvalidPublicValue { name: "b_pub" });
        }

        let a_pub = self.compute_a_pub(&a);

        let u = compute_u::<D>(self.group, &a_pub, &b_pub);
        if u == BigUint::default() {
            return Err(SrpError::InvalidPublicValue { name: "u" });
        }

        let x_bytes = compute_x(password, salt)?;
        let x = BigUint::from_bytes_be(&x_bytes);

        let s = self.compute_premaster_secret(&b_pub, &x, &a, &u);
        let key = D::digest(s.to_bytes_be());

        let m1 = compute_m1::<D>(self.group, username, salt, &a_pub, &b_pub, key.as_slice());
        let m2 = compute_m2::<D>(self.group, &a_pub, m1.as_slice(), key.as_slice());

        Ok(SrpClientVerifier {
            m1,
            m2,
            key: Zeroizing::new(key.as_slice().to_vec()),
        })
    }
}

impl<D: Digest> SrpClientVerifier<D> {
    /// Shared session key. Only trust it after [`verify_server`]
    /// succeeded or the key is confirmed through other authenticated
    /// means.
    ///
    /// [`verify_server`]: Self::verify_server
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Proof `M1` for sending to the server.
    pub fn proof(&self) -> &[u8] {
        self.m1.as_slice()
    }

    /// Verify the server's proof `M2` in constant time.
    pub fn verify_server(&self, reply: &[u8]) -> Result<()> {
        if self.m2.as_slice().ct_eq(reply).unwrap_u8() == 1 {
            Ok(())
        } else {
            Err(SrpError::ProofMismatch { peer: "server" })
        }
    }
}
