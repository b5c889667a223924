//! SRP server side of the session.
//!
//! # Usage
//! Receive the user's username and public value `A`, look up the salt
//! and verifier for that username, sample `b` and answer with
//! `(salt, B)`:
//!
//! ```no_run
//! use sha2::Sha256;
//! use srp6a::groups::G_2048;
//! use srp6a::server::SrpServer;
//!
//! # let (salt, v) = (vec![0u8; 32], vec![0u8; 256]);
//! # let a_pub = [0u8; 256];
//! let server = SrpServer::<Sha256>::new(&G_2048);
//! let mut rng = rand::rngs::OsRng;
//! let b = srp6a::utils::generate_private_ephemeral(&mut rng)?;
//! let b_pub = server.compute_public_ephemeral(&b, &v);
//! // send (salt, b_pub); A arrives with the handshake
//! let verifier = server.process_reply(&b, b"root", &salt, &v, &a_pub)?;
//! # Ok::<(), srp6a::SrpError>(())
//! ```
//!
//! Finally receive the user's proof, verify it in constant time, and
//! only on success reply with the server proof:
//!
//! ```no_run
//! # use sha2::Sha256;
//! # use srp6a::groups::G_2048;
//! # use srp6a::server::SrpServer;
//! # let server = SrpServer::<Sha256>::new(&G_2048);
//! # let mut rng = rand::rngs::OsRng;
//! # let b = srp6a::utils::generate_private_ephemeral(&mut rng)?;
//! # let verifier = server.process_reply(&b, b"", b"", b"\x02", b"\x05")?;
//! # let client_proof = [0u8; 32];
//! verifier.verify_client(&client_proof)?;
//! let m2 = verifier.proof();
//! let key = verifier.key();
//! # Ok::<(), srp6a::SrpError>(())
//! ```
//!
//! On a failed `verify_client` the exchange is closed without a reply;
//! answering differently for a bad proof hands the client an oracle.

use core::marker::PhantomData;

use digest::{Digest, Output};
use num_bigint::BigUint;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::errors::{Result, SrpError};
use crate::tools::powm;
use crate::types::SrpGroup;
use crate::utils::{compute_k, compute_m1, compute_m2, compute_u, pad};

/// SRP server state before the handshake with the client.
pub struct SrpServer<'a, D: Digest> {
    group: &'a SrpGroup,
    k: BigUint,
    d: PhantomData<D>,
}

/// SRP server state after the handshake with the client.
pub struct SrpServerVerifier<D: Digest> {
    m1: Output<D>,
    m2: Output<D>,
    key: Zeroizing<Vec<u8>>,
}

impl<D: Digest> core::fmt::Debug for SrpServerVerifier<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SrpServerVerifier").finish_non_exhaustive()
    }
}

impl<'a, D: Digest> SrpServer<'a, D> {
    /// Create a new SRP server instance over `group`.
    #[must_use]
    pub fn new(group: &'a SrpGroup) -> Self {
        Self {
            group,
            k: compute_k::<D>(group),
            d: PhantomData,
        }
    }

    /// B = (k*v + g^b) mod N
    #[must_use]
    pub fn compute_b_pub(&self, b: &BigUint, v: &BigUint) -> BigUint {
        let n = &self.group.n;
        let inter = (&self.k * v) % n;
        (inter + self.group.powm(b)) % n
    }

    /// S = (A * v^u) ^ b mod N
    #[must_use]
    pub fn compute_premaster_secret(
        &self,
        a_pub: &BigUint,
        v: &BigUint,
        u: &BigUint,
        b: &BigUint,
    ) -> BigUint {
        let n = &self.group.n;
        let base = (a_pub * powm(v, u, n)) % n;
        powm(&base, b, n)
    }

    /// Get the public ephemeral value for sending to the client.
    ///
    /// `b` is the private ephemeral sampled for this exchange, `v` the
    /// stored verifier.
    #[must_use]
    pub fn compute_public_ephemeral(&self, b: &[u8], v: &[u8]) -> Vec<u8> {
        let b_pub = self.compute_b_pub(&BigUint::from_bytes_be(b), &BigUint::from_bytes_be(v));
        pad(&b_pub, self.group.byte_len())
    }

    /// Process the client's handshake.
    ///
    /// Fails on `A ≡ 0 (mod N)` and on `u = 0` before any key material
    /// is derived. On success the returned verifier holds the session
    /// key and both expected proofs.
    pub fn process_reply(
        &self,
        b: &[u8],
        username: &[u8],
        salt: &[u8],
        v: &[u8],
        a_pub: &[u8],
    ) -> Result<SrpServerVerifier<D>> {
        let n = &self.group.n;
        let b = BigUint::from_bytes_be(b);
        let v = BigUint::from_bytes_be(v);
        let a_pub = BigUint::from_bytes_be(a_pub) % n;

        // Safeguard against a malicious A
        if a_pub == BigUint::default() {
            return Err(SrpError::InvalidPublicValue { name: "a_pub" });
        }

        let b_pub = self.compute_b_pub(&b, &v);

        let u = compute_u::<D>(self.group, &a_pub, &b_pub);
        if u == BigUint::default() {
            return Err(SrpError::InvalidPublicValue { name: "u" });
        }

        let s = self.compute_premaster_secret(&a_pub, &v, &u, &b);
        let key = D::digest(s.to_bytes_be());

        let m1 = compute_m1::<D>(self.group, username, salt, &a_pub, &b_pub, key.as_slice());
        let m2 = compute_m2::<D>(self.group, &a_pub, m1.as_slice(), key.as_slice());

        Ok(SrpServerVerifier {
            m1,
            m2,
            key: Zeroizing::new(key.as_slice().to_vec()),
        })
    }
}

impl<D: Digest> SrpServerVerifier<D> {
    /// Shared session key. Only hand it to the host application after
    /// [`verify_client`] succeeded.
    ///
    /// [`verify_client`]: Self::verify_client
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Proof `M2` for sending to the client, only after the client's
    /// proof verified.
    pub fn proof(&self) -> &[u8] {
        self.m2.as_slice()
    }

    /// Verify the client's proof `M1` in constant time.
    pub fn verify_client(&self, reply: &[u8]) -> Result<()> {
        if self.m1.as_slice().ct_eq(reply).unwrap_u8() == 1 {
            Ok(())
        } else {
            Err(SrpError::ProofMismatch { peer: "client" })
        }
    }
}
