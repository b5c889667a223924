//! Abstract wire messages and the canonical payload encoding.
//!
//! The transport (JSON, CBOR, binary framing) is an external
//! collaborator; its only contract is to deliver these payloads in
//! order. Public values travel as fixed-width unsigned big-endian byte
//! strings of the group width, proofs as raw digest output.

use num_bigint::BigUint;

use crate::errors::{Result, SrpError};
use crate::types::SrpGroup;
use crate::utils::pad;

/// Messages sent from the client to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// First flow: the identity and the client public ephemeral `A`.
    ClientHello {
        /// Identity `I` as an opaque byte string
        username: Vec<u8>,
        /// `A` in the canonical fixed-width encoding
        a_pub: Vec<u8>,
    },
    /// Second flow: the client proof `M1`.
    ClientProof {
        /// `M1` as raw digest output
        m1: Vec<u8>,
    },
}

/// Messages sent from the server to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// First flow: the user's salt and the server public ephemeral `B`.
    ServerChallenge {
        /// Per-user salt `s`
        salt: Vec<u8>,
        /// `B` in the canonical fixed-width encoding
        b_pub: Vec<u8>,
    },
    /// Second flow: the server proof `M2`.
    ServerProof {
        /// `M2` as raw digest output
        m2: Vec<u8>,
    },
}

/// Encode a public value in the canonical fixed-width form.
#[must_use]
pub fn encode_public(group: &SrpGroup, x: &BigUint) -> Vec<u8> {
    pad(x, group.byte_len())
}

/// Decode a received public value, enforcing the canonical width.
pub fn decode_public(group: &SrpGroup, bytes: &[u8]) -> Result<BigUint> {
    if bytes.len() != group.byte_len() {
        return Err(SrpError::MalformedMessage {
            reason: "public value has wrong width",
        });
    }
    Ok(BigUint::from_bytes_be(bytes))
}
