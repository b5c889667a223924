//! Error types.

use core::{error, fmt};

/// Errors surfaced by the SRP-6a core and the endpoint drivers.
///
/// A session that returns any of these is terminal: the driver moves to
/// its failed state and rejects every further message. None of the
/// variants carry information that may cross the wire; peers only ever
/// observe a closed exchange.
#[non_exhaustive]
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SrpError {
    /// A public value was rejected: `A ≡ 0 (mod N)`, `B ≡ 0 (mod N)`,
    /// or the scrambling parameter `u` hashed to zero.
    InvalidPublicValue {
        /// Parameter name
        name: &'static str,
    },
    /// A proof failed the constant-time comparison.
    ProofMismatch {
        /// Which peer's proof was invalid
        peer: &'static str,
    },
    /// A message arrived in the wrong phase of the exchange.
    ProtocolOrder {
        /// The message the state machine was prepared to accept
        expected: &'static str,
    },
    /// No record exists for the presented identity. Only surfaced when
    /// user-enumeration resistance is disabled; with resistance on, the
    /// server continues with a simulated record instead.
    UnknownUser,
    /// The CSPRNG reported a failure while sampling an ephemeral.
    InsufficientEntropy,
    /// A payload failed decoding before it reached the session.
    MalformedMessage {
        /// What was wrong with the payload
        reason: &'static str,
    },
    /// The exchange exceeded its configured deadline.
    ExchangeTimeout,
    /// A caller-supplied group was rejected at construction.
    InvalidGroup {
        /// Why the group is unusable
        reason: &'static str,
    },
    /// The password KDF rejected its parameters or output length.
    Kdf,
}

impl fmt::Display for SrpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPublicValue { name } => {
                write!(f, "illegal_parameter: bad '{name}' value")
            }
            Self::ProofMismatch { peer } => {
                write!(f, "bad_record_mac: incorrect '{peer}' proof")
            }
            Self::ProtocolOrder { expected } => {
                write!(f, "protocol_order: expected '{expected}'")
            }
            Self::UnknownUser => write!(f, "unknown_user: no record for identity"),
            Self::InsufficientEntropy => write!(f, "insufficient_entropy: CSPRNG failure"),
            Self::MalformedMessage { reason } => {
                write!(f, "malformed_message: {reason}")
            }
            Self::ExchangeTimeout => write!(f, "exchange_timeout: deadline exceeded"),
            Self::InvalidGroup { reason } => write!(f, "invalid_group: {reason}"),
            Self::Kdf => write!(f, "kdf: password hashing failed"),
        }
    }
}

impl error::Error for SrpError {}

/// Result type
pub type Result<T> = core::result::Result<T, SrpError>;
