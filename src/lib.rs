#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![allow(clippy::many_single_char_names)]

//! Secure Remote Password (SRP-6a) password-authenticated key
//! agreement, per RFC 2945 / RFC 5054.
//!
//! A client proves knowledge of a password to a server that stores only
//! a salted verifier, and both sides derive the same session key. A
//! passive observer learns neither the password nor the key; an active
//! server impersonator cannot mount an offline dictionary attack.
//!
//! # Protocol description
//!
//! All arithmetic is modulo a large safe prime `N` with generator `g`;
//! `H` is the configured digest and `PAD` the fixed-width big-endian
//! encoding of the group width.
//!
//! | Server                           | Data transfer       | Client                            |
//! |----------------------------------|---------------------|-----------------------------------|
//! | `k = H(PAD(N) ‖ PAD(g))`         |                     | `k = H(PAD(N) ‖ PAD(g))`          |
//! |                                  | <- `I`, `A`         | `a = random`, `A = g^a`           |
//! | `(s, v) = lookup(I)`             |                     |                                   |
//! | `b = random`                     |                     |                                   |
//! | `B = k·v + g^b`                  | `s`, `B` ->         | abort if `B mod N = 0`            |
//! | abort if `A mod N = 0`           |                     |                                   |
//! | `u = H(PAD(A) ‖ PAD(B))`         |                     | `u = H(PAD(A) ‖ PAD(B))`          |
//! |                                  |                     | `x = scrypt(p, s)`                |
//! | `S = (A·v^u)^b`                  |                     | `S = (B − k·g^x)^(a + u·x)`       |
//! | `K = H(S)`                       |                     | `K = H(S)`                        |
//! | verify `M1`                      | <- `M1`             | `M1 = H(H(N)⊕H(g) ‖ H(I) ‖ s ‖ A ‖ B ‖ K)` |
//! | `M2 = H(A ‖ M1 ‖ K)`             | `M2` ->             | verify `M2`                       |
//!
//! The verifier `v = g^x mod N` is produced once during enrollment and
//! stored against `(I, s)`; the password itself never reaches the
//! server.
//!
//! # Usage
//!
//! The [`client`] and [`server`] modules expose the session operations
//! directly, in the style shown in their module docs. The [`driver`]
//! module wraps them in per-exchange state machines that consume and
//! produce the abstract payloads in [`messages`], enforce message
//! ordering and the exchange deadline, and surface a terminal verdict.
//!
//! ```
//! use srp6a::{
//!     ClientDriver, ClientMessage, ClientOutput, ExchangeConfig, MemoryStore, ServerDriver,
//!     ServerOutput, ServerSecret, SrpClient, UserRecord,
//! };
//! use sha2::Sha256;
//! use srp6a::groups::G_2048;
//!
//! let mut rng = rand::rngs::OsRng;
//!
//! // enrollment
//! let salt = srp6a::utils::generate_salt(&mut rng)?;
//! let verifier = SrpClient::<Sha256>::new(&G_2048).compute_verifier(b"1234", &salt)?;
//! let mut store = MemoryStore::new();
//! store.insert(&b"root"[..], UserRecord { salt: salt.to_vec(), verifier });
//!
//! // one authentication exchange
//! let secret = ServerSecret::generate(&mut rng)?;
//! let mut client =
//!     ClientDriver::<Sha256>::new(&G_2048, ExchangeConfig::default(), &b"root"[..], &b"1234"[..]);
//! let mut server = ServerDriver::<Sha256, _>::new(&G_2048, &store, secret, ExchangeConfig::default());
//!
//! let hello = client.begin(&mut rng)?;
//! let ServerOutput::Reply(challenge) = server.handle(&mut rng, hello)? else { unreachable!() };
//! let ClientOutput::Reply(proof) = client.handle(challenge)? else { unreachable!() };
//! let ServerOutput::Authenticated { key: server_key, reply } = server.handle(&mut rng, proof)?
//!     else { unreachable!() };
//! let ClientOutput::Authenticated(client_key) = client.handle(reply)? else { unreachable!() };
//! assert_eq!(&*client_key, &*server_key);
//! # Ok::<(), srp6a::SrpError>(())
//! ```

mod tools;

pub mod client;
pub mod driver;
pub mod errors;
pub mod groups;
pub mod kdf;
pub mod messages;
pub mod server;
pub mod store;
pub mod types;
pub mod utils;

pub use self::{
    client::{SrpClient, SrpClientVerifier},
    driver::{
        ClientDriver, ClientOutput, ExchangeConfig, ServerDriver, ServerOutput, ServerSecret,
        SessionKey,
    },
    errors::{Result, SrpError},
    messages::{ClientMessage, ServerMessage},
    server::{SrpServer, SrpServerVerifier},
    store::{MemoryStore, UserRecord, UserStore},
    types::SrpGroup,
};

/// Default client instantiation with SHA-256 over the RFC 5054 2048-bit
/// group width.
pub type Client<'a> = SrpClient<'a, sha2::Sha256>;

/// Default server instantiation with SHA-256.
pub type Server<'a> = SrpServer<'a, sha2::Sha256>;
