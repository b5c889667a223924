//! Endpoint drivers.
//!
//! A driver owns one session for the lifetime of a single
//! authentication exchange. It maps inbound payloads to session
//! operations in the exact order the protocol defines, enforces the
//! exchange deadline at every message boundary, and surfaces a single
//! terminal verdict to the host: an authenticated session key, or an
//! error. After either, every further message is rejected.
//!
//! Nothing a driver returns distinguishes, on the wire, which check
//! failed: on any error the host closes the transport without a reply.
//! The error value itself is host-facing only.

use std::mem;
use std::time::{Duration, Instant};

use digest::Digest;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::client::{SrpClient, SrpClientVerifier};
use crate::errors::{Result, SrpError};
use crate::messages::{decode_public, encode_public, ClientMessage, ServerMessage};
use crate::server::{SrpServer, SrpServerVerifier};
use crate::store::{UserRecord, UserStore};
use crate::types::SrpGroup;
use crate::utils::generate_private_ephemeral;

/// Session key surfaced on successful authentication, zeroized on drop.
pub type SessionKey = Zeroizing<Vec<u8>>;

/// Default exchange deadline, measured from the start of the exchange.
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-exchange driver configuration.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Deadline for the whole exchange, checked at message boundaries.
    pub timeout: Duration,
    /// Continue with a simulated record when the identity is unknown,
    /// so the first reply does not reveal whether a user exists.
    pub enumeration_resistance: bool,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_EXCHANGE_TIMEOUT,
            enumeration_resistance: true,
        }
    }
}

/// Per-process secret used to derive simulated records for unknown
/// identities. Generate once at startup and share across exchanges so
/// repeated probes for the same identity observe the same salt.
#[derive(Clone)]
pub struct ServerSecret([u8; 32]);

impl ServerSecret {
    /// Draw a fresh secret from the CSPRNG.
    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Result<Self> {
        let mut secret = [0u8; 32];
        rng.try_fill_bytes(&mut secret)
            .map_err(|_| SrpError::InsufficientEntropy)?;
        Ok(Self(secret))
    }
}

/// What the client driver produced for one inbound message.
#[derive(Debug)]
pub enum ClientOutput {
    /// Payload to send to the server.
    Reply(ClientMessage),
    /// Terminal verdict: the exchange completed and this is the key.
    Authenticated(SessionKey),
}

/// What the server driver produced for one inbound message.
#[derive(Debug)]
pub enum ServerOutput {
    /// Payload to send to the client.
    Reply(ServerMessage),
    /// Terminal verdict: the client proved knowledge of the password.
    Authenticated {
        /// The shared session key
        key: SessionKey,
        /// The server proof `M2`, to be delivered to the client
        reply: ServerMessage,
    },
}

enum ClientPhase<D: Digest> {
    Init,
    AwaitB { a: Zeroizing<Vec<u8>> },
    AwaitM2 { verifier: SrpClientVerifier<D> },
    Done,
    Failed,
}

/// Client-side driver for one authentication exchange.
pub struct ClientDriver<'a, D: Digest> {
    session: SrpClient<'a, D>,
    group: &'a SrpGroup,
    config: ExchangeConfig,
    username: Vec<u8>,
    password: Zeroizing<Vec<u8>>,
    deadline: Option<Instant>,
    phase: ClientPhase<D>,
}

impl<'a, D: Digest> ClientDriver<'a, D> {
    /// Create a driver for one exchange. The password is held in a
    /// zeroizing buffer and cleared as soon as `M1` has been computed.
    pub fn new(
        group: &'a SrpGroup,
        config: ExchangeConfig,
        username: impl Into<Vec<u8>>,
        password: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            session: SrpClient::new(group),
            group,
            config,
            username: username.into(),
            password: Zeroizing::new(password.into()),
            deadline: None,
            phase: ClientPhase::Init,
        }
    }

    /// Start the exchange: sample `a` and emit the client hello.
    pub fn begin<R: CryptoRngCore>(&mut self, rng: &mut R) -> Result<ClientMessage> {
        if !matches!(self.phase, ClientPhase::Init) {
            return self.fail(SrpError::ProtocolOrder {
                expected: "a fresh exchange",
            });
        }
        let (a, a_pub) = loop {
            let a = match generate_private_ephemeral(rng) {
                Ok(a) => a,
                Err(err) => return self.fail(err),
            };
            let a_pub = self.session.compute_public_ephemeral(&a);
            if a_pub.iter().any(|&byte| byte != 0) {
                break (a, a_pub);
            }
        };
        self.deadline = Some(Instant::now() + self.config.timeout);
        self.phase = ClientPhase::AwaitB { a };
        Ok(ClientMessage::ClientHello {
            username: self.username.clone(),
            a_pub,
        })
    }

    /// Feed one inbound server payload to the state machine.
    pub fn handle(&mut self, message: ServerMessage) -> Result<ClientOutput> {
        if self.expired() {
            return self.fail(SrpError::ExchangeTimeout);
        }
        match (mem::replace(&mut self.phase, ClientPhase::Failed), message) {
            (ClientPhase::AwaitB { a }, ServerMessage::ServerChallenge { salt, b_pub }) => {
                if let Err(err) = decode_public(self.group, &b_pub) {
                    return self.fail(err);
                }
                let verifier = match self.session.process_reply(
                    &a,
                    &self.username,
                    &self.password,
                    &salt,
                    &b_pub,
                ) {
                    Ok(verifier) => verifier,
                    Err(err) => return self.fail(err),
                };
                // the password is not needed past this point
                self.password = Zeroizing::new(Vec::new());
                let m1 = verifier.proof().to_vec();
                self.phase = ClientPhase::AwaitM2 { verifier };
                Ok(ClientOutput::Reply(ClientMessage::ClientProof { m1 }))
            }
            (ClientPhase::AwaitM2 { verifier }, ServerMessage::ServerProof { m2 }) => {
                if let Err(err) = verifier.verify_server(&m2) {
                    return self.fail(err);
                }
                let key = Zeroizing::new(verifier.key().to_vec());
                self.phase = ClientPhase::Done;
                tracing::debug!("client exchange complete");
                Ok(ClientOutput::Authenticated(key))
            }
            (phase, _) => {
                let expected = match phase {
                    ClientPhase::Init => "begin before inbound messages",
                    ClientPhase::AwaitB { .. } => "server challenge",
                    ClientPhase::AwaitM2 { .. } => "server proof",
                    ClientPhase::Done | ClientPhase::Failed => "no further messages",
                };
                self.fail(SrpError::ProtocolOrder { expected })
            }
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn fail<T>(&mut self, err: SrpError) -> Result<T> {
        self.phase = ClientPhase::Failed;
        self.password = Zeroizing::new(Vec::new());
        tracing::debug!(error = %err, "client exchange failed");
        Err(err)
    }
}

enum ServerPhase<D: Digest> {
    Init,
    AwaitM1 { verifier: SrpServerVerifier<D> },
    Done,
    Failed,
}

/// Server-side driver for one authentication exchange.
pub struct ServerDriver<'a, D: Digest, S: UserStore> {
    session: SrpServer<'a, D>,
    group: &'a SrpGroup,
    store: &'a S,
    secret: ServerSecret,
    config: ExchangeConfig,
    deadline: Option<Instant>,
    phase: ServerPhase<D>,
}

impl<'a, D: Digest, S: UserStore> ServerDriver<'a, D, S> {
    /// Create a driver for one exchange over a shared record store and
    /// the process-wide [`ServerSecret`].
    pub fn new(
        group: &'a SrpGroup,
        store: &'a S,
        secret: ServerSecret,
        config: ExchangeConfig,
    ) -> Self {
        Self {
            session: SrpServer::new(group),
            group,
            store,
            secret,
            config,
            deadline: None,
            phase: ServerPhase::Init,
        }
    }

    /// Feed one inbound client payload to the state machine.
    ///
    /// A failed proof check returns an error and no payload: the host
    /// closes the transport without telling the client which check
    /// failed.
    pub fn handle<R: CryptoRngCore>(
        &mut self,
        rng: &mut R,
        message: ClientMessage,
    ) -> Result<ServerOutput> {
        match self.deadline {
            None => self.deadline = Some(Instant::now() + self.config.timeout),
            Some(deadline) if Instant::now() >= deadline => {
                return self.fail(SrpError::ExchangeTimeout);
            }
            Some(_) => {}
        }
        match (mem::replace(&mut self.phase, ServerPhase::Failed), message) {
            (ServerPhase::Init, ClientMessage::ClientHello { username, a_pub }) => {
                let a_int = match decode_public(self.group, &a_pub) {
                    Ok(a_int) => a_int,
                    Err(err) => return self.fail(err),
                };
                // A is validated before the lookup so nothing is
                // revealed for a hostile hello
                if &a_int % &self.group.n == BigUint::default() {
                    return self.fail(SrpError::InvalidPublicValue { name: "a_pub" });
                }
                let record = match self.store.lookup(&username) {
                    Some(record) => record,
                    None if self.config.enumeration_resistance => {
                        tracing::debug!("unknown identity, continuing with simulated record");
                        self.simulated_record(&username)
                    }
                    None => return self.fail(SrpError::UnknownUser),
                };
                let (b, b_pub) = loop {
                    let b = match generate_private_ephemeral(rng) {
                        Ok(b) => b,
                        Err(err) => return self.fail(err),
                    };
                    let b_pub = self.session.compute_public_ephemeral(&b, &record.verifier);
                    if b_pub.iter().any(|&byte| byte != 0) {
                        break (b, b_pub);
                    }
                };
                let verifier = match self.session.process_reply(
                    &b,
                    &username,
                    &record.salt,
                    &record.verifier,
                    &a_pub,
                ) {
                    Ok(verifier) => verifier,
                    Err(err) => return self.fail(err),
                };
                self.phase = ServerPhase::AwaitM1 { verifier };
                Ok(ServerOutput::Reply(ServerMessage::ServerChallenge {
                    salt: record.salt,
                    b_pub,
                }))
            }
            (ServerPhase::AwaitM1 { verifier }, ClientMessage::ClientProof { m1 }) => {
                if let Err(err) = verifier.verify_client(&m1) {
                    return self.fail(err);
                }
                let key = Zeroizing::new(verifier.key().to_vec());
                let m2 = verifier.proof().to_vec();
                self.phase = ServerPhase::Done;
                tracing::debug!("server exchange complete");
                Ok(ServerOutput::Authenticated {
                    key,
                    reply: ServerMessage::ServerProof { m2 },
                })
            }
            (phase, _) => {
                let expected = match phase {
                    ServerPhase::Init => "client hello",
                    ServerPhase::AwaitM1 { .. } => "client proof",
                    ServerPhase::Done | ServerPhase::Failed => "no further messages",
                };
                self.fail(SrpError::ProtocolOrder { expected })
            }
        }
    }

    // A plausible record derived from the identity and the server
    // secret: the salt is stable across probes, the verifier is a group
    // element no client can match without the secret.
    fn simulated_record(&self, username: &[u8]) -> UserRecord {
        let salt = {
            let mut d = D::new();
            d.update(self.secret.0);
            d.update(username);
            d.finalize().as_slice().to_vec()
        };
        let x = {
            let mut d = D::new();
            d.update(self.secret.0);
            d.update(username);
            d.update(b"v");
            BigUint::from_bytes_be(d.finalize().as_slice())
        };
        UserRecord {
            salt,
            verifier: encode_public(self.group, &self.group.powm(&x)),
        }
    }

    fn fail<T>(&mut self, err: SrpError) -> Result<T> {
        self.phase = ServerPhase::Failed;
        tracing::debug!(error = %err, "server exchange failed");
        Err(err)
    }
}
