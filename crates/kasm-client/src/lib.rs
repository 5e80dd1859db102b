//! Async client for the Kasm Workspaces developer API.
//!
//! [`Client`] holds the endpoint and API-key credentials and exposes
//! one typed method per remote operation; [`Session`] sequences the
//! request / poll / exec / destroy lifecycle on top of it; the
//! [`transport`] module owns TLS policy, timeouts and the {200, 201}
//! status contract. Wire types live in the `kasm-protocol` crate, re-
//! exported here as [`protocol`].
//!
//! No operation retries internally and nothing blocks beyond the
//! configured request timeout; retry and poll cadence belong to the
//! caller.

pub mod client;
pub mod errors;
pub mod lifecycle;
pub mod transport;

pub use client::{API_PREFIX, Client};
pub use errors::{ClientError, Result, TransportError};
pub use lifecycle::Session;
pub use transport::{
    AuthChannel, InsecureTlsConfirmation, Transport, TransportConfig, TransportTimeout,
};

pub use kasm_protocol as protocol;
pub use kasm_protocol::{
    Credentials, ExecConfig, Image, NewUser, SessionStatus, UserAttributes, UserRecord,
    UserSelector,
};
