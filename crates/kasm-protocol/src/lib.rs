//! Wire data model for the Kasm Workspaces developer API.
//!
//! Domain snapshots, per-operation request payloads, and response
//! envelopes. Everything here is a transient view of remote state;
//! nothing is cached or kept authoritative on the client side.

pub mod models;
pub mod requests;
pub mod responses;

#[allow(unused_imports)]
pub use models::*;
#[allow(unused_imports)]
pub use requests::*;
#[allow(unused_imports)]
pub use responses::*;
