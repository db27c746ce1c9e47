//! Replication plumbing for sharedraw
//!
//! - [`identity`] - Network identities of replicated objects and peers
//! - [`snapshot`] - Fixed 34-byte per-tick drawer snapshot
//! - [`transport`] - Per-object message delivery and an in-process loopback

mod error;
pub mod identity;
pub mod snapshot;
pub mod transport;

pub use error::{CodecError, TransportError};
pub use identity::{NetworkId, PeerId};
pub use snapshot::{ReplicatedSnapshot, SnapshotDecode, SnapshotEncode, NO_TARGET, SNAPSHOT_LEN};
pub use transport::{LoopbackEndpoint, LoopbackHub, Transport, ViewMessage};
