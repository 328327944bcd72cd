pub mod activation;
pub mod connection;
pub mod error;
pub mod network;
pub mod node;

// Convenience re-exports
pub use activation::ActivationKind;
pub use connection::{Connection, ConnectionId};
pub use error::{NetworkError, Result};
pub use network::{ConnectionSpec, Network, NetworkSpec, NodeCounts, NodeSpec};
pub use node::{Node, NodeId, NodeKind};
