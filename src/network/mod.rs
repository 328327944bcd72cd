pub mod network;
pub mod spec;

pub use network::{Network, NodeCounts};
pub use spec::{ConnectionSpec, NetworkSpec, NodeSpec};
