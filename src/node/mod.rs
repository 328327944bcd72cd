pub mod id;
pub mod kind;
pub mod node;

pub use id::NodeId;
pub use kind::NodeKind;
pub use node::Node;
